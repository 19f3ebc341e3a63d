mod args;
mod bulbs;
mod config;
mod control;
mod logging;

use std::process::ExitCode;

use chrono::Local;
use log::{ error, info, debug };

use args::{ Args, Mode, USAGE };
use bulbs::Bulbs;
use config::Config;
use control::ControlError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::parse(std::env::args()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::from(2);
        },
    };
    if args.mode == Mode::Help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    // the logger is configured from the config, so failures before it go to stderr
    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("loading config failed. {e}");
            return ExitCode::FAILURE;
        },
    };
    if let Err(e) = logging::init(&config.logging) {
        eprintln!("initializing logger failed. {e}");
        return ExitCode::FAILURE;
    }

    info!("starting with {args:?}");
    debug!("using {:?} bulbs at {:?}", config.general.module, config.general.bulb_ips);

    let mut bulbs = bulbs::build(&config.general);
    match run(args.mode, &config, bulbs.as_mut()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}

async fn run(mode: Mode, config: &Config, bulbs: &mut dyn Bulbs) -> Result<(), ControlError> {
    match mode {
        Mode::Off => { control::set_state(bulbs, false).await?; },
        Mode::On => { control::set_state(bulbs, true).await?; },
        Mode::Set { temperature, brightness } => { control::set_setting(bulbs, temperature, brightness).await?; },
        Mode::Auto { at } => {
            let now = at.unwrap_or_else(|| Local::now().naive_local());
            control::set_from_timeline(bulbs, &config.schedule, now).await?;
        },
        Mode::Help => unreachable!("help is printed before the config is loaded"),
    }
    Ok(())
}
