use std::path::Path;

use log4rs::{
    self,
    append::{ console::{ConsoleAppender, Target}, rolling_file::{ policy::compound::{ roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy, }, RollingFileAppender, }, },
    config::{Appender, Root},
    encode::pattern::PatternEncoder
};

use crate::config::logging::Logging;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send>>;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l}):5} {t} {T} - {m}{n}";

/// Logs to stdout and a size rolled `lights.log`, panics included.
pub fn init(cnf: &Logging) -> Result<()> {
    let log_cnf = generate_config(cnf)?;
    log4rs::init_config(log_cnf).map_err(|e| -> Box<dyn std::error::Error + Send> { Box::new(e) } )?;
    log_panics::init();
    Ok(())
}

fn generate_config(cnf: &Logging) -> Result<log4rs::Config> {
    let path = Path::new(&cnf.path);
    let size = cnf.size.checked_mul(1024 * 1024).unwrap_or(u64::MAX);

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stdout)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let roller = FixedWindowRoller::builder()
        .build(path.join("lights.{}.log").to_string_lossy().as_ref(), cnf.count)?;

    let rolling_file_appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(
            path.join("lights.log"),
            Box::new(CompoundPolicy::new(Box::new(SizeTrigger::new(size)), Box::new(roller))),
        ).map_err(|e| -> Box<dyn std::error::Error + Send> { Box::new(e) } )?;

    let log_cnf = log4rs::Config::builder()
        .appender(
            Appender::builder().build("rolling_file_appender", Box::new(rolling_file_appender)),
        )
        .appender(Appender::builder().build("console_appender", Box::new(console_appender)))
        .build(
            Root::builder()
                .appender("rolling_file_appender")
                .appender("console_appender")
                .build(cnf.level),
        ).map_err(|e| -> Box<dyn std::error::Error + Send> { Box::new(e) } )?;

    Ok(log_cnf)
}
