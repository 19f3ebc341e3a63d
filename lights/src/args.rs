//! Command line parsing.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: lights [MODE] [OPTIONS]

Modes (the first one listed wins if several are given):
  --bulbs-off                 turn the bulbs off
  --bulbs-on                  turn the bulbs on
  --temp <K> --brightness <%> set temperature and brightness, both are required
  --auto-set                  apply the light timeline setting of the current time

Options:
  --at <YYYY-MM-DD HH:MM[:SS]> use this local time instead of now for --auto-set
  --config <FILE>             read this configuration file after lights.toml
  -h, --help                  print this help";

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Off,
    On,
    Set { temperature: i64, brightness: i64 },
    Auto { at: Option<NaiveDateTime> },
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub mode: Mode,
    pub config: Option<PathBuf>,
}

#[derive(Error, Debug, PartialEq)]
pub enum ArgsError {
    #[error("unknown argument \"{0}\".")]
    Unknown(String),

    #[error("{0} requires a value.")]
    MissingValue(&'static str),

    #[error("invalid value \"{value}\" for {flag}.")]
    InvalidValue { flag: &'static str, value: String },

    #[error("--temp and --brightness must be given together.")]
    IncompleteSetting,
}

impl Args {
    /// Parses `args`, the first item being the program name.
    pub fn parse<I, S>(args: I) -> Result<Args, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut off = false;
        let mut on = false;
        let mut auto = false;
        let mut help = false;
        let mut temperature: Option<i64> = None;
        let mut brightness: Option<i64> = None;
        let mut at: Option<NaiveDateTime> = None;
        let mut config: Option<PathBuf> = None;

        let args: Vec<String> = args.into_iter().skip(1).map(|s| s.as_ref().to_string()).collect();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--bulbs-off" => off = true,
                "--bulbs-on" => on = true,
                "--auto-set" => auto = true,
                "-h" | "--help" => help = true,
                "--temp" => temperature = Some(number("--temp", iter.next())?),
                "--brightness" => brightness = Some(number("--brightness", iter.next())?),
                "--at" => at = Some(date_time(iter.next())?),
                "--config" => config = Some(PathBuf::from(iter.next().ok_or(ArgsError::MissingValue("--config"))?)),
                unknown => return Err(ArgsError::Unknown(unknown.to_string())),
            }
        }

        let mode = match (temperature, brightness) {
            (Some(_), None) | (None, Some(_)) => return Err(ArgsError::IncompleteSetting),
            _ if help => Mode::Help,
            _ if off => Mode::Off,
            _ if on => Mode::On,
            (Some(temperature), Some(brightness)) => Mode::Set { temperature, brightness },
            _ if auto => Mode::Auto { at },
            _ => Mode::Help,
        };
        Ok(Args { mode, config })
    }
}

fn number(flag: &'static str, value: Option<&String>) -> Result<i64, ArgsError> {
    let value = value.ok_or(ArgsError::MissingValue(flag))?;
    value.parse::<i64>().map_err(|_| ArgsError::InvalidValue { flag, value: value.clone() })
}

fn date_time(value: Option<&String>) -> Result<NaiveDateTime, ArgsError> {
    let value = value.ok_or(ArgsError::MissingValue("--at"))?;
    DATE_TIME_FORMATS.iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .ok_or_else(|| ArgsError::InvalidValue { flag: "--at", value: value.clone() })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(std::iter::once("lights").chain(args.iter().copied()))
    }

    fn mode(args: &[&str]) -> Mode {
        parse(args).unwrap().mode
    }

    #[test]
    fn single_modes() {
        assert_eq!(mode(&["--bulbs-off"]), Mode::Off);
        assert_eq!(mode(&["--bulbs-on"]), Mode::On);
        assert_eq!(mode(&["--temp", "2700", "--brightness", "40"]), Mode::Set { temperature: 2700, brightness: 40 });
        assert_eq!(mode(&["--auto-set"]), Mode::Auto { at: None });
        assert_eq!(mode(&[]), Mode::Help);
        assert_eq!(mode(&["-h"]), Mode::Help);
    }

    #[test]
    fn precedence_off_on_set_auto() {
        assert_eq!(mode(&["--auto-set", "--bulbs-on", "--bulbs-off"]), Mode::Off);
        assert_eq!(mode(&["--auto-set", "--bulbs-on"]), Mode::On);
        assert_eq!(mode(&["--auto-set", "--brightness", "5", "--temp", "9000"]), Mode::Set { temperature: 9000, brightness: 5 });
    }

    #[test]
    fn auto_set_at_fixed_time() {
        let expected = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap().and_hms_opt(19, 15, 0).unwrap();
        assert_eq!(mode(&["--auto-set", "--at", "2024-04-01 19:15"]), Mode::Auto { at: Some(expected) });
        assert_eq!(mode(&["--at", "2024-04-01T19:15:00", "--auto-set"]), Mode::Auto { at: Some(expected) });
    }

    #[test]
    fn config_path() {
        let args = parse(&["--auto-set", "--config", "/etc/lights.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/lights.toml")));
    }

    #[test]
    fn errors() {
        assert_eq!(parse(&["--dance"]), Err(ArgsError::Unknown("--dance".to_string())));
        assert_eq!(parse(&["--temp"]), Err(ArgsError::MissingValue("--temp")));
        assert_eq!(parse(&["--temp", "warm", "--brightness", "4"]), Err(ArgsError::InvalidValue { flag: "--temp", value: "warm".to_string() }));
        assert_eq!(parse(&["--temp", "2700"]), Err(ArgsError::IncompleteSetting));
        assert_eq!(parse(&["--auto-set", "--at", "yesterday"]), Err(ArgsError::InvalidValue { flag: "--at", value: "yesterday".to_string() }));
    }
}
