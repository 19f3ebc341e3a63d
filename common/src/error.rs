use thiserror::Error;

use crate::settings::MonthDay;

/// Malformed or insufficient schedule data. Never recoverable locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("at least 2 sunset times are required, {0} configured.")]
    InsufficientSunsetSamples(usize),

    #[error("at least 2 light timeline entries are required, {0} configured.")]
    InsufficientTimelineEntries(usize),

    #[error("missing daylight saving time record for year {0}.")]
    MissingDaylightSavingTime(i32),

    #[error("daylight saving time for year {year} starts at {start} which is not before its end {end}.")]
    InvalidDaylightSavingTime { year: i32, start: MonthDay, end: MonthDay },

    #[error("{month:02}/{day:02} does not exist in year {year}.")]
    InvalidDate { year: i32, month: u32, day: u32 },
}
