pub mod sample;
pub mod timeline;

use chrono::NaiveDate;
use serde::Deserialize;

pub use sample::{ MonthDay, SunsetSample };
pub use timeline::{ Anchor, TimelineEntry };

use crate::error::ConfigurationError;

/// Source of the schedule data the sunset estimator and timeline resolver work on.
pub trait ConfigProvider {
    fn sunset_samples(&self) -> &[SunsetSample];

    /// The daylight saving time window of `year`.
    fn dst_window(&self, year: i32) -> Result<DstWindow, ConfigurationError>;

    fn light_timeline(&self) -> &[TimelineEntry];

    /// Checks everything a computation for `year` would need up front.
    fn validate(&self, year: i32) -> Result<(), ConfigurationError> {
        let samples = self.sunset_samples().len();
        if samples < 2 {
            return Err(ConfigurationError::InsufficientSunsetSamples(samples));
        }
        let entries = self.light_timeline().len();
        if entries < 2 {
            return Err(ConfigurationError::InsufficientTimelineEntries(entries));
        }
        self.dst_window(year)?;
        Ok(())
    }
}

/// Immutable snapshot of the schedule configuration.
///
/// A reload builds a new `Settings`, a snapshot handed to a computation is
/// never changed underneath it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub sunset_times: Vec<SunsetSample>,

    #[serde(default)]
    pub daylight_saving_time: Vec<DstRecord>,

    pub light_timeline: Vec<TimelineEntry>,
}

/// Daylight saving time dates of one year.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DstRecord {
    pub year: i32,
    pub start: MonthDay,
    pub end: MonthDay,
}

/// Dates during which daylight saving time is observed, `[start, end)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DstWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DstWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

impl ConfigProvider for Settings {
    fn sunset_samples(&self) -> &[SunsetSample] {
        &self.sunset_times
    }

    fn dst_window(&self, year: i32) -> Result<DstWindow, ConfigurationError> {
        let record = self.daylight_saving_time.iter()
            .find(|r| r.year == year)
            .ok_or(ConfigurationError::MissingDaylightSavingTime(year))?;

        let window = DstWindow { start: record.start.in_year(year)?, end: record.end.in_year(year)? };
        if window.start >= window.end {
            return Err(ConfigurationError::InvalidDaylightSavingTime { year, start: record.start, end: record.end });
        }
        Ok(window)
    }

    fn light_timeline(&self) -> &[TimelineEntry] {
        &self.light_timeline
    }
}
