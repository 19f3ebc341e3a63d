use std::fmt;
use std::str::FromStr;

use chrono::{ NaiveDate, NaiveTime };
use lazy_static::lazy_static;
use regex::Regex;
use serde::{ Deserialize, Deserializer, de::Unexpected };
use thiserror::Error;

use crate::error::ConfigurationError;

// any non-leap year works, MonthDay must exist in all of them.
const NON_LEAP_YEAR: i32 = 2001;

lazy_static!{
    static ref MONTH_DAY: Regex = Regex::new(r"^\s*(\d{1,2})/(\d{1,2})\s*$").unwrap();
}

/// A day of the year without the year, e.g. `03/10`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseMonthDayError {
    #[error("expected MM/DD, got \"{0}\".")]
    Format(String),

    #[error("{0:02}/{1:02} is not a day of every year.")]
    Range(u32, u32),
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Option<MonthDay> {
        NaiveDate::from_ymd_opt(NON_LEAP_YEAR, month, day).map(|_| MonthDay { month, day })
    }

    /// Places this day into `year`.
    pub fn in_year(&self, year: i32) -> Result<NaiveDate, ConfigurationError> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .ok_or(ConfigurationError::InvalidDate { year, month: self.month, day: self.day })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = ParseMonthDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = MONTH_DAY.captures(s).ok_or_else(|| ParseMonthDayError::Format(s.to_string()))?;
        let (month, day) = match (c[1].parse::<u32>(), c[2].parse::<u32>()) {
            (Ok(m), Ok(d)) => (m, d),
            _ => return Err(ParseMonthDayError::Format(s.to_string())),
        };
        MonthDay::new(month, day).ok_or(ParseMonthDayError::Range(month, day))
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D>(d: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        let s = String::deserialize(d)?;
        match s.parse::<MonthDay>() {
            Ok(md) => Ok(md),
            Err(e) => Err(serde::de::Error::invalid_value(Unexpected::Str(&s), &format!("to be a MM/DD day of every year. {e}").as_str())),
        }
    }
}

/// A known sunset time for a day of the year.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct SunsetSample {
    pub date: MonthDay,

    #[serde(deserialize_with = "deserialize_time_of_day")]
    pub time: NaiveTime,
}

impl SunsetSample {
    pub fn new(date: MonthDay, time: NaiveTime) -> Self {
        SunsetSample { date, time }
    }
}

/// Parses `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub(crate) fn deserialize_time_of_day<'de, D>(d: D) -> Result<NaiveTime, D::Error> where D: Deserializer<'de> {
    let s = String::deserialize(d)?;
    match parse_time_of_day(&s) {
        Some(t) => Ok(t),
        None => Err(serde::de::Error::invalid_value(Unexpected::Str(&s), &"to be HH:MM or HH:MM:SS")),
    }
}
