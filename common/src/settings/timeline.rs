use chrono::NaiveTime;
use serde::{ Deserialize, Deserializer, de::Unexpected };
use thiserror::Error;

use super::sample::parse_time_of_day;

/// Where on the clock a timeline entry sits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Anchor {
    ExactTime(NaiveTime),
    /// Minutes relative to the day's sunset, negative is before.
    SunsetOffset(i64),
}

/// A configured point of the daily light timeline.
///
/// Deserialized from a table holding exactly one of `time` or
/// `sunset_offset`, plus `temperature` and `brightness`. Out of range
/// values are allowed here, the resolved output is clamped instead.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawTimelineEntry")]
pub struct TimelineEntry {
    pub anchor: Anchor,
    pub temperature: i32,
    pub brightness: i32,
}

impl TimelineEntry {
    pub fn at(time: NaiveTime, temperature: i32, brightness: i32) -> Self {
        TimelineEntry { anchor: Anchor::ExactTime(time), temperature, brightness }
    }

    pub fn sunset_offset(minutes: i64, temperature: i32, brightness: i32) -> Self {
        TimelineEntry { anchor: Anchor::SunsetOffset(minutes), temperature, brightness }
    }
}

#[derive(Error, Debug)]
pub enum AnchorError {
    #[error("timeline entry has both `time` and `sunset_offset`, expected one.")]
    Both,

    #[error("timeline entry has neither `time` nor `sunset_offset`.")]
    Neither,
}

#[derive(Deserialize)]
struct RawTimelineEntry {
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    time: Option<NaiveTime>,
    #[serde(default)]
    sunset_offset: Option<i64>,
    temperature: i32,
    brightness: i32,
}

impl TryFrom<RawTimelineEntry> for TimelineEntry {
    type Error = AnchorError;

    fn try_from(raw: RawTimelineEntry) -> Result<Self, Self::Error> {
        let anchor = match (raw.time, raw.sunset_offset) {
            (Some(t), None) => Anchor::ExactTime(t),
            (None, Some(m)) => Anchor::SunsetOffset(m),
            (Some(_), Some(_)) => return Err(AnchorError::Both),
            (None, None) => return Err(AnchorError::Neither),
        };
        Ok(TimelineEntry { anchor, temperature: raw.temperature, brightness: raw.brightness })
    }
}

fn deserialize_optional_time<'de, D>(d: D) -> Result<Option<NaiveTime>, D::Error> where D: Deserializer<'de> {
    match Option::<String>::deserialize(d)? {
        None => Ok(None),
        Some(s) => match parse_time_of_day(&s) {
            Some(t) => Ok(Some(t)),
            None => Err(serde::de::Error::invalid_value(Unexpected::Str(&s), &"to be HH:MM or HH:MM:SS")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_both_anchor_kinds() {
        let entries: Vec<TimelineEntry> = serde_json::from_str(r#"[
            { "time": "06:30", "temperature": 4000, "brightness": 60 },
            { "sunset_offset": -30, "temperature": 3000, "brightness": 80 }
        ]"#).unwrap();

        assert_eq!(entries[0], TimelineEntry::at(NaiveTime::from_hms_opt(6, 30, 0).unwrap(), 4000, 60));
        assert_eq!(entries[1], TimelineEntry::sunset_offset(-30, 3000, 80));
    }

    #[test]
    fn rejects_ambiguous_anchor() {
        let both = serde_json::from_str::<TimelineEntry>(
            r#"{ "time": "06:30", "sunset_offset": 10, "temperature": 4000, "brightness": 60 }"#);
        let neither = serde_json::from_str::<TimelineEntry>(r#"{ "temperature": 4000, "brightness": 60 }"#);

        assert!(both.unwrap_err().to_string().contains("both"));
        assert!(neither.unwrap_err().to_string().contains("neither"));
    }
}
