//! Resolution of the daily light timeline.

use chrono::{ Duration, NaiveDate, NaiveDateTime, NaiveTime };
use log::debug;

use crate::error::ConfigurationError;
use crate::light::LightSetting;
use crate::settings::{ Anchor, ConfigProvider };
use crate::sunset::estimate_sunset;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// A timeline entry placed on the clock of a specific day.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub time: NaiveTime,
    pub temperature: i32,
    pub brightness: i32,
}

/// The timeline of `date`, sorted by time of day.
///
/// Sunset offsets that cross midnight wrap around, they are not clamped.
pub fn resolve_timeline<P>(provider: &P, date: NaiveDate) -> Result<Vec<ResolvedEntry>, ConfigurationError>
where P: ConfigProvider + ?Sized {
    let timeline = provider.light_timeline();
    if timeline.len() < 2 {
        return Err(ConfigurationError::InsufficientTimelineEntries(timeline.len()));
    }
    let sunset = estimate_sunset(provider, date)?;

    let mut entries: Vec<ResolvedEntry> = timeline.iter()
        .map(|e| ResolvedEntry {
            time: match e.anchor {
                Anchor::ExactTime(t) => t,
                Anchor::SunsetOffset(m) => sunset.overflowing_add_signed(Duration::minutes(m.rem_euclid(MINUTES_PER_DAY))).0,
            },
            temperature: e.temperature,
            brightness: e.brightness,
        })
        .collect();
    entries.sort_by_key(|e| e.time);

    debug!("timeline of {date} with sunset at {sunset}: {}",
        entries.iter().map(|e| format!("{}={}K/{}%", e.time, e.temperature, e.brightness)).collect::<Vec<_>>().join(", "));
    Ok(entries)
}

/// The light setting active at `now`.
///
/// `Ok(None)` when `now` lies before the first or at/after the last entry of
/// the day, in which case the bulbs are left alone.
pub fn resolve_current_setting<P>(provider: &P, now: NaiveDateTime) -> Result<Option<LightSetting>, ConfigurationError>
where P: ConfigProvider + ?Sized {
    let entries = resolve_timeline(provider, now.date())?;
    Ok(setting_at(&entries, now.time()))
}

fn setting_at(entries: &[ResolvedEntry], time: NaiveTime) -> Option<LightSetting> {
    let (first, last) = (entries.first()?, entries.last()?);
    if time < first.time || time >= last.time {
        return None;
    }

    // first.time <= time, so the bucket end is never the first entry
    let i = entries.iter().position(|e| e.time > time)?;
    let (start, end) = (&entries[i - 1], &entries[i]);

    let elapsed = time.signed_duration_since(start.time).num_milliseconds() as f64;
    let width = end.time.signed_duration_since(start.time).num_milliseconds() as f64;
    let fraction = elapsed / width;

    // `as` truncates toward zero
    let lerp = |a: i32, b: i32| (a as f64 + fraction * (b as f64 - a as f64)) as i64;
    Some(LightSetting::clamped(lerp(start.temperature, end.temperature), lerp(start.brightness, end.brightness)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn entry(time: NaiveTime, temperature: i32, brightness: i32) -> ResolvedEntry {
        ResolvedEntry { time, temperature, brightness }
    }

    #[test]
    fn outside_span_is_none() {
        let entries = [entry(hm(18, 30), 3000, 80), entry(hm(20, 0), 2200, 20)];
        assert_eq!(setting_at(&entries, hm(18, 29)), None);
        assert_eq!(setting_at(&entries, hm(20, 0)), None);
        assert_eq!(setting_at(&entries, hm(23, 0)), None);
    }

    #[test]
    fn bucket_start_is_exact() {
        let entries = [entry(hm(18, 30), 3000, 80), entry(hm(20, 0), 2200, 20)];
        assert_eq!(setting_at(&entries, hm(18, 30)), Some(LightSetting::clamped(3000, 80)));
    }

    #[test]
    fn picks_the_straddling_bucket() {
        let entries = [
            entry(hm(6, 0), 4000, 100),
            entry(hm(8, 0), 5000, 100),
            entry(hm(18, 0), 3000, 60),
            entry(hm(22, 0), 2200, 10),
        ];
        assert_eq!(setting_at(&entries, hm(7, 0)), Some(LightSetting::clamped(4500, 100)));
        assert_eq!(setting_at(&entries, hm(12, 0)), Some(LightSetting::clamped(4200, 84)));
        assert_eq!(setting_at(&entries, hm(21, 0)), Some(LightSetting::clamped(2400, 22)));
    }

    #[test]
    fn truncates_instead_of_rounding() {
        let entries = [entry(hm(10, 0), 3000, 10), entry(hm(10, 3), 3002, 12)];
        // two thirds of the way
        assert_eq!(setting_at(&entries, hm(10, 2)), Some(LightSetting::clamped(3001, 11)));
    }

    #[test]
    fn duplicate_times_do_not_divide_by_zero() {
        let entries = [entry(hm(10, 0), 3000, 50), entry(hm(10, 0), 4000, 60), entry(hm(11, 0), 5000, 70)];
        assert_eq!(setting_at(&entries, hm(10, 30)), Some(LightSetting::clamped(4500, 65)));
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let entries = [entry(hm(8, 0), i32::MIN, i32::MAX), entry(hm(9, 0), i32::MAX, i32::MIN)];
        assert_eq!(setting_at(&entries, hm(8, 0)), Some(LightSetting::clamped(2200, 100)));
        assert_eq!(setting_at(&entries, hm(8, 30)), Some(LightSetting::clamped(2200, 10)));
        assert_eq!(setting_at(&entries, hm(8, 59)), Some(LightSetting::clamped(6000, 10)));
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(setting_at(&[], hm(10, 0)), None);
    }
}
