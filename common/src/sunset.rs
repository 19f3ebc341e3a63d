//! Sunset estimation from a sparse table of known sunset times.
//!
//! Samples inside the daylight saving time window are moved back to standard
//! time, interpolated linearly by day between the two samples straddling the
//! target date, and moved forward again if the target date observes daylight
//! saving time. The table is cyclic, the sample after the last one of a year is
//! the first one of the next year.

use chrono::{ Datelike, Duration, NaiveDate, NaiveTime };
use log::trace;

use crate::error::ConfigurationError;
use crate::settings::{ ConfigProvider, DstWindow, MonthDay, SunsetSample };

const DST_SHIFT_HOURS: i64 = 1;

/// A sample placed into a concrete year, in standard time.
#[derive(Copy, Clone, Debug)]
struct Placed {
    day: MonthDay,
    date: NaiveDate,
    time: NaiveTime,
}

impl Placed {
    fn years_later(&self, years: i32) -> Result<Placed, ConfigurationError> {
        if years == 0 { return Ok(*self); }
        let date = self.day.in_year(self.date.year() + years)?;
        Ok(Placed { date, ..*self })
    }
}

/// Estimated sunset time of `date`, in the local clock time of that date.
///
/// The year of `date` selects the daylight saving time window, no clock is read.
pub fn estimate_sunset<P>(provider: &P, date: NaiveDate) -> Result<NaiveTime, ConfigurationError>
where P: ConfigProvider + ?Sized {
    let samples = provider.sunset_samples();
    if samples.len() < 2 {
        return Err(ConfigurationError::InsufficientSunsetSamples(samples.len()));
    }
    let dst = provider.dst_window(date.year())?;

    let placed = standard_time_samples(samples, date.year(), &dst)?;
    let (start, end) = bucket(&placed, date)?;
    let standard = interpolate(&start, &end, date);

    let sunset = if dst.contains(date) { shift_hours(standard, DST_SHIFT_HOURS) } else { standard };
    trace!("sunset of {date}: bucket {} {} -> {} {}, {sunset}", start.date, start.time, end.date, end.time);
    Ok(sunset)
}

/// Places every sample into `year`, undoes daylight saving time and sorts by date.
fn standard_time_samples(samples: &[SunsetSample], year: i32, dst: &DstWindow) -> Result<Vec<Placed>, ConfigurationError> {
    let mut placed = samples.iter()
        .map(|s| {
            let date = s.date.in_year(year)?;
            let time = if dst.contains(date) { shift_hours(s.time, -DST_SHIFT_HOURS) } else { s.time };
            Ok(Placed { day: s.date, date, time })
        })
        .collect::<Result<Vec<_>, ConfigurationError>>()?;
    placed.sort_by_key(|p| p.date);
    Ok(placed)
}

/// The samples straddling `date`, `start.date <= date < end.date`.
///
/// `end` is the first sample after `date`, `start` its circular predecessor.
/// Wrapping past either end of the year moves that sample by one year.
fn bucket(placed: &[Placed], date: NaiveDate) -> Result<(Placed, Placed), ConfigurationError> {
    let n = placed.len();
    let i = placed.iter().position(|p| p.date > date).unwrap_or(n);

    let start = placed[(i + n - 1) % n].years_later(if i == 0 { -1 } else { 0 })?;
    let end = placed[i % n].years_later(if i == n { 1 } else { 0 })?;
    Ok((start, end))
}

fn interpolate(start: &Placed, end: &Placed, date: NaiveDate) -> NaiveTime {
    let width = (end.date - start.date).num_days();
    let offset = (date - start.date).num_days();
    let fraction = offset as f64 / width as f64;

    let span = end.time.signed_duration_since(start.time);
    let delta = (span.num_milliseconds() as f64 * fraction).round() as i64;
    start.time.overflowing_add_signed(Duration::milliseconds(delta)).0
}

/// Moves a time of day by whole hours, wrapping around midnight.
fn shift_hours(time: NaiveTime, hours: i64) -> NaiveTime {
    time.overflowing_add_signed(Duration::hours(hours)).0
}
