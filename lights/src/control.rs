use chrono::{ Datelike, NaiveDateTime };
use common::bulb::Payload;
use common::timeline::resolve_current_setting;
use common::{ ConfigProvider, ConfigurationError, LightSetting };
use log::info;
use thiserror::Error;

use crate::bulbs::{ Bulbs, BulbError, Reply };

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("configuration is unusable. {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("talking to the bulbs failed. {0}")]
    Bulb(#[from] BulbError),
}

pub async fn set_state(bulbs: &mut dyn Bulbs, on: bool) -> Result<Vec<Reply>, BulbError> {
    info!("setting bulb state: {}", if on { "on" } else { "off" });
    bulbs.send(&Payload::state(on)).await
}

/// Clamps into what the bulbs accept before sending.
pub async fn set_setting(bulbs: &mut dyn Bulbs, temperature: i64, brightness: i64) -> Result<Vec<Reply>, BulbError> {
    let setting = LightSetting::clamped(temperature, brightness);
    info!("setting temperature and brightness: {setting} (requested {temperature}K at {brightness}%)");
    bulbs.send(&Payload::setting(setting)).await
}

/// Applies the timeline setting active at `now`, leaves the bulbs alone if there is none.
///
/// The whole schedule is validated for the year of `now` before anything is resolved.
pub async fn set_from_timeline<P>(bulbs: &mut dyn Bulbs, schedule: &P, now: NaiveDateTime) -> Result<Option<LightSetting>, ControlError>
where P: ConfigProvider + ?Sized {
    info!("setting bulbs based on the light timeline at {now}");
    schedule.validate(now.year())?;
    match resolve_current_setting(schedule, now)? {
        Some(setting) => {
            info!("timeline setting is {setting}");
            bulbs.send(&Payload::setting(setting)).await?;
            Ok(Some(setting))
        },
        None => {
            info!("no timeline entry is active at {}, nothing to do.", now.time());
            Ok(None)
        },
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{ NaiveDate, NaiveTime };
    use common::settings::{ DstRecord, MonthDay, Settings, SunsetSample, TimelineEntry };

    use super::*;

    /// Remembers every payload instead of sending it.
    #[derive(Default)]
    struct Recorder {
        sent: Vec<Payload>,
    }

    #[async_trait]
    impl Bulbs for Recorder {
        async fn send(&mut self, payload: &Payload) -> Result<Vec<Reply>, BulbError> {
            self.sent.push(payload.clone());
            Ok(vec![])
        }
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn schedule(timeline: Vec<TimelineEntry>) -> Settings {
        Settings {
            sunset_times: vec![
                SunsetSample::new(MonthDay::new(1, 1).unwrap(), hm(19, 0)),
                SunsetSample::new(MonthDay::new(2, 1).unwrap(), hm(19, 0)),
            ],
            daylight_saving_time: vec![DstRecord { year: 2023, start: MonthDay::new(3, 12).unwrap(), end: MonthDay::new(11, 5).unwrap() }],
            light_timeline: timeline,
        }
    }

    fn now(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 15).unwrap().and_time(hm(h, m))
    }

    #[tokio::test]
    async fn explicit_setting_is_clamped() {
        let mut rec = Recorder::default();
        set_setting(&mut rec, 10_000, 5).await.unwrap();
        assert_eq!(rec.sent, vec![Payload::setting(LightSetting::clamped(6000, 10))]);
    }

    #[tokio::test]
    async fn state_is_sent() {
        let mut rec = Recorder::default();
        set_state(&mut rec, false).await.unwrap();
        set_state(&mut rec, true).await.unwrap();
        assert_eq!(rec.sent, vec![Payload::state(false), Payload::state(true)]);
    }

    #[tokio::test]
    async fn timeline_setting_is_sent() {
        let s = schedule(vec![TimelineEntry::sunset_offset(-30, 3000, 80), TimelineEntry::sunset_offset(60, 2200, 20)]);
        let mut rec = Recorder::default();

        let applied = set_from_timeline(&mut rec, &s, now(19, 15)).await.unwrap();
        assert_eq!(applied, Some(LightSetting::clamped(2600, 50)));
        assert_eq!(rec.sent, vec![Payload::setting(LightSetting::clamped(2600, 50))]);
    }

    #[tokio::test]
    async fn inactive_timeline_sends_nothing() {
        let s = schedule(vec![TimelineEntry::sunset_offset(-30, 3000, 80), TimelineEntry::sunset_offset(60, 2200, 20)]);
        let mut rec = Recorder::default();

        assert_eq!(set_from_timeline(&mut rec, &s, now(17, 0)).await.unwrap(), None);
        assert!(rec.sent.is_empty());
    }

    #[tokio::test]
    async fn schedule_is_validated_before_resolving() {
        // the resolver alone would report the short timeline first
        let mut s = schedule(vec![TimelineEntry::at(hm(8, 0), 3000, 80)]);
        s.sunset_times.truncate(1);
        let mut rec = Recorder::default();

        let err = set_from_timeline(&mut rec, &s, now(9, 0)).await.unwrap_err();
        assert!(matches!(err, ControlError::Configuration(ConfigurationError::InsufficientSunsetSamples(1))));
        assert!(rec.sent.is_empty());
    }

    #[tokio::test]
    async fn configuration_error_sends_nothing() {
        let s = schedule(vec![TimelineEntry::at(hm(8, 0), 3000, 80)]);
        let mut rec = Recorder::default();

        let err = set_from_timeline(&mut rec, &s, now(9, 0)).await.unwrap_err();
        assert!(matches!(err, ControlError::Configuration(ConfigurationError::InsufficientTimelineEntries(1))));
        assert!(rec.sent.is_empty());
    }
}
