use chrono::NaiveTime;
use log::debug;

use crate::models::{CanonicalPrayer, ClockTime, PrayerTimeSet};

/// Identity of a fired alert. The time is part of the key so a prayer
/// whose time moved after a refresh alerts again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlarmKey {
    pub prayer: CanonicalPrayer,
    pub time: ClockTime,
}

/// Minute-resolution poller with a single-slot memo of the last alert.
#[derive(Debug, Default)]
pub struct AlarmMatcher {
    memo: Option<AlarmKey>,
}

impl AlarmMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memo(&self) -> Option<AlarmKey> {
        self.memo
    }

    /// Returns the key to alert on for this tick, if any. Disabled alerts or
    /// a missing time set make the tick a no-op and leave the memo as is.
    pub fn check(
        &mut self,
        now: NaiveTime,
        times: Option<&PrayerTimeSet>,
        alerts_enabled: bool,
    ) -> Option<AlarmKey> {
        if !alerts_enabled {
            return None;
        }
        let times = times?;
        let now = ClockTime::from_naive(now);

        let (prayer, time) = times
            .canonical()
            .into_iter()
            .find(|(_, time)| *time == now)?;
        let key = AlarmKey { prayer, time };

        if self.memo == Some(key) {
            debug!("{} at {} already alerted", prayer, time);
            return None;
        }
        self.memo = Some(key);
        Some(key)
    }
}
