use chrono::NaiveTime;

use crate::models::{CanonicalPrayer, ClockTime, PrayerTimeSet, MINUTES_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPrayer {
    pub prayer: CanonicalPrayer,
    pub time: ClockTime,
    pub hours: u32,
    pub minutes: u32,
}

impl NextPrayer {
    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

/// First canonical prayer strictly after `now`, or tomorrow's Fajr once
/// Isha has passed. A prayer whose minute equals `now` is current, not next.
pub fn resolve_next(times: &PrayerTimeSet, now: NaiveTime) -> NextPrayer {
    let now_mins = ClockTime::from_naive(now).minutes_since_midnight();

    let (prayer, time, target) = times
        .canonical()
        .into_iter()
        .find(|(_, time)| time.minutes_since_midnight() > now_mins)
        .map(|(prayer, time)| (prayer, time, time.minutes_since_midnight()))
        .unwrap_or_else(|| {
            // All prayers passed — next is Fajr tomorrow
            let fajr = times.fajr;
            (
                CanonicalPrayer::Fajr,
                fajr,
                fajr.minutes_since_midnight() + MINUTES_PER_DAY,
            )
        });

    let diff = target - now_mins;
    NextPrayer {
        prayer,
        time,
        hours: diff / 60,
        minutes: diff % 60,
    }
}
