use anyhow::{anyhow, Result};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::{CanonicalPrayer, PrayerEvent};

pub const MINUTES_PER_DAY: u32 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Wall-clock time at minute resolution, always rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(anyhow!("Invalid clock time {}:{}", hour, minute));
        }
        Ok(Self { hour, minute })
    }

    /// Seconds are dropped, never rounded.
    pub fn from_naive(t: NaiveTime) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|e| anyhow!("Bad time '{}': {}", s, e))?;
        Ok(Self::from_naive(t))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

/// The six computed events for one calendar date. Replaced wholesale on
/// every refresh, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimeSet {
    pub fajr: ClockTime,
    pub sunrise: ClockTime,
    pub dhuhr: ClockTime,
    pub asr: ClockTime,
    pub maghrib: ClockTime,
    pub isha: ClockTime,
}

impl PrayerTimeSet {
    /// Static set rendered until the first successful computation.
    pub fn fallback() -> Self {
        Self {
            fajr: ClockTime { hour: 5, minute: 12 },
            sunrise: ClockTime { hour: 6, minute: 34 },
            dhuhr: ClockTime { hour: 12, minute: 28 },
            asr: ClockTime { hour: 15, minute: 42 },
            maghrib: ClockTime { hour: 18, minute: 22 },
            isha: ClockTime { hour: 19, minute: 38 },
        }
    }

    pub fn time_of(&self, prayer: CanonicalPrayer) -> ClockTime {
        match prayer {
            CanonicalPrayer::Fajr => self.fajr,
            CanonicalPrayer::Dhuhr => self.dhuhr,
            CanonicalPrayer::Asr => self.asr,
            CanonicalPrayer::Maghrib => self.maghrib,
            CanonicalPrayer::Isha => self.isha,
        }
    }

    pub fn time_of_event(&self, event: PrayerEvent) -> ClockTime {
        match event {
            PrayerEvent::Prayer(p) => self.time_of(p),
            PrayerEvent::Sunrise => self.sunrise,
        }
    }

    /// Canonical prayers with their times, in scan order.
    pub fn canonical(&self) -> [(CanonicalPrayer, ClockTime); 5] {
        CanonicalPrayer::ALL.map(|p| (p, self.time_of(p)))
    }

    /// False when the day wraps past midnight (e.g. Isha after 00:00 at
    /// high latitudes). Such sets are kept but not reordered.
    pub fn is_monotonic(&self) -> bool {
        let events = PrayerEvent::ALL.map(|e| self.time_of_event(e));
        events.windows(2).all(|w| w[0] <= w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn clock_time_formats_with_padding() {
        assert_eq!(ClockTime::new(5, 7).unwrap().to_string(), "05:07");
        assert_eq!(t("19:38").minutes_since_midnight(), 19 * 60 + 38);
        assert!(ClockTime::new(24, 0).is_err());
        assert!("7pm".parse::<ClockTime>().is_err());
    }

    #[test]
    fn clock_time_truncates_seconds() {
        let naive = NaiveTime::from_hms_opt(18, 22, 59).unwrap();
        assert_eq!(ClockTime::from_naive(naive), t("18:22"));
    }

    #[test]
    fn fallback_set_matches_published_defaults() {
        let set = PrayerTimeSet::fallback();
        assert_eq!(set.fajr, t("05:12"));
        assert_eq!(set.sunrise, t("06:34"));
        assert_eq!(set.dhuhr, t("12:28"));
        assert_eq!(set.asr, t("15:42"));
        assert_eq!(set.maghrib, t("18:22"));
        assert_eq!(set.isha, t("19:38"));
        assert!(set.is_monotonic());
    }

    #[test]
    fn isha_after_midnight_is_not_monotonic() {
        let set = PrayerTimeSet {
            isha: t("00:45"),
            ..PrayerTimeSet::fallback()
        };
        assert!(!set.is_monotonic());
    }

    #[test]
    fn serializes_times_as_strings() {
        let json = serde_json::to_value(PrayerTimeSet::fallback()).unwrap();
        assert_eq!(json["maghrib"], "18:22");
        let back: PrayerTimeSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, PrayerTimeSet::fallback());
    }

    #[test]
    fn coordinate_range_checks() {
        assert!(Coordinate::new(21.4225, 39.8262).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::NAN).is_valid());
    }
}
