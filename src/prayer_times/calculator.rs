use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use salah::prelude::*;

use crate::models::{ClockTime, Coordinate, PrayerTimeSet};

/// Named astronomical method used to derive times from solar position.
/// The engine always uses a single fixed convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    MuslimWorldLeague,
}

impl Convention {
    fn method(&self) -> Method {
        match self {
            Convention::MuslimWorldLeague => Method::MuslimWorldLeague,
        }
    }

    fn madhab(&self) -> Madhab {
        match self {
            Convention::MuslimWorldLeague => Madhab::Shafi,
        }
    }
}

impl std::fmt::Display for Convention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Convention::MuslimWorldLeague => write!(f, "Muslim World League"),
        }
    }
}

pub const CONVENTION: Convention = Convention::MuslimWorldLeague;

/// Source of the six daily event times. Must be deterministic for a given
/// (coordinate, date, convention).
pub trait TimeProvider {
    fn compute_times(
        &self,
        coordinate: &Coordinate,
        date: NaiveDate,
        convention: Convention,
    ) -> Result<PrayerTimeSet>;
}

/// Offline provider backed by the `salah` crate.
pub struct SalahProvider {
    /// Minutes east of UTC; `None` uses the system local zone.
    pub tz_offset_minutes: Option<i32>,
}

impl SalahProvider {
    pub fn new(tz_offset_minutes: Option<i32>) -> Result<Self> {
        if let Some(mins) = tz_offset_minutes {
            FixedOffset::east_opt(mins * 60)
                .ok_or_else(|| anyhow!("Invalid timezone offset: {}", mins))?;
        }
        Ok(Self { tz_offset_minutes })
    }

    fn to_local(&self, utc: DateTime<Utc>) -> Result<ClockTime> {
        let local = match self.tz_offset_minutes {
            Some(mins) => {
                let offset = FixedOffset::east_opt(mins * 60)
                    .ok_or_else(|| anyhow!("Invalid timezone offset: {}", mins))?;
                utc.with_timezone(&offset).time()
            }
            None => utc.with_timezone(&Local).time(),
        };
        Ok(ClockTime::from_naive(local))
    }
}

impl TimeProvider for SalahProvider {
    fn compute_times(
        &self,
        coordinate: &Coordinate,
        date: NaiveDate,
        convention: Convention,
    ) -> Result<PrayerTimeSet> {
        let coords = Coordinates::new(coordinate.latitude, coordinate.longitude);
        let params = Configuration::with(convention.method(), convention.madhab());

        let times = PrayerSchedule::new()
            .on(date)
            .for_location(coords)
            .with_configuration(params)
            .calculate()
            .map_err(|e| anyhow!("Prayer calculation failed: {}", e))?;

        Ok(PrayerTimeSet {
            fajr: self.to_local(times.time(Prayer::Fajr))?,
            sunrise: self.to_local(times.time(Prayer::Sunrise))?,
            dhuhr: self.to_local(times.time(Prayer::Dhuhr))?,
            asr: self.to_local(times.time(Prayer::Asr))?,
            maghrib: self.to_local(times.time(Prayer::Maghrib))?,
            isha: self.to_local(times.time(Prayer::Isha))?,
        })
    }
}
