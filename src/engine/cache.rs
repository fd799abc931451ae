use chrono::NaiveDate;

use crate::models::{Coordinate, PrayerTimeSet};

/// Where the cached set came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingSource {
    /// Static default, nothing computed yet.
    Fallback,
    Computed {
        coordinate: Coordinate,
        date: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedTiming {
    pub times: PrayerTimeSet,
    pub source: TimingSource,
}

/// Holds the current day's times. Every update swaps the whole entry, so
/// readers see either the old set or the new one.
#[derive(Debug, Default)]
pub struct TimingCache {
    current: Option<CachedTiming>,
}

impl TimingCache {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pre-seeded with the static default set so there is always something
    /// to render before the first location fix.
    pub fn seeded() -> Self {
        Self {
            current: Some(CachedTiming {
                times: PrayerTimeSet::fallback(),
                source: TimingSource::Fallback,
            }),
        }
    }

    pub fn times(&self) -> Option<&PrayerTimeSet> {
        self.current.as_ref().map(|c| &c.times)
    }

    pub fn source(&self) -> Option<TimingSource> {
        self.current.as_ref().map(|c| c.source)
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match self.source()? {
            TimingSource::Computed { coordinate, .. } => Some(coordinate),
            TimingSource::Fallback => None,
        }
    }

    pub fn replace(&mut self, times: PrayerTimeSet, coordinate: Coordinate, date: NaiveDate) {
        self.current = Some(CachedTiming {
            times,
            source: TimingSource::Computed { coordinate, date },
        });
    }
}
