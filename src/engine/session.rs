use chrono::{NaiveDate, NaiveTime};
use log::{info, warn};

use crate::alerts::{AlarmKey, AlarmMatcher, Alerter};
use crate::engine::cache::TimingCache;
use crate::location::LocationError;
use crate::models::{Coordinate, PrayerTimeSet};
use crate::prayer_times::{resolve_next, NextPrayer, TimeProvider, CONVENTION};

/// All mutable state shared by the periodic tasks: the timing cache, the
/// alarm memo and the alert setting. Owned by one thread.
pub struct Session {
    cache: TimingCache,
    matcher: AlarmMatcher,
    alerts_enabled: bool,
}

impl Session {
    pub fn new(alerts_enabled: bool) -> Self {
        Self::with_cache(TimingCache::seeded(), alerts_enabled)
    }

    pub fn with_cache(cache: TimingCache, alerts_enabled: bool) -> Self {
        Self {
            cache,
            matcher: AlarmMatcher::new(),
            alerts_enabled,
        }
    }

    pub fn cache(&self) -> &TimingCache {
        &self.cache
    }

    pub fn times(&self) -> Option<&PrayerTimeSet> {
        self.cache.times()
    }

    pub fn alerts_enabled(&self) -> bool {
        self.alerts_enabled
    }

    pub fn last_alert(&self) -> Option<AlarmKey> {
        self.matcher.memo()
    }

    /// Outcome of one location acquisition. A fix recomputes and swaps the
    /// cache; any failure keeps whatever is cached. Returns whether the
    /// cache was replaced.
    pub fn on_location(
        &mut self,
        fix: Result<Coordinate, LocationError>,
        provider: &dyn TimeProvider,
        date: NaiveDate,
    ) -> bool {
        let coordinate = match fix {
            Ok(c) => c,
            Err(e) => {
                warn!("{}; keeping current prayer times", e);
                return false;
            }
        };

        match provider.compute_times(&coordinate, date, CONVENTION) {
            Ok(times) => {
                if !times.is_monotonic() {
                    warn!(
                        "Prayer times for {} on {} wrap past midnight; countdown may be off",
                        coordinate, date
                    );
                }
                info!(
                    "Prayer times for {} on {}: fajr {} dhuhr {} asr {} maghrib {} isha {}",
                    coordinate, date, times.fajr, times.dhuhr, times.asr, times.maghrib, times.isha
                );
                self.cache.replace(times, coordinate, date);
                true
            }
            Err(e) => {
                warn!("{:#}; keeping current prayer times", e);
                false
            }
        }
    }

    pub fn next_prayer(&self, now: NaiveTime) -> Option<NextPrayer> {
        self.cache.times().map(|times| resolve_next(times, now))
    }

    /// One alarm tick. Fires through `alerter` at most once per
    /// (prayer, time) key.
    pub fn poll_alarm(&mut self, now: NaiveTime, alerter: &mut Alerter) -> Option<AlarmKey> {
        let key = self
            .matcher
            .check(now, self.cache.times(), self.alerts_enabled)?;
        alerter.fire(&key);
        Some(key)
    }
}
