use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{mpsc, Arc, Mutex};

use miqat::alerts::{Alerter, AudioCue, AudioError, Notifier, NotifyError, Permission};
use miqat::engine::events::Event;
use miqat::engine::{Clock, Session, Watcher};
use miqat::location::{LocationError, LocationProvider};
use miqat::models::{CanonicalPrayer, ClockTime, Coordinate, PrayerTimeSet};
use miqat::prayer_times::{resolve_next, Convention, TimeProvider};

struct TestClock(Cell<NaiveDateTime>);

impl TestClock {
    fn at(h: u32, m: u32, s: u32) -> Self {
        let now = NaiveDate::from_ymd_opt(2025, 2, 20)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap();
        Self(Cell::new(now))
    }

    fn set(&self, h: u32, m: u32, s: u32) {
        self.0.set(self.0.get().date().and_hms_opt(h, m, s).unwrap());
    }
}

impl Clock for TestClock {
    fn now(&self) -> NaiveDateTime {
        self.0.get()
    }
}

/// Location that can be switched between a fix and a failure mid-test.
struct ScriptedLocation(Mutex<Result<Coordinate, ()>>);

impl LocationProvider for ScriptedLocation {
    fn locate(&self) -> Result<Coordinate, LocationError> {
        match *self.0.lock().unwrap() {
            Ok(c) => Ok(c),
            Err(()) => Err(LocationError::PermissionDenied),
        }
    }
}

/// Maghrib later the further west the coordinate is.
struct ByLongitude;

impl TimeProvider for ByLongitude {
    fn compute_times(
        &self,
        coordinate: &Coordinate,
        _date: NaiveDate,
        _convention: Convention,
    ) -> Result<PrayerTimeSet> {
        let shift = (75.0 - coordinate.longitude).max(0.0) as u8;
        Ok(PrayerTimeSet {
            maghrib: ClockTime::new(18, 22 + shift)?,
            ..PrayerTimeSet::fallback()
        })
    }
}

#[derive(Default)]
struct Shown(Vec<String>);

struct RecordingNotifier(Rc<RefCell<Shown>>);

impl Notifier for RecordingNotifier {
    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn request_permission(&mut self) -> Permission {
        Permission::Granted
    }

    fn show(&mut self, _title: &str, body: &str) -> Result<(), NotifyError> {
        self.0.borrow_mut().0.push(body.to_string());
        Ok(())
    }
}

struct MutedAudio;

impl AudioCue for MutedAudio {
    fn play(&mut self) -> Result<(), AudioError> {
        Err(AudioError::PlaybackBlocked("no user gesture yet".to_string()))
    }
}

fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

fn deliver_refresh<C: Clock>(watcher: &mut Watcher<C>) {
    let (tx, rx) = mpsc::channel();
    watcher.handle(Event::Refresh, &tx);
    let located = rx.recv().unwrap();
    watcher.handle(located, &tx);
}

#[test]
fn resolver_examples() {
    let set = PrayerTimeSet {
        fajr: t("05:00"),
        sunrise: t("06:15"),
        dhuhr: t("12:00"),
        asr: t("15:00"),
        maghrib: t("18:00"),
        isha: t("19:00"),
    };

    let next = resolve_next(&set, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
    assert_eq!(next.prayer, CanonicalPrayer::Fajr);
    assert_eq!(next.hours * 60 + next.minutes, 5 * 60 + 1440 - 20 * 60);

    let next = resolve_next(&set, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
    assert_eq!(next.prayer, CanonicalPrayer::Maghrib);
    assert_eq!((next.hours, next.minutes), (3, 0));
}

#[test]
fn watcher_session_end_to_end() {
    let clock = TestClock::at(18, 21, 45);
    let shown = Rc::new(RefCell::new(Shown::default()));
    let location = Arc::new(ScriptedLocation(Mutex::new(Err(()))));

    let mut watcher = Watcher::new(
        Session::new(true),
        Box::new(ByLongitude),
        location.clone(),
        Alerter::new(Box::new(RecordingNotifier(shown.clone())), Box::new(MutedAudio)),
        &clock,
    );
    let (tx, _rx) = mpsc::channel();

    // No fix yet: fallback Maghrib at 18:22 drives both countdown and alarm
    deliver_refresh(&mut watcher);
    assert_eq!(watcher.session().times(), Some(&PrayerTimeSet::fallback()));
    let next = watcher
        .session()
        .next_prayer(clock.now().time())
        .unwrap();
    assert_eq!((next.prayer, next.hours, next.minutes), (CanonicalPrayer::Maghrib, 0, 1));

    for (h, m, s) in [(18, 21, 45), (18, 22, 15), (18, 22, 45), (18, 23, 15)] {
        clock.set(h, m, s);
        watcher.handle(Event::AlarmPoll, &tx);
    }
    assert_eq!(shown.borrow().0, vec!["It's time for Maghrib (18:22)".to_string()]);

    // Location arrives further west; Maghrib moves to 18:27 and alerts again
    *location.0.lock().unwrap() = Ok(Coordinate::new(33.7, 70.0));
    deliver_refresh(&mut watcher);
    assert_eq!(watcher.session().times().map(|s| s.maghrib), Some(t("18:27")));

    clock.set(18, 27, 0);
    watcher.handle(Event::AlarmPoll, &tx);
    clock.set(18, 27, 30);
    watcher.handle(Event::AlarmPoll, &tx);
    assert_eq!(shown.borrow().0.len(), 2);
    assert_eq!(shown.borrow().0[1], "It's time for Maghrib (18:27)");

    // Losing the fix again keeps the computed set
    *location.0.lock().unwrap() = Err(());
    deliver_refresh(&mut watcher);
    assert_eq!(watcher.session().times().map(|s| s.maghrib), Some(t("18:27")));
}
