use anyhow::Result;
use log::{debug, info};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use crate::alerts::Alerter;
use crate::engine::clock::Clock;
use crate::engine::events::{Event, EventHandler, Intervals};
use crate::engine::session::Session;
use crate::location::LocationProvider;
use crate::prayer_times::{NextPrayer, TimeProvider};
use crate::utils::format::format_countdown;

/// Long-running loop: owns the session and applies every periodic task to
/// it on a single thread.
pub struct Watcher<C: Clock> {
    session: Session,
    provider: Box<dyn TimeProvider>,
    locator: Arc<dyn LocationProvider>,
    alerter: Alerter,
    clock: C,
    last_status: Option<NextPrayer>,
}

impl<C: Clock> Watcher<C> {
    pub fn new(
        session: Session,
        provider: Box<dyn TimeProvider>,
        locator: Arc<dyn LocationProvider>,
        alerter: Alerter,
        clock: C,
    ) -> Self {
        Self {
            session,
            provider,
            locator,
            alerter,
            clock,
            last_status: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run(&mut self, intervals: Intervals) -> Result<()> {
        info!(
            "Watching prayer times (refresh {:?}, poll {:?})",
            intervals.refresh, intervals.alarm_poll
        );
        let events = EventHandler::new(intervals);
        let tx = events.sender();
        while let Ok(event) = events.next() {
            self.handle(event, &tx);
        }
        Ok(())
    }

    pub fn handle(&mut self, event: Event, tx: &Sender<Event>) {
        match event {
            Event::Refresh => self.request_location(tx),
            Event::Located(fix) => {
                let today = self.clock.now().date();
                if self.session.on_location(fix, self.provider.as_ref(), today) {
                    self.print_status(true);
                }
            }
            Event::AlarmPoll => {
                let now = self.clock.now().time();
                self.session.poll_alarm(now, &mut self.alerter);
            }
            Event::ClockTick => self.print_status(false),
        }
    }

    /// Fire-and-forget; a slow request may still land after a newer one,
    /// in which case the later arrival wins.
    fn request_location(&self, tx: &Sender<Event>) {
        debug!("Requesting location");
        let locator = self.locator.clone();
        let tx = tx.clone();
        thread::spawn(move || {
            let fix = locator.locate();
            let _ = tx.send(Event::Located(fix));
        });
    }

    fn print_status(&mut self, force: bool) {
        let now = self.clock.now().time();
        let Some(next) = self.session.next_prayer(now) else {
            return;
        };
        if force || self.last_status != Some(next) {
            println!(
                "  {}  next: {} at {} (in {})",
                now.format("%H:%M"),
                next.prayer.display_name(),
                next.time,
                format_countdown(next.hours, next.minutes)
            );
            self.last_status = Some(next);
        }
    }
}
