use log::warn;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::location::LocationError;
use crate::models::Coordinate;

#[derive(Debug)]
pub enum Event {
    /// Time to acquire a location and recompute.
    Refresh,
    /// Alarm poll tick.
    AlarmPoll,
    /// Display tick.
    ClockTick,
    /// A location request finished.
    Located(Result<Coordinate, LocationError>),
}

#[derive(Debug, Clone, Copy)]
pub struct Intervals {
    pub refresh: Duration,
    pub alarm_poll: Duration,
    pub clock_tick: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            refresh: Duration::from_secs(30 * 60),
            alarm_poll: Duration::from_secs(30),
            clock_tick: Duration::from_secs(60),
        }
    }
}

struct Periodic {
    period: Duration,
    next_due: Instant,
    make: fn() -> Event,
}

/// Drives the three periodic tasks from a ticker thread. Every task fires
/// once immediately, then on its own period. The ticker is stopped and
/// joined by `shutdown`, or when this handler is dropped.
pub struct EventHandler {
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
    stop: Arc<AtomicBool>,
    ticker: Option<thread::JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(intervals: Intervals) -> Self {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let ticker_tx = tx.clone();
        let ticker_stop = stop.clone();
        let ticker = thread::spawn(move || {
            let start = Instant::now();
            let mut tasks = [
                Periodic {
                    period: intervals.refresh,
                    next_due: start,
                    make: || Event::Refresh,
                },
                Periodic {
                    period: intervals.alarm_poll,
                    next_due: start,
                    make: || Event::AlarmPoll,
                },
                Periodic {
                    period: intervals.clock_tick,
                    next_due: start,
                    make: || Event::ClockTick,
                },
            ];

            while !ticker_stop.load(Ordering::Relaxed) {
                let now = Instant::now();
                for task in tasks.iter_mut().filter(|t| t.next_due <= now) {
                    if ticker_tx.send((task.make)()).is_err() {
                        return;
                    }
                    task.next_due += task.period;
                    // Skip missed periods after a suspend instead of bursting
                    if task.next_due <= now {
                        task.next_due = now + task.period;
                    }
                }

                let next = tasks
                    .iter()
                    .map(|t| t.next_due)
                    .min()
                    .unwrap_or(now + Duration::from_secs(1));
                // Short naps so a drop is noticed promptly
                let wait = next
                    .saturating_duration_since(Instant::now())
                    .min(Duration::from_millis(500));
                thread::sleep(wait);
            }
        });

        Self {
            tx,
            rx,
            stop,
            ticker: Some(ticker),
        }
    }

    /// Sender for results of off-thread work (location requests).
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }

    /// Stops the ticker and waits for it. Senders handed out earlier stay
    /// valid, but no further periodic events are produced.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(ticker) = self.ticker.take() {
            if ticker.join().is_err() {
                warn!("Event ticker panicked");
            }
        }
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
