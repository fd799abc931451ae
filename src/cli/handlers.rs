use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::sync::Arc;

use crate::alerts::{Alerter, AudioCue, BellCue, CommandCue, CommandNotifier, ConsoleNotifier, Notifier};
use crate::cli::args::ConfigCommands;
use crate::config::{AppConfig, LocationSource, NotifierKind};
use crate::engine::{Session, SystemClock, TimingSource, Watcher};
use crate::location::{FileLocation, FixedLocation, LocationProvider};
use crate::models::{ClockTime, Coordinate, PrayerEvent, PrayerTimeSet};
use crate::prayer_times::{SalahProvider, CONVENTION};
use crate::utils::format::format_countdown;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Wiring ──────────────────────────────────────────────────────────────────

pub fn locator(config: &AppConfig) -> Arc<dyn LocationProvider> {
    match (config.location.source, &config.location.fix_path) {
        (LocationSource::File, Some(path)) => Arc::new(FileLocation::new(path.clone())),
        _ => Arc::new(FixedLocation::new(config.location.coordinate())),
    }
}

pub fn alerter(config: &AppConfig) -> Alerter {
    let notifier: Box<dyn Notifier> = match config.alerts.notifier {
        NotifierKind::Console => Box::new(ConsoleNotifier),
        NotifierKind::Desktop => Box::new(CommandNotifier::default()),
    };
    let audio: Box<dyn AudioCue> = match &config.alerts.sound_command {
        Some(argv) => Box::new(CommandCue::new(argv.clone())),
        None => Box::new(BellCue),
    };
    Alerter::new(notifier, audio)
}

/// One-shot location + computation; degrades to the static set exactly as
/// the watcher does.
fn session_for(config: &AppConfig, date: NaiveDate) -> Result<Session> {
    let provider = SalahProvider::new(config.location.timezone_offset)?;
    let mut session = Session::new(config.alerts.enabled);
    session.on_location(locator(config).locate(), &provider, date);
    Ok(session)
}

// ─── Times ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TimesReport<'a> {
    date: NaiveDate,
    convention: String,
    coordinate: Option<Coordinate>,
    fallback: bool,
    times: &'a PrayerTimeSet,
}

pub fn handle_times(config: &AppConfig, date: Option<NaiveDate>, json: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let date = date.unwrap_or(today);
    let session = session_for(config, date)?;
    let Some(times) = session.times() else {
        bail!("No prayer times available");
    };
    let fallback = session.cache().source() == Some(TimingSource::Fallback);

    if json {
        let report = TimesReport {
            date,
            convention: CONVENTION.to_string(),
            coordinate: session.cache().coordinate(),
            fallback,
            times,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let place = match session.cache().coordinate() {
        Some(c) => c.to_string(),
        None => "default times".to_string(),
    };

    println!();
    println_colored!(GOLD, "  Prayer Times — {} ({})", place, date.format("%Y-%m-%d"));
    if fallback {
        println_colored!(DIM, "  Location unavailable, showing default times");
    }
    println!();

    let now = Local::now().time();
    let now_clock = ClockTime::from_naive(now);
    for event in PrayerEvent::ALL {
        let time = times.time_of_event(event);
        let is_past = date < today || (date == today && time < now_clock);
        if is_past {
            println_colored!(DIM, "  {:<10}  {}", event.display_name(), time);
        } else {
            println_colored!(BOLD, "  {:<10}  {}", event.display_name(), time);
        }
    }

    if date == today {
        if let Some(next) = session.next_prayer(now) {
            println!();
            println_colored!(
                AMBER,
                "  Next: {} in {}",
                next.prayer.display_name(),
                format_countdown(next.hours, next.minutes)
            );
        }
    }
    println!();
    Ok(())
}

// ─── Next ────────────────────────────────────────────────────────────────────

pub fn handle_next(config: &AppConfig) -> Result<()> {
    let now = Local::now();
    let session = session_for(config, now.date_naive())?;
    match session.next_prayer(now.time()) {
        Some(next) => println!(
            "{} at {} (in {})",
            next.prayer.display_name(),
            next.time,
            format_countdown(next.hours, next.minutes)
        ),
        None => bail!("No prayer times available"),
    }
    Ok(())
}

// ─── Watch ───────────────────────────────────────────────────────────────────

pub fn handle_watch(config: &AppConfig) -> Result<()> {
    let session = Session::new(config.alerts.enabled);
    if !session.alerts_enabled() {
        println_colored!(DIM, "  Alerts are disabled in config; showing countdown only");
    }
    let provider = SalahProvider::new(config.location.timezone_offset)?;
    let mut watcher = Watcher::new(
        session,
        Box::new(provider),
        locator(config),
        alerter(config),
        SystemClock,
    );
    watcher.run(config.schedule.intervals())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigCommands::Init { force } => {
            let path = AppConfig::config_path()?;
            if path.exists() && !force {
                println!("Config already exists at {}. Use --force to overwrite.", path.display());
                return Ok(());
            }
            AppConfig::default().save()?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
