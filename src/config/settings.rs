use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::Intervals;
use crate::models::Coordinate;

fn default_true() -> bool {
    true
}
fn default_refresh_minutes() -> u64 {
    30
}
fn default_poll_seconds() -> u64 {
    30
}
fn default_clock_seconds() -> u64 {
    60
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// `latitude`/`longitude` below.
    #[default]
    Fixed,
    /// Latest fix read from `fix_path` on every refresh.
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationConfig {
    #[serde(default)]
    pub source: LocationSource,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub fix_path: Option<PathBuf>,
    /// Minutes from UTC; unset follows the system zone.
    #[serde(default)]
    pub timezone_offset: Option<i32>,
}

impl LocationConfig {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    #[default]
    Console,
    Desktop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub notifier: NotifierKind,
    /// Player argv, e.g. ["paplay", "/usr/share/sounds/adhan.ogg"].
    /// Unset rings the terminal bell.
    #[serde(default)]
    pub sound_command: Option<Vec<String>>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            notifier: NotifierKind::default(),
            sound_command: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u64,
    #[serde(default = "default_poll_seconds")]
    pub poll_seconds: u64,
    #[serde(default = "default_clock_seconds")]
    pub clock_seconds: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            refresh_minutes: default_refresh_minutes(),
            poll_seconds: default_poll_seconds(),
            clock_seconds: default_clock_seconds(),
        }
    }
}

impl ScheduleConfig {
    pub fn intervals(&self) -> Intervals {
        Intervals {
            refresh: Duration::from_secs(self.refresh_minutes * 60),
            alarm_poll: Duration::from_secs(self.poll_seconds),
            clock_tick: Duration::from_secs(self.clock_seconds),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "miqat").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_path()?)
    }

    /// Missing file means defaults; a present but invalid file is an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        config
            .validate()
            .with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let loc = &self.location;
        match (loc.latitude, loc.longitude) {
            (Some(_), None) | (None, Some(_)) => {
                bail!("location.latitude and location.longitude must be set together")
            }
            _ => {}
        }
        if let Some(c) = loc.coordinate() {
            if !c.is_valid() {
                bail!("location coordinate out of range: {}", c);
            }
        }
        if loc.source == LocationSource::File && loc.fix_path.is_none() {
            bail!("location.source = \"file\" needs location.fix_path");
        }
        if let Some(offset) = loc.timezone_offset {
            if offset.abs() > 14 * 60 {
                bail!("location.timezone_offset {} is beyond ±14h", offset);
            }
        }
        if let Some(argv) = &self.alerts.sound_command {
            if argv.is_empty() {
                bail!("alerts.sound_command must name a program");
            }
        }

        let sched = &self.schedule;
        if sched.refresh_minutes == 0 {
            bail!("schedule.refresh_minutes must be at least 1");
        }
        // At 60 s one late tick can step over a whole matched minute
        if !(1..60).contains(&sched.poll_seconds) {
            bail!("schedule.poll_seconds must be between 1 and 59");
        }
        if sched.clock_seconds == 0 {
            bail!("schedule.clock_seconds must be at least 1");
        }
        Ok(())
    }
}
