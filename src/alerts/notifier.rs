use log::debug;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// Not decided yet; ask before showing.
    Default,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification permission denied")]
    PermissionDenied,

    #[error("notification failed: {0}")]
    Failed(String),
}

pub trait Notifier {
    fn permission(&self) -> Permission;
    fn request_permission(&mut self) -> Permission;
    fn show(&mut self, title: &str, body: &str) -> Result<(), NotifyError>;
}

// ─── Console ─────────────────────────────────────────────────────────────────

const GOLD: &str = "\x1b[38;2;196;160;68m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Banner on stdout. A terminal never needs permission.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn request_permission(&mut self) -> Permission {
        Permission::Granted
    }

    fn show(&mut self, title: &str, body: &str) -> Result<(), NotifyError> {
        println!();
        println!("  {}{}🕌 {}{}", GOLD, BOLD, title, RESET);
        println!("  {}{}{}", BOLD, body, RESET);
        println!();
        Ok(())
    }
}

// ─── Desktop (notify-send) ───────────────────────────────────────────────────

/// Desktop notifications through `notify-send`. Permission stays undecided
/// until `--version` succeeds, so each alert checks again while the binary
/// is missing and a mid-session install takes effect at the next prayer.
pub struct CommandNotifier {
    program: String,
    permission: Permission,
}

impl CommandNotifier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            permission: Permission::Default,
        }
    }
}

impl Default for CommandNotifier {
    fn default() -> Self {
        Self::new("notify-send")
    }
}

impl Notifier for CommandNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        let available = Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if available {
            self.permission = Permission::Granted;
            debug!("{} found, notifications granted", self.program);
            Permission::Granted
        } else {
            debug!("{} not usable, will check again next alert", self.program);
            Permission::Denied
        }
    }

    fn show(&mut self, title: &str, body: &str) -> Result<(), NotifyError> {
        if self.permission != Permission::Granted {
            return Err(NotifyError::PermissionDenied);
        }
        let status = Command::new(&self.program)
            .args(["--app-name=miqat", title, body])
            .status()
            .map_err(|e| NotifyError::Failed(e.to_string()))?;
        if !status.success() {
            return Err(NotifyError::Failed(format!("{} exited with {}", self.program, status)));
        }
        Ok(())
    }
}
