use std::io::Write;
use std::process::{Command, Stdio};

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// The platform would not let us play (no player, no device, policy).
    #[error("audio playback blocked: {0}")]
    PlaybackBlocked(String),

    #[error("audio I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Short sound played with every alert.
pub trait AudioCue {
    fn play(&mut self) -> Result<(), AudioError>;
}

/// Terminal bell.
pub struct BellCue;

impl AudioCue for BellCue {
    fn play(&mut self) -> Result<(), AudioError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// Spawns a player, e.g. `["paplay", "/usr/share/sounds/adhan.ogg"]`.
/// Does not wait for playback to finish.
pub struct CommandCue {
    argv: Vec<String>,
}

impl CommandCue {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl AudioCue for CommandCue {
    fn play(&mut self) -> Result<(), AudioError> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| AudioError::PlaybackBlocked("empty sound command".to_string()))?;
        let mut child = Command::new(program)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AudioError::PlaybackBlocked(format!("{}: {}", program, e)))?;
        // reap in the background
        std::thread::spawn(move || child.wait());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_blocked() {
        let mut cue = CommandCue::new(vec![]);
        assert!(matches!(cue.play(), Err(AudioError::PlaybackBlocked(_))));
    }

    #[test]
    fn missing_player_is_blocked() {
        let mut cue = CommandCue::new(vec!["/nonexistent/player".to_string()]);
        assert!(matches!(cue.play(), Err(AudioError::PlaybackBlocked(_))));
    }
}
