pub mod audio;
pub mod matcher;
pub mod notifier;

pub use audio::{AudioCue, AudioError, BellCue, CommandCue};
pub use matcher::{AlarmKey, AlarmMatcher};
pub use notifier::{CommandNotifier, ConsoleNotifier, Notifier, NotifyError, Permission};

use log::{info, warn};

pub const ALERT_TITLE: &str = "Prayer time";

pub fn alert_body(key: &AlarmKey) -> String {
    format!("It's time for {} ({})", key.prayer.display_name(), key.time)
}

/// Side effects of a matched alarm. Every failure is logged and dropped.
pub struct Alerter {
    notifier: Box<dyn Notifier>,
    audio: Box<dyn AudioCue>,
}

impl Alerter {
    pub fn new(notifier: Box<dyn Notifier>, audio: Box<dyn AudioCue>) -> Self {
        Self { notifier, audio }
    }

    pub fn fire(&mut self, key: &AlarmKey) {
        info!("Alert: {} at {}", key.prayer, key.time);
        let body = alert_body(key);

        let permission = match self.notifier.permission() {
            Permission::Default => self.notifier.request_permission(),
            p => p,
        };
        match permission {
            Permission::Granted => {
                if let Err(e) = self.notifier.show(ALERT_TITLE, &body) {
                    warn!("Notification not shown: {}", e);
                }
            }
            Permission::Denied | Permission::Default => {
                warn!("{}", NotifyError::PermissionDenied);
            }
        }

        // Audio goes out whatever happened to the notification
        if let Err(e) = self.audio.play() {
            warn!("Alert sound skipped: {}", e);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shared record of what the fake collaborators were asked to do.
    #[derive(Debug, Default)]
    pub struct Recorded {
        pub requests: usize,
        pub shown: Vec<(String, String)>,
        pub sounds: usize,
    }

    pub struct FakeNotifier {
        pub permission: Permission,
        pub grant_on_request: bool,
        pub log: Rc<RefCell<Recorded>>,
    }

    impl Notifier for FakeNotifier {
        fn permission(&self) -> Permission {
            self.permission
        }

        fn request_permission(&mut self) -> Permission {
            self.log.borrow_mut().requests += 1;
            self.permission = if self.grant_on_request {
                Permission::Granted
            } else {
                Permission::Denied
            };
            self.permission
        }

        fn show(&mut self, title: &str, body: &str) -> Result<(), NotifyError> {
            self.log
                .borrow_mut()
                .shown
                .push((title.to_string(), body.to_string()));
            Ok(())
        }
    }

    pub struct FakeAudio {
        pub blocked: bool,
        pub log: Rc<RefCell<Recorded>>,
    }

    impl AudioCue for FakeAudio {
        fn play(&mut self) -> Result<(), AudioError> {
            if self.blocked {
                return Err(AudioError::PlaybackBlocked("autoplay policy".to_string()));
            }
            self.log.borrow_mut().sounds += 1;
            Ok(())
        }
    }

    pub fn fake_alerter(
        permission: Permission,
        grant_on_request: bool,
        audio_blocked: bool,
    ) -> (Alerter, Rc<RefCell<Recorded>>) {
        let log = Rc::new(RefCell::new(Recorded::default()));
        let alerter = Alerter::new(
            Box::new(FakeNotifier {
                permission,
                grant_on_request,
                log: log.clone(),
            }),
            Box::new(FakeAudio {
                blocked: audio_blocked,
                log: log.clone(),
            }),
        );
        (alerter, log)
    }
}
