use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::models::{Notification, Severity};

pub const DISPLAY_DURATION: Duration = Duration::from_secs(5);

/// Holds the single active notification together with its auto-dismiss
/// timer. Showing a new notification supersedes the old one and cancels its
/// timer before the replacement is installed, so at most one timer is ever
/// live.
pub struct NotificationCenter {
    current: Arc<Mutex<Option<Notification>>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    ttl: Duration,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            timer: Mutex::new(None),
            ttl,
        }
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        let note = Notification {
            message: message.into(),
            severity,
        };
        tracing::debug!(severity = severity.as_str(), message = %note.message, "notification");

        let mut timer = self.timer.lock().unwrap();
        if let Some(handle) = timer.take() {
            handle.abort();
        }
        *self.current.lock().unwrap() = Some(note);

        let slot = Arc::clone(&self.current);
        let ttl = self.ttl;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            slot.lock().unwrap().take();
        }));
    }

    pub fn dismiss(&self) {
        let mut timer = self.timer.lock().unwrap();
        if let Some(handle) = timer.take() {
            handle.abort();
        }
        self.current.lock().unwrap().take();
    }

    pub fn current(&self) -> Option<Notification> {
        self.current.lock().unwrap().clone()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DISPLAY_DURATION)
    }
}
