use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Displays short-lived messages. Callers never wait on or inspect the result.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub expires_at: Instant,
}

/// Notifier backing the terminal toast area. Keeps the newest few toasts.
#[derive(Debug)]
pub struct ToastQueue {
    ttl: Duration,
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        ToastQueue {
            ttl,
            toasts: VecDeque::new(),
        }
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            notification,
            expires_at: now + self.ttl,
        });
    }

    /// Drops expired toasts. Returns true when anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        before != self.toasts.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        info!(title = %notification.title, description = %notification.description, "notify");
        self.push_at(notification, Instant::now());
    }
}

/// Collects notifications in memory instead of displaying them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub received: Vec<Notification>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.received.push(notification);
    }
}
