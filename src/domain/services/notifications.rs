#[cfg(test)]
#[path = "notifications_test.rs"]
mod tests;

use std::time::Duration;

use crate::domain::models::Notification;

/// Transient toasts. Each one lives for `timeout` and is then pruned on the
/// next tick.
pub struct Notifications {
    items: Vec<Notification>,
    timeout: Duration,
}

impl Notifications {
    pub fn new(timeout: Duration) -> Notifications {
        return Notifications {
            items: vec![],
            timeout,
        };
    }

    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(level = ?notification.level, text = %notification.text, "notification");
        self.items.push(notification);
    }

    pub fn success(&mut self, text: &str) {
        self.push(Notification::success(text));
    }

    pub fn info(&mut self, text: &str) {
        self.push(Notification::info(text));
    }

    pub fn error(&mut self, text: &str) {
        self.push(Notification::error(text));
    }

    pub fn prune(&mut self) {
        let timeout = self.timeout;
        self.items.retain(|item| return !item.is_expired(timeout));
    }

    pub fn latest(&self) -> Option<&Notification> {
        return self.items.last();
    }
}
