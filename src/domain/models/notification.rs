use std::time::Duration;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
    created_at: Instant,
}

impl Notification {
    pub fn new(level: NotificationLevel, text: &str) -> Notification {
        return Notification {
            level,
            text: text.to_string(),
            created_at: Instant::now(),
        };
    }

    pub fn success(text: &str) -> Notification {
        return Notification::new(NotificationLevel::Success, text);
    }

    pub fn info(text: &str) -> Notification {
        return Notification::new(NotificationLevel::Info, text);
    }

    pub fn error(text: &str) -> Notification {
        return Notification::new(NotificationLevel::Error, text);
    }

    pub fn is_expired(&self, timeout: Duration) -> bool {
        return self.created_at.elapsed() >= timeout;
    }
}
