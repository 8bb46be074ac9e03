use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Visual weight of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Destructive,
}

/// A transient message shown in the corner of the screen
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title, description)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, description)
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Destructive, title, description)
    }
}

/// Toasts waiting to expire, oldest first
#[derive(Debug)]
pub struct Notifications {
    queue: VecDeque<Notification>,
    ttl: Duration,
    limit: usize,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            ttl,
            limit: 3,
        }
    }

    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(title = %notification.title, "notification raised");
        self.queue.push_back(notification);
        while self.queue.len() > self.limit {
            self.queue.pop_front();
        }
    }

    /// Drop every toast older than the time to live.
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.queue
            .retain(|n| now.saturating_duration_since(n.created_at) < ttl);
    }

    pub fn dismiss_all(&mut self) {
        self.queue.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
