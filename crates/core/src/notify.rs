//! User-facing notifications (toasts).

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Fire-and-forget sink for notifications. No return value, no delivery
/// guarantee.
pub trait Notifier {
    fn show_notification(&self, message: &str, severity: Severity);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// Bounded queue of visible notifications, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    next_id: u64,
    capacity: usize,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::with_capacity(4)
    }
}

impl NotificationQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            next_id: 1,
            capacity: capacity.max(1),
        }
    }

    /// Add a notification, evicting the oldest ones past capacity.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push_back(Notification {
            id,
            message: message.into(),
            severity,
        });
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
        id
    }

    /// Returns false if the notification was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut queue = NotificationQueue::with_capacity(2);
        let first = queue.push("one", Severity::Info);
        queue.push("two", Severity::Info);
        queue.push("three", Severity::Warning);

        let messages: Vec<_> = queue.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert!(!queue.dismiss(first));
    }

    #[test]
    fn dismiss_removes_by_id() {
        let mut queue = NotificationQueue::default();
        let a = queue.push("a", Severity::Info);
        let b = queue.push("b", Severity::Success);
        assert!(queue.dismiss(a));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().map(|n| n.id), Some(b));
    }
}
