//! Toast notifications.

use alm_core::{NotificationQueue, Notifier, Severity};
use dioxus::prelude::*;

use crate::config::client_config;

pub static NOTIFICATIONS: GlobalSignal<NotificationQueue> =
    Signal::global(|| NotificationQueue::with_capacity(client_config().max_notifications));

/// [`Notifier`] that pushes onto [`NOTIFICATIONS`]; the toaster renders and
/// expires them.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalNotifier;

impl Notifier for GlobalNotifier {
    fn show_notification(&self, message: &str, severity: Severity) {
        notify(message, severity);
    }
}

pub fn notify(message: impl Into<String>, severity: Severity) -> u64 {
    NOTIFICATIONS.write().push(message, severity)
}

pub fn dismiss(id: u64) {
    NOTIFICATIONS.write().dismiss(id);
}
