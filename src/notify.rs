//! User-facing notifications (toasts) emitted by the form controllers.

use crate::types::NotificationKind;

/// One toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Success or error styling.
    pub kind: NotificationKind,
    /// Text shown to the user.
    pub message: String,
}

impl Notification {
    /// Success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// Error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Sink for notifications; the page shows them as toasts.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Keeps every notification in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub seen: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.seen.last()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.seen.iter().map(|n| n.message.as_str()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.seen.push(notification);
    }
}
