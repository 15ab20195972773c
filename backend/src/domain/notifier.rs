//! User-visible notifications raised by domain operations.

use shared::{Notification, NotificationKind};
#[cfg(test)]
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

pub const TRANSACTION_SUCCESS_MESSAGE: &str = "Transaction successful!";
pub const TRANSACTION_FAILED_MESSAGE: &str = "Transaction failed. Please try again.";
pub const TRANSACTION_ERROR_MESSAGE: &str = "An error occurred during the transaction.";
pub const SUBMISSION_IN_PROGRESS_MESSAGE: &str = "A transaction is already in progress.";
pub const REPORT_DOWNLOADED_MESSAGE: &str = "Report downloaded successfully!";
pub const REPORT_FAILED_MESSAGE: &str = "Failed to download report.";

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success | NotificationKind::Info => {
                info!("[NOTIFY] {}", notification.message)
            }
            NotificationKind::Warning => warn!("[NOTIFY] {}", notification.message),
            NotificationKind::Error => error!("[NOTIFY] {}", notification.message),
        }
    }
}

/// Keeps every notification in memory
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications raised so far, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|notifications| notifications.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::success("one"));
        notifier.notify(Notification::error("two"));

        let recorded = notifier.notifications();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].kind, NotificationKind::Success);
        assert_eq!(recorded[1].message, "two");
    }

    #[test]
    fn test_clones_share_history() {
        let notifier = RecordingNotifier::new();
        let clone = notifier.clone();
        clone.notify(Notification::success("shared"));
        assert_eq!(notifier.notifications().len(), 1);
    }
}
