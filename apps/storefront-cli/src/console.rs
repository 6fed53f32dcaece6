//! Console rendering: notifications as prefixed lines on stdout/stderr.

use storefront_client::Notifier;
use storefront_core::{Notification, NotificationKind};

/// Prints notifications the way a toast would show them.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => println!("✔ {}", notification.message),
            NotificationKind::Error => eprintln!("✖ {}", notification.message),
        }
    }
}
