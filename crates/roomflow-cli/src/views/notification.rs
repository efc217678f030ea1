use std::fmt;

use chrono::NaiveDateTime;
use roomflow_engine::format::{NOT_AVAILABLE, badge_label, relative_time};
use roomflow_types::NotificationResponse;

pub struct NotificationListView<'a> {
    notifications: &'a [NotificationResponse],
    now: NaiveDateTime,
}

impl<'a> NotificationListView<'a> {
    pub fn new(notifications: &'a [NotificationResponse], now: NaiveDateTime) -> Self {
        Self { notifications, now }
    }
}

impl fmt::Display for NotificationListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.notifications.is_empty() {
            return writeln!(f, "No notifications.");
        }

        for n in self.notifications {
            let marker = if n.is_unread() { "*" } else { " " };
            let when = n
                .created_at()
                .map(|then| relative_time(then, self.now))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            writeln!(f, "{} #{:<5} {}  ({})", marker, n.notification_id, n.title, when)?;
            if !n.message.is_empty() {
                writeln!(f, "         {}", n.message)?;
            }
        }
        Ok(())
    }
}

/// Unread count with its badge text.
pub struct UnreadCountView {
    pub count: u64,
}

impl fmt::Display for UnreadCountView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match badge_label(self.count) {
            Some(label) => writeln!(f, "Unread notifications: {}", label),
            None => writeln!(f, "No unread notifications."),
        }
    }
}
