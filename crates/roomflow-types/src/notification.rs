use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::date::{parse_wire_timestamp, CalendarDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    BookingSuccess,
    BookingCancelled,
    System,
    PaymentSuccess,
    PaymentFailed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Unread,
    Read,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification_id: u64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub booking_id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub message: String,
    pub status: NotificationStatus,
    pub created_at: Option<serde_json::Value>,
    pub room_name: Option<String>,
    pub hotel_name: Option<String>,
    #[serde(default, with = "crate::date::lenient")]
    pub check_in: Option<CalendarDate>,
    #[serde(default, with = "crate::date::lenient")]
    pub check_out: Option<CalendarDate>,
}

impl NotificationResponse {
    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Unread
    }

    pub fn created_at(&self) -> Option<NaiveDateTime> {
        self.created_at.as_ref().and_then(parse_wire_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_decodes_backend_shape() {
        let json = r#"{
            "notificationId": 12,
            "type": "BOOKING_SUCCESS",
            "bookingId": 7,
            "title": "Booking Confirmed!",
            "message": "Your booking has been confirmed successfully.",
            "status": "UNREAD",
            "createdAt": [2024, 5, 1, 9, 15, 30],
            "checkIn": "2024-05-10",
            "checkOut": "2024-05-12"
        }"#;
        let notification: NotificationResponse = serde_json::from_str(json).unwrap();
        assert!(notification.is_unread());
        assert_eq!(notification.kind, NotificationType::BookingSuccess);
        assert_eq!(
            notification.created_at().unwrap().to_string(),
            "2024-05-01 09:15:30"
        );
        assert_eq!(notification.check_out, CalendarDate::from_ymd(2024, 5, 12));
    }
}
