//! Canned backend payloads, shaped like the real API returns them.

use serde_json::{Value, json};

pub const ACCESS_TOKEN: &str = "access-token-123";
pub const REFRESH_TOKEN: &str = "refresh-token-456";

/// Flat `auth/login` body.
pub fn login_response() -> Value {
    json!({
        "token": ACCESS_TOKEN,
        "refreshToken": REFRESH_TOKEN,
        "fullName": "Ana Nguyen",
        "email": "ana@example.com",
        "phone": "0912345678",
        "avatar": null
    })
}

pub fn room(room_id: u64, price: f64) -> Value {
    json!({
        "roomId": room_id,
        "roomType": "Deluxe Double",
        "price": price,
        "hotelId": 1,
        "hotelName": "Seaside Hotel",
        "description": "Ocean view",
        "capacity": 3,
        "imageUrls": ["https://img.example.com/rooms/1.jpg"],
        "rating": 4.6,
        "reviewCount": 128
    })
}

/// Booking with array-encoded dates, as the backend sometimes sends them.
pub fn booking(booking_id: u64, status: &str) -> Value {
    json!({
        "bookingId": booking_id,
        "roomId": 3,
        "roomType": "Deluxe Double",
        "hotelName": "Seaside Hotel",
        "hotelCity": "Da Nang",
        "checkIn": [2024, 1, 4],
        "checkOut": "2024-01-07",
        "totalPrice": 330.0,
        "status": status,
        "adultsCount": 2,
        "childrenCount": 1,
        "infantsCount": 0,
        "createdAt": [2024, 1, 1, 9, 30, 0]
    })
}

pub fn notification(notification_id: u64, status: &str) -> Value {
    json!({
        "notificationId": notification_id,
        "type": "BOOKING_SUCCESS",
        "bookingId": 11,
        "title": "Booking confirmed",
        "message": "Your stay at Seaside Hotel is confirmed.",
        "status": status,
        "createdAt": "2024-01-01T09:30:00",
        "roomName": "Deluxe Double",
        "hotelName": "Seaside Hotel",
        "checkIn": "2024-01-04",
        "checkOut": "2024-01-07"
    })
}

/// Contents of `session.json` for a signed-in user.
pub fn stored_session() -> Value {
    json!({
        "accessToken": ACCESS_TOKEN,
        "refreshToken": REFRESH_TOKEN,
        "userProfile": json!({
            "fullName": "Ana Nguyen",
            "email": "ana@example.com",
            "phone": "0912345678"
        })
        .to_string()
    })
}
