use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::{Error, Result};

/// Guests on a reservation.
///
/// At least one adult. Infants ride along for free and are left out of
/// [`GuestCount::occupants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGuestCount")]
pub struct GuestCount {
    adults: u32,
    children: u32,
    infants: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGuestCount {
    adults: u32,
    #[serde(default)]
    children: u32,
    #[serde(default)]
    infants: u32,
}

impl TryFrom<RawGuestCount> for GuestCount {
    type Error = Error;

    fn try_from(raw: RawGuestCount) -> Result<Self> {
        Self::new(raw.adults, raw.children, raw.infants)
    }
}

impl GuestCount {
    pub fn new(adults: u32, children: u32, infants: u32) -> Result<Self> {
        if adults == 0 {
            return Err(Error::InvalidGuestCount(
                "at least one adult is required".to_string(),
            ));
        }
        Ok(Self {
            adults,
            children,
            infants,
        })
    }

    pub fn adults(&self) -> u32 {
        self.adults
    }

    pub fn children(&self) -> u32 {
        self.children
    }

    pub fn infants(&self) -> u32 {
        self.infants
    }

    /// Adults plus children.
    pub fn occupants(&self) -> u32 {
        self.adults + self.children
    }
}

impl Default for GuestCount {
    /// Two adults, the value assumed when a draft carries no guest keys.
    fn default() -> Self {
        Self {
            adults: 2,
            children: 0,
            infants: 0,
        }
    }
}

/// Derived price of a stay.
///
/// `subtotal = nightly_rate * nights`, `taxes = round(subtotal * 0.10)`,
/// `total = subtotal - discount + taxes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub nightly_rate: Decimal,
    pub nights: u32,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub taxes: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
            BookingStatus::Unknown => "Unknown",
        }
    }

    pub fn is_cancellable(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// Payload submitted when a booking draft is paid for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_id: u64,
    pub check_in: CalendarDate,
    pub check_out: CalendarDate,
    pub adults_count: u32,
    pub children_count: u32,
    pub infants_count: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

/// A booking as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: u64,
    pub room_id: Option<u64>,
    pub room_type: Option<String>,
    pub room_image_url: Option<String>,
    pub hotel_id: Option<u64>,
    pub hotel_name: Option<String>,
    pub hotel_location: Option<String>,
    pub hotel_city: Option<String>,
    pub hotel_address: Option<String>,
    #[serde(default, with = "crate::date::lenient")]
    pub check_in: Option<CalendarDate>,
    #[serde(default, with = "crate::date::lenient")]
    pub check_out: Option<CalendarDate>,
    pub total_price: Option<Decimal>,
    pub status: BookingStatus,
    pub adults_count: Option<u32>,
    pub children_count: Option<u32>,
    pub infants_count: Option<u32>,
    pub created_at: Option<serde_json::Value>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
}

impl BookingResponse {
    /// Guest counts as booked, falling back to the draft defaults.
    pub fn guests(&self) -> GuestCount {
        let fallback = GuestCount::default();
        GuestCount::new(
            self.adults_count.unwrap_or(fallback.adults()),
            self.children_count.unwrap_or(0),
            self.infants_count.unwrap_or(0),
        )
        .unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupants_exclude_infants() {
        let guests = GuestCount::new(2, 1, 1).unwrap();
        assert_eq!(guests.occupants(), 3);
    }

    #[test]
    fn test_zero_adults_rejected() {
        assert!(GuestCount::new(0, 2, 0).is_err());
        assert!(serde_json::from_str::<GuestCount>(r#"{"adults":0}"#).is_err());
    }

    #[test]
    fn test_booking_response_tolerates_array_dates() {
        let json = r#"{
            "bookingId": 7,
            "roomId": 3,
            "hotelName": "Seaside",
            "checkIn": [2024, 12, 30],
            "checkOut": "2025-01-02",
            "totalPrice": 330.0,
            "status": "CONFIRMED",
            "adultsCount": 2,
            "childrenCount": 1
        }"#;
        let booking: BookingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(booking.check_in, CalendarDate::from_ymd(2024, 12, 30));
        assert_eq!(booking.check_out, CalendarDate::from_ymd(2025, 1, 2));
        assert_eq!(booking.total_price, Some(Decimal::from(330)));
        assert_eq!(booking.guests().occupants(), 3);
    }

    #[test]
    fn test_booking_response_bad_date_is_none() {
        let json = r#"{"bookingId": 1, "checkIn": "soon", "status": "ON_HOLD"}"#;
        let booking: BookingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(booking.check_in, None);
        assert_eq!(booking.status, BookingStatus::Unknown);
    }

    #[test]
    fn test_booking_request_wire_shape() {
        let request = BookingRequest {
            room_id: 3,
            check_in: CalendarDate::from_ymd(2024, 1, 1).unwrap(),
            check_out: CalendarDate::from_ymd(2024, 1, 4).unwrap(),
            adults_count: 2,
            children_count: 0,
            infants_count: 0,
            total_price: Decimal::from(330),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["checkIn"], "2024-01-01");
        assert_eq!(value["roomId"], 3);
        assert_eq!(value["totalPrice"], 330.0);
    }
}
