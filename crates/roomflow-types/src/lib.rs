pub mod api;
pub mod booking;
pub mod date;
pub mod error;
pub mod notification;
pub mod profile;
pub mod room;

pub use api::ApiEnvelope;
pub use booking::{BookingRequest, BookingResponse, BookingStatus, GuestCount, PriceBreakdown};
pub use date::{CalendarDate, DateRange};
pub use error::{Error, Result};
pub use notification::{NotificationResponse, NotificationStatus, NotificationType};
pub use profile::{
    AuthSession, Gender, LoginPayload, ProfileUpdate, RegisterRequest, UserProfile, UserResponse,
};
pub use room::RoomResponse;

// Monetary values are exact decimals end to end.
pub use rust_decimal::Decimal;
