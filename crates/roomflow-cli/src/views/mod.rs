// Plain-text renderings. Each view is a `Display` over borrowed data; the
// JSON form of the same command serializes the data directly.

pub mod booking;
pub mod calendar;
pub mod notification;
pub mod profile;
pub mod quote;

pub use booking::{BookingDetailView, BookingListView, BookingPlan, RoomView};
pub use calendar::{CalendarView, CalendarViewModel};
pub use notification::{NotificationListView, UnreadCountView};
pub use profile::{ConfigView, ProfileView};
pub use quote::QuoteView;
