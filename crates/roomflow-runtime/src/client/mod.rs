mod auth;
mod bookings;
mod notifications;
mod rooms;
mod workspace;

pub use auth::AuthOps;
pub use bookings::BookingOps;
pub use notifications::NotificationOps;
pub use rooms::RoomOps;
pub use workspace::Roomflow;
