mod context;

pub mod auth;
pub mod badge;
pub mod book;
pub mod bookings;
pub mod calendar;
pub mod config;
pub mod notifications;
pub mod profile;
pub mod quote;
pub mod room;

pub use context::HandlerContext;
