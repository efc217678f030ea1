use std::fmt;

use crate::date::CalendarDate;

/// Result type for roomflow-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building domain values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input could not be read as a calendar date
    InvalidDate(String),

    /// Check-out does not fall strictly after check-in
    InvalidRange {
        check_in: CalendarDate,
        check_out: CalendarDate,
    },

    /// Guest counts outside the accepted bounds
    InvalidGuestCount(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDate(input) => write!(f, "Invalid date: {}", input),
            Error::InvalidRange {
                check_in,
                check_out,
            } => write!(
                f,
                "Invalid date range: check-out {} must be after check-in {}",
                check_out, check_in
            ),
            Error::InvalidGuestCount(msg) => write!(f, "Invalid guest count: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
