use roomflow_types::Decimal;
use std::fmt;

use crate::draft::FlowStep;

/// Result type for roomflow-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised by booking-flow logic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid domain value
    Domain(roomflow_types::Error),

    /// Nightly rate below zero
    NegativeRate(Decimal),

    /// Flow cannot proceed without both check-in and check-out
    MissingDates,

    /// Flow cannot submit without a resolved room
    MissingRoom,

    /// Flow cannot submit without a derived total
    MissingTotal,

    /// Derived total below zero
    NegativeTotal(Decimal),

    /// A step tried to write a key owned by another step
    KeyNotOwned { step: FlowStep, key: &'static str },

    /// A draft parameter could not be read
    InvalidParam { key: &'static str, value: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Domain(err) => write!(f, "{}", err),
            Error::NegativeRate(rate) => write!(f, "Nightly rate cannot be negative: {}", rate),
            Error::MissingDates => write!(f, "Please select both check-in and check-out dates"),
            Error::MissingRoom => write!(f, "No room selected"),
            Error::MissingTotal => write!(f, "Price has not been confirmed"),
            Error::NegativeTotal(total) => write!(f, "Total price cannot be negative: {}", total),
            Error::KeyNotOwned { step, key } => {
                write!(f, "Step '{}' cannot write draft key '{}'", step.name(), key)
            }
            Error::InvalidParam { key, value } => {
                write!(f, "Invalid value for '{}': {}", key, value)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Domain(err) => Some(err),
            _ => None,
        }
    }
}

impl From<roomflow_types::Error> for Error {
    fn from(err: roomflow_types::Error) -> Self {
        Error::Domain(err)
    }
}
