use roomflow_engine::FormErrors;
use std::fmt;

/// Result type for roomflow-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur talking to the backend or local storage
#[derive(Debug)]
pub enum Error {
    /// Request never produced a response (offline, refused, timed out)
    Network(String),

    /// Backend answered with a non-success status
    Api { status: u16, message: String },

    /// Access token rejected; the local session has been cleared
    Unauthorized,

    /// Form input rejected before any request was sent
    Validation(FormErrors),

    /// Response body did not match the expected shape
    Decode(String),

    /// Session storage could not be read or written
    Storage(String),

    /// Booking-flow rule violated
    Flow(roomflow_engine::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Invalid operation or state
    InvalidOperation(String),
}

impl Error {
    /// Client-side mistakes the backend reports as 4xx. Logged quietly.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Error::Api {
                status: 400 | 403 | 404 | 409 | 422,
                ..
            }
        )
    }

    pub fn is_network_unavailable(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Api { message, .. } => write!(f, "{}", message),
            Error::Unauthorized => write!(f, "Session expired, please log in again"),
            Error::Validation(errors) => write!(f, "Invalid input: {}", errors),
            Error::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            Error::Storage(msg) => write!(f, "Storage error: {}", msg),
            Error::Flow(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Flow(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<roomflow_engine::Error> for Error {
    fn from(err: roomflow_engine::Error) -> Self {
        Error::Flow(err)
    }
}

impl From<FormErrors> for Error {
    fn from(errors: FormErrors) -> Self {
        Error::Validation(errors)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
