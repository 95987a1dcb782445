//! Error types for the SimpleNotes client.

use thiserror::Error;

/// Result type alias using the SimpleNotes Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for SimpleNotes operations.
///
/// `Connect`, `Request`, `Status` and `Serialization` together make up the
/// transport failures a note store can report. `InvalidInput` and `Config`
/// are raised locally, before anything goes over the wire.
#[derive(Error, Debug)]
pub enum Error {
    /// The connection to the server could not be established
    #[error("Connection error: {0}")]
    Connect(String),

    /// HTTP/network request failed after the connection was made
    #[error("Request error: {0}")]
    Request(String),

    /// Server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures that happened talking to the remote store.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Connect(_) | Error::Request(_) | Error::Status { .. } | Error::Serialization(_)
        )
    }

    /// True when repeating the same request may succeed.
    ///
    /// Rate limiting and server-side errors are transient; client errors
    /// and malformed payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Connect(_) | Error::Request(_) => true,
            Error::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }

    /// True when the request provably never reached the server.
    pub fn is_connect(&self) -> bool {
        matches!(self, Error::Connect(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            Error::Connect(e.to_string())
        } else if e.is_decode() {
            Error::Serialization(e.to_string())
        } else if let Some(status) = e.status() {
            Error::Status {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            Error::Request(e.to_string())
        }
    }
}
