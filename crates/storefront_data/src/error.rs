//! # Data Error Types
//!
//! All errors that can occur while talking to the commerce backend.

use thiserror::Error;

/// Errors that can occur while reading from the store API.
#[derive(Error, Debug)]
pub enum DataError {
    /// The request never produced a response.
    #[error("transport failure for {path}: {message}")]
    Transport {
        /// Requested path.
        path: String,
        /// Transport-level description.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("{path} returned HTTP {status}: {message}")]
    Status {
        /// Requested path.
        path: String,
        /// HTTP status code.
        status: u16,
        /// Body or reason phrase.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response from {path}: {source}")]
    Decode {
        /// Requested path.
        path: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// Invalid settings file.
    #[error("invalid backend settings: {0}")]
    InvalidSettings(#[from] toml::de::Error),
}

/// Result type for data operations.
pub type DataResult<T> = Result<T, DataError>;
