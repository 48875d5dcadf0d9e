//! # UI Error Types
//!
//! Widgets themselves never fail at runtime; malformed input is normalized.
//! Errors only come from loading configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing UI configuration.
#[derive(Error, Debug)]
pub enum UiError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// The file that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the target type.
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Fade floor is zero or outside of the opacity range.
    #[error("fade floor must be within (0, 1], got {0}")]
    InvalidFadeFloor(f32),
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
