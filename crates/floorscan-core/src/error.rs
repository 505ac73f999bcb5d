//! Error handling for FloorScan
//!
//! Provides the error types shared by every layer of the engine:
//! - Geometry errors (degenerate or non-finite input)
//! - Data errors (malformed OCR payloads)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Core error type
///
/// Represents failures in geometry or data handling that callers must see,
/// as opposed to degradations (dropped incomplete OCR pairs) that are
/// handled silently.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A numeric input was NaN or infinite
    #[error("Non-finite value for {field}: {value}")]
    NonFinite {
        /// The name of the offending field.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// A value that must be strictly positive was not
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// The name of the offending field.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// An OCR layer name was not recognised
    #[error("Unknown layer: {0}")]
    UnknownLayer(String),
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Core error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// JSON (de)serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

impl CoreError {
    /// Rejects NaN and infinities.
    pub fn check_finite(field: &str, value: f64) -> std::result::Result<f64, CoreError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CoreError::NonFinite {
                field: field.to_string(),
                value,
            })
        }
    }

    /// Rejects anything that is not a finite, strictly positive number.
    pub fn check_positive(field: &str, value: f64) -> std::result::Result<f64, CoreError> {
        let value = Self::check_finite(field, value)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(CoreError::NotPositive {
                field: field.to_string(),
                value,
            })
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
