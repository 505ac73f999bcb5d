//! Error types for the canvas engine.

use floorscan_core::CoreError;
use thiserror::Error;

/// Errors returned by canvas operations that the caller must handle.
///
/// Conditions the engine degrades around (incomplete OCR pairs, deleting a
/// missing id, rotating a wall) are not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
    /// A transform operation was issued before a backdrop image resolved
    #[error("No floor-plan image loaded")]
    ImageNotLoaded,

    /// The backdrop image reported unusable dimensions
    #[error("Invalid image dimensions {width}x{height} for {source_ref}")]
    InvalidImage {
        /// The image reference as given by the host.
        source_ref: String,
        /// Reported width in pixels.
        width: u32,
        /// Reported height in pixels.
        height: u32,
    },

    /// A calibration input was rejected; scale state is unchanged
    #[error("Calibration rejected: {0}")]
    InvalidCalibration(#[from] CoreError),

    /// A numeric viewport input was not finite
    #[error("Invalid viewport value for {field}: {value}")]
    InvalidViewport {
        /// The offending parameter.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Engine settings failed validation
    #[error("Invalid engine settings: {0}")]
    InvalidSettings(String),
}

/// Result type alias for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
