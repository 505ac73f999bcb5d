//! Backdrop image reference.
//!
//! The canvas does not decode images. The host resolves the image and hands
//! over its reference and pixel dimensions; until then the canvas refuses
//! transform operations.

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

/// A resolved floor-plan image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorImage {
    /// Host-side reference (path, URL or data URI).
    pub source: String,
    pub width: u32,
    pub height: u32,
}

impl FloorImage {
    /// Rejects zero-sized images.
    pub fn new(source: impl Into<String>, width: u32, height: u32) -> CanvasResult<Self> {
        let source = source.into();
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidImage {
                source_ref: source,
                width,
                height,
            });
        }
        Ok(Self {
            source,
            width,
            height,
        })
    }

    pub fn width_f64(&self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(&self) -> f64 {
        f64::from(self.height)
    }
}
