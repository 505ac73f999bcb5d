use serde::{Deserialize, Serialize};

use floorscan_core::Point;

/// A door or window symbol placed on the plan.
///
/// `subtype` is free text from the OCR tag (`single`, `double`, `sliding`
/// for doors; `fixed`, `sliding`, `casement` for windows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub center: Point,
    /// Degrees in `[0, 360)`.
    pub rotation_deg: f64,
    pub subtype: String,
    /// Nominal width in image pixels.
    pub width_px: f64,
    pub confidence: f64,
}

impl Opening {
    pub fn new(center: Point, subtype: impl Into<String>, width_px: f64) -> Self {
        Self {
            center,
            rotation_deg: 0.0,
            subtype: subtype.into(),
            width_px,
            confidence: 1.0,
        }
    }

    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = normalize_degrees(rotation_deg);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}

/// Wraps an angle into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
