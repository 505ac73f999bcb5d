//! Unit conversion utilities
//!
//! Handles conversion from image pixels to feet through a calibrated
//! pixels-per-foot ratio, and the fixed-precision rounding applied to every
//! exported coordinate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Decimal places kept on exported coordinates.
pub const FEET_PRECISION: u32 = 4;

/// Rounds `value` to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    // Normalise -0.0 so serialised output stays stable.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Converts a pixel measurement to feet, rounded to [`FEET_PRECISION`].
pub fn pixels_to_feet(pixels: f64, pixels_per_foot: f64) -> f64 {
    round_to(pixels / pixels_per_foot, FEET_PRECISION)
}

/// A validated pixels-per-foot ratio.
///
/// Construction rejects zero, negative and non-finite values, so a
/// `ScaleRatio` can always be divided by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ScaleRatio(f64);

impl ScaleRatio {
    pub fn new(pixels_per_foot: f64) -> Result<Self, CoreError> {
        CoreError::check_positive("pixels_per_foot", pixels_per_foot).map(Self)
    }

    /// Derives the ratio from a reference segment of known real length.
    pub fn from_reference(pixel_length: f64, real_feet: f64) -> Result<Self, CoreError> {
        let pixel_length = CoreError::check_positive("reference pixel length", pixel_length)?;
        let real_feet = CoreError::check_positive("reference length (ft)", real_feet)?;
        Self::new(pixel_length / real_feet)
    }

    pub fn pixels_per_foot(&self) -> f64 {
        self.0
    }

    pub fn to_feet(&self, pixels: f64) -> f64 {
        pixels_to_feet(pixels, self.0)
    }

    /// Converts an image-space pair to rounded feet.
    pub fn point_to_feet(&self, x: f64, y: f64) -> [f64; 2] {
        [self.to_feet(x), self.to_feet(y)]
    }
}

impl TryFrom<f64> for ScaleRatio {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScaleRatio> for f64 {
    fn from(ratio: ScaleRatio) -> Self {
        ratio.0
    }
}

impl fmt::Display for ScaleRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} px/ft", self.0)
    }
}
