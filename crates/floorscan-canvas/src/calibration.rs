//! Pixel to real-world scale calibration.
//!
//! Two manual paths produce the same ratio: a drawn reference segment of
//! known length, or a directly entered pixels-per-foot value. Either one
//! marks the scale as a manual override, which automatic detection then
//! leaves alone until [`ScaleState::reset_to_auto`] is called.

use serde::{Deserialize, Serialize};

use floorscan_core::{CoreError, Point, ScaleHint, ScaleRatio};

/// Where the current ratio came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleSource {
    Unset,
    Detected,
    Manual,
}

/// Per-floor scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleState {
    ratio: Option<ScaleRatio>,
    confidence: f64,
    manual_override: bool,
    /// Last hint from analysis, kept so automatic mode can be restored.
    last_detected: Option<ScaleHint>,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaleState {
    pub fn new() -> Self {
        Self {
            ratio: None,
            confidence: 0.0,
            manual_override: false,
            last_detected: None,
        }
    }

    pub fn ratio(&self) -> Option<ScaleRatio> {
        self.ratio
    }

    pub fn pixels_per_foot(&self) -> Option<f64> {
        self.ratio.map(|r| r.pixels_per_foot())
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn manual_override(&self) -> bool {
        self.manual_override
    }

    pub fn last_detected(&self) -> Option<ScaleHint> {
        self.last_detected
    }

    pub fn source(&self) -> ScaleSource {
        match (self.ratio, self.manual_override) {
            (None, _) => ScaleSource::Unset,
            (Some(_), true) => ScaleSource::Manual,
            (Some(_), false) => ScaleSource::Detected,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.ratio.is_some()
    }

    /// Sets the ratio from a reference segment of `pixel_length` pixels that
    /// measures `real_feet` in reality. On error nothing changes.
    pub fn calibrate_from_reference(
        &mut self,
        pixel_length: f64,
        real_feet: f64,
    ) -> Result<ScaleRatio, CoreError> {
        let ratio = ScaleRatio::from_reference(pixel_length, real_feet)?;
        self.set_manual(ratio);
        Ok(ratio)
    }

    /// Sets a directly entered ratio. On error nothing changes.
    pub fn set_pixels_per_foot(&mut self, pixels_per_foot: f64) -> Result<ScaleRatio, CoreError> {
        let ratio = ScaleRatio::new(pixels_per_foot)?;
        self.set_manual(ratio);
        Ok(ratio)
    }

    fn set_manual(&mut self, ratio: ScaleRatio) {
        self.ratio = Some(ratio);
        self.confidence = 1.0;
        self.manual_override = true;
        tracing::info!("Scale calibrated manually: {}", ratio);
    }

    /// Offers an automatically detected scale.
    ///
    /// The hint is always remembered. It is applied only when no manual
    /// override is active and the hint is usable. Returns `true` when the
    /// ratio was applied.
    pub fn apply_detected(&mut self, hint: ScaleHint) -> bool {
        self.last_detected = Some(hint);
        if self.manual_override {
            tracing::info!(
                "Ignoring detected scale {:.3} px/ft: manual override active",
                hint.pixels_per_foot
            );
            return false;
        }
        self.apply_hint(hint)
    }

    fn apply_hint(&mut self, hint: ScaleHint) -> bool {
        if !hint.is_usable() {
            return false;
        }
        match ScaleRatio::new(hint.pixels_per_foot) {
            Ok(ratio) => {
                self.ratio = Some(ratio);
                self.confidence = hint.confidence.clamp(0.0, 1.0);
                true
            }
            Err(_) => false,
        }
    }

    /// Clears the manual override and re-applies the last detected hint.
    ///
    /// Without a usable hint the floor ends up uncalibrated.
    pub fn reset_to_auto(&mut self) {
        self.manual_override = false;
        self.ratio = None;
        self.confidence = 0.0;
        if let Some(hint) = self.last_detected {
            self.apply_hint(hint);
        }
    }
}

/// Endpoints of a reference line being placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibrationLine {
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl CalibrationLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the next endpoint. Returns the pixel length once both ends
    /// are placed.
    pub fn place(&mut self, p: Point) -> Option<f64> {
        match (self.start, self.end) {
            (None, _) => {
                self.start = Some(p);
                None
            }
            (Some(a), None) => {
                self.end = Some(p);
                Some(a.distance_to(&p))
            }
            // A finished line restarts from a new first endpoint
            (Some(_), Some(_)) => {
                self.start = Some(p);
                self.end = None;
                None
            }
        }
    }

    pub fn pixel_length(&self) -> Option<f64> {
        match (self.start, self.end) {
            (Some(a), Some(b)) => Some(a.distance_to(&b)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
