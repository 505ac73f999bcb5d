//! Scale calibration on the workflow level.

use floorscan_canvas::{InteractionMode, ScaleState};
use floorscan_core::ScaleRatio;

use super::WorkflowController;
use crate::error::{WorkflowError, WorkflowResult};

impl WorkflowController {
    /// Puts the canvas into reference-line placement. Returns `false` when a
    /// gesture is in progress and the mode could not change.
    pub fn start_calibration(&mut self) -> WorkflowResult<bool> {
        let floor = self.active.ok_or(WorkflowError::NoActiveFloor)?;
        if !self.canvas.has_image() {
            return Err(WorkflowError::NoImage(floor));
        }
        self.pending_calibration = None;
        Ok(self.canvas.set_mode(InteractionMode::Calibrate))
    }

    /// Pixel length of the measured reference line, if one awaits a real
    /// length.
    pub fn pending_calibration(&self) -> Option<f64> {
        self.pending_calibration
    }

    /// Completes a drawn calibration with the line's real length in feet.
    ///
    /// A rejected length leaves both the scale and the pending line as they
    /// were, so the user can retry.
    pub fn apply_calibration(&mut self, real_feet: f64) -> WorkflowResult<ScaleRatio> {
        let floor = self.active.ok_or(WorkflowError::NoActiveFloor)?;
        let pixels = self
            .pending_calibration
            .ok_or(WorkflowError::NoPendingCalibration)?;
        let state = self.floor_state_mut(floor)?;
        let ratio = state
            .scale
            .calibrate_from_reference(pixels, real_feet)
            .inspect_err(|e| tracing::warn!("Calibration rejected on floor {}: {}", floor, e))?;
        self.pending_calibration = None;
        Ok(ratio)
    }

    /// Sets a directly entered ratio as a manual override.
    pub fn set_pixels_per_foot(&mut self, floor: u32, pixels_per_foot: f64) -> WorkflowResult<ScaleRatio> {
        let state = self.floor_state_mut(floor)?;
        let ratio = state
            .scale
            .set_pixels_per_foot(pixels_per_foot)
            .inspect_err(|e| tracing::warn!("Scale rejected on floor {}: {}", floor, e))?;
        Ok(ratio)
    }

    /// Drops the manual override and falls back to the detected scale.
    /// Returns the resulting pixels per foot, if any.
    pub fn reset_scale_to_auto(&mut self, floor: u32) -> WorkflowResult<Option<f64>> {
        let state = self.floor_state_mut(floor)?;
        state.scale.reset_to_auto();
        tracing::info!(
            "Floor {} scale back to automatic: {:?} px/ft",
            floor,
            state.scale.pixels_per_foot()
        );
        Ok(state.scale.pixels_per_foot())
    }

    pub fn scale(&self, floor: u32) -> Option<&ScaleState> {
        self.floors.get(&floor).map(|s| s.scale())
    }
}
