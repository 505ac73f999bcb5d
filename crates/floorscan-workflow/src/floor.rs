//! Per-floor workflow state.

use chrono::{DateTime, Utc};
use floorscan_canvas::{Element, FloorImage, ScaleState};
use floorscan_core::{OcrLayers, ScaleHint};
use uuid::Uuid;

/// Result of the latest successful analysis of a floor.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorAnalysis {
    pub layers: OcrLayers,
    pub scale: ScaleHint,
    pub request_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FloorState {
    number: u32,
    pub(crate) image: Option<FloorImage>,
    pub(crate) analysis: Option<FloorAnalysis>,
    pub(crate) scale: ScaleState,
    pub(crate) accepted: bool,
    /// Element set frozen at acceptance. Later canvas edits do not reach it.
    pub(crate) frozen: Option<Vec<Element>>,
}

impl FloorState {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            image: None,
            analysis: None,
            scale: ScaleState::new(),
            accepted: false,
            frozen: None,
        }
    }

    /// 1-based floor number.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn image(&self) -> Option<&FloorImage> {
        self.image.as_ref()
    }

    pub fn analysis(&self) -> Option<&FloorAnalysis> {
        self.analysis.as_ref()
    }

    pub fn scale(&self) -> &ScaleState {
        &self.scale
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn frozen_elements(&self) -> Option<&[Element]> {
        self.frozen.as_deref()
    }

    /// Drops acceptance and the frozen set.
    pub(crate) fn revoke(&mut self) -> bool {
        self.frozen = None;
        std::mem::replace(&mut self.accepted, false)
    }

    /// Back to a floor with no image: analysis, acceptance and scale go.
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.number);
    }
}
