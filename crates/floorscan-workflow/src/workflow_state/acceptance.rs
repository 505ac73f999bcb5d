//! Acceptance and export gating.

use chrono::{DateTime, Utc};
use floorscan_canvas::{convert_layers, ConversionOptions};

use super::WorkflowController;
use crate::error::{WorkflowError, WorkflowResult};
use crate::manifest::{build_manifest, FloorExport, Manifest};

impl WorkflowController {
    /// Accepts a floor and freezes its element set.
    ///
    /// The active floor freezes what the canvas currently shows, including
    /// edits. Any other floor freezes a fresh conversion of its raw data.
    /// Returns the number of frozen elements.
    pub fn accept_floor(&mut self, floor: u32) -> WorkflowResult<usize> {
        self.check_floor(floor)?;
        let active = self.is_active(floor);
        let options = ConversionOptions::from_settings(&self.config.engine);
        let snapshot = active.then(|| self.canvas.snapshot());

        let state = self.floor_state_mut(floor)?;
        let analysis = state.analysis.as_ref().ok_or(WorkflowError::NotAnalyzed(floor))?;
        let elements = match snapshot {
            Some(elements) => elements,
            None => convert_layers(&analysis.layers, &options).elements,
        };
        let count = elements.len();
        state.frozen = Some(elements);
        state.accepted = true;
        tracing::info!("Floor {} accepted with {} elements", floor, count);
        Ok(count)
    }

    /// Withdraws acceptance. Returns `false` when the floor was not accepted.
    pub fn revoke_acceptance(&mut self, floor: u32) -> WorkflowResult<bool> {
        let revoked = self.floor_state_mut(floor)?.revoke();
        if revoked {
            tracing::info!("Floor {} acceptance revoked", floor);
        }
        Ok(revoked)
    }

    pub fn is_accepted(&self, floor: u32) -> bool {
        self.floors.get(&floor).is_some_and(|s| s.is_accepted())
    }

    /// True when every floor `1..=story_count` is accepted.
    pub fn can_export(&self) -> bool {
        (1..=self.story_count()).all(|n| self.is_accepted(n))
    }

    /// Builds the manifest, stamped with the current time.
    ///
    /// `None` when a required floor is unaccepted or when no accepted floor
    /// has a scale. Accepted floors without a scale are left out.
    pub fn export_manifest(&self) -> Option<Manifest> {
        self.export_manifest_at(Utc::now())
    }

    pub fn export_manifest_at(&self, exported_at: DateTime<Utc>) -> Option<Manifest> {
        if !self.can_export() {
            let missing: Vec<u32> = (1..=self.story_count())
                .filter(|n| !self.is_accepted(*n))
                .collect();
            tracing::warn!("Export refused: floors {:?} not accepted", missing);
            return None;
        }

        let mut exports = Vec::new();
        for state in self.floors.values() {
            let (Some(frozen), Some(analysis)) = (state.frozen_elements(), state.analysis()) else {
                continue;
            };
            let Some(ratio) = state.scale().ratio() else {
                tracing::warn!("Floor {} has no scale; left out of export", state.number());
                continue;
            };
            exports.push(FloorExport {
                floor: state.number(),
                ratio,
                elements: frozen,
                layers: &analysis.layers,
            });
        }

        if exports.is_empty() {
            tracing::warn!("Export refused: no accepted floor has a scale");
        }
        build_manifest(self.project(), &exports, exported_at)
    }
}
