//! Analysis lifecycle: begin, complete, fail.

use std::fmt::Display;

use chrono::Utc;

use super::WorkflowController;
use crate::analysis::{AnalysisResponse, AnalysisTicket, FloorAnalyzer};
use crate::error::{WorkflowError, WorkflowResult};
use crate::floor::FloorAnalysis;

impl WorkflowController {
    /// Marks `floor` as being analyzed.
    ///
    /// Fails with [`WorkflowError::AnalysisInFlight`] while an earlier ticket
    /// for the same floor is alive.
    pub fn begin_analysis(&mut self, floor: u32) -> WorkflowResult<AnalysisTicket> {
        self.check_floor(floor)?;
        let has_image = self.floors.get(&floor).is_some_and(|s| s.image.is_some());
        if !has_image {
            return Err(WorkflowError::NoImage(floor));
        }
        let ticket = self.in_flight.issue(floor)?;
        tracing::info!("Analysis started for floor {} ({})", floor, ticket.request_id());
        Ok(ticket)
    }

    pub fn is_analysis_in_flight(&self, floor: u32) -> bool {
        self.in_flight.is_in_flight(floor)
    }

    /// Stores a successful analysis.
    ///
    /// The previous result is replaced wholesale and acceptance is cleared.
    /// The detected scale is offered to the floor's scale state, which keeps
    /// a manual override. When the floor is on the canvas, its editable set
    /// is rebuilt from the new data.
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        response: AnalysisResponse,
    ) -> WorkflowResult<()> {
        let floor = ticket.floor();
        if !self.in_flight.is_current(&ticket) {
            tracing::warn!(
                "Dropping analysis result {} for floor {}: superseded",
                ticket.request_id(),
                floor
            );
            return Err(WorkflowError::StaleTicket {
                floor,
                request_id: ticket.request_id(),
            });
        }

        let state = self.floor_state_mut(floor)?;
        let point_count = response.layers.total_points();
        state.revoke();
        state.scale.apply_detected(response.scale);
        state.analysis = Some(FloorAnalysis {
            layers: response.layers,
            scale: response.scale,
            request_id: ticket.request_id(),
            analyzed_at: Utc::now(),
        });
        tracing::info!("Analysis finished for floor {}: {} points", floor, point_count);

        if self.is_active(floor) {
            if let Some(analysis) = self.floors.get(&floor).and_then(|s| s.analysis.as_ref()) {
                self.canvas.load_ocr(analysis.layers.clone());
            }
        }
        drop(ticket);
        Ok(())
    }

    /// Records a failed analysis. The floor's state is left untouched; the
    /// returned error is for the caller to surface.
    pub fn fail_analysis(&mut self, ticket: AnalysisTicket, reason: impl Display) -> WorkflowError {
        let floor = ticket.floor();
        tracing::warn!(
            "Analysis {} failed for floor {}: {}",
            ticket.request_id(),
            floor,
            reason
        );
        WorkflowError::analysis(floor, reason.to_string())
    }

    /// Runs the analyzer for `floor` and stores its result.
    pub async fn run_analysis(
        &mut self,
        floor: u32,
        analyzer: &dyn FloorAnalyzer,
    ) -> WorkflowResult<()> {
        let ticket = self.begin_analysis(floor)?;
        let image = self
            .floors
            .get(&floor)
            .and_then(|s| s.image.clone())
            .ok_or(WorkflowError::NoImage(floor))?;

        match analyzer.analyze(floor, &image).await {
            Ok(response) => self.complete_analysis(ticket, response),
            Err(e) => Err(self.fail_analysis(ticket, e)),
        }
    }
}
