//! Saved review sessions.
//!
//! A session file captures what the host collected for a project: the
//! project settings and, per floor, the image reference, the OCR result,
//! any manual scale and whether the floor was accepted. Replaying it through
//! a [`WorkflowController`] reproduces the export.

use std::path::Path;

use floorscan_canvas::FloorImage;
use floorscan_core::{OcrLayers, ScaleHint};
use floorscan_settings::{Config, EngineSettings, ProjectConfig};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResponse;
use crate::error::WorkflowResult;
use crate::workflow_state::WorkflowController;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionImage {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFloor {
    /// 1-based floor number
    pub floor: u32,
    pub image: SessionImage,
    #[serde(default)]
    pub layers: OcrLayers,
    #[serde(default)]
    pub scale: ScaleHint,
    /// Manually entered ratio; overrides the detected scale
    #[serde(default)]
    pub pixels_per_foot: Option<f64>,
    #[serde(default)]
    pub accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub floors: Vec<SessionFloor>,
}

impl Session {
    pub fn from_json(json: &str) -> WorkflowResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: &Path) -> WorkflowResult<Self> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded session from {}", path.display());
        Self::from_json(&content)
    }

    /// Replays the session: images, analyses, manual scales, acceptance.
    /// The first listed floor ends up active.
    pub fn into_controller(self) -> WorkflowResult<WorkflowController> {
        let mut controller = WorkflowController::new(Config {
            engine: self.engine,
            project: self.project,
        })?;

        for entry in self.floors {
            let image = FloorImage::new(entry.image.source, entry.image.width, entry.image.height)?;
            controller.set_floor_image(entry.floor, image)?;

            let ticket = controller.begin_analysis(entry.floor)?;
            controller.complete_analysis(
                ticket,
                AnalysisResponse {
                    layers: entry.layers,
                    scale: entry.scale,
                },
            )?;

            if let Some(ppf) = entry.pixels_per_foot {
                controller.set_pixels_per_foot(entry.floor, ppf)?;
            }
            if entry.accepted {
                controller.accept_floor(entry.floor)?;
            }
            if controller.active_floor().is_none() {
                controller.select_floor(entry.floor)?;
            }
        }
        Ok(controller)
    }
}
