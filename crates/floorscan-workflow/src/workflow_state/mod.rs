//! Workflow controller: owns per-floor state and feeds the active floor into
//! the canvas engine.

mod acceptance;
mod analysis;
mod scale;

use std::collections::BTreeMap;
use std::path::PathBuf;

use floorscan_canvas::{Canvas, FloorImage, InteractionMode, InteractionOutcome, Key, PointerButton};
use floorscan_core::Layer;
use floorscan_settings::{Config, ProjectConfig};

use crate::analysis::InFlightRegistry;
use crate::error::{WorkflowError, WorkflowResult};
use crate::floor::FloorState;
use crate::image_loader;

/// Drives one project: floor images, analysis, calibration, acceptance and
/// export.
///
/// Exactly one floor is shown on the canvas at a time. Switching floors
/// reloads the canvas from that floor's stored data; unaccepted edits on
/// the floor being left are not kept.
#[derive(Debug)]
pub struct WorkflowController {
    config: Config,
    canvas: Canvas,
    floors: BTreeMap<u32, FloorState>,
    active: Option<u32>,
    in_flight: InFlightRegistry,
    /// Pixel length of the last completed reference line, awaiting feet.
    pending_calibration: Option<f64>,
}

impl WorkflowController {
    pub fn new(config: Config) -> WorkflowResult<Self> {
        config.validate()?;
        let floors = (1..=config.project.story_count)
            .map(|n| (n, FloorState::new(n)))
            .collect();
        let canvas = Canvas::new(config.engine.clone())?;
        tracing::info!(
            "Workflow started: {} floor(s), project type {}",
            config.project.story_count,
            config.project.project_type
        );
        Ok(Self {
            config,
            canvas,
            floors,
            active: None,
            in_flight: InFlightRegistry::new(),
            pending_calibration: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.config.project
    }

    pub fn story_count(&self) -> u32 {
        self.config.project.story_count
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Direct canvas access for hooks, render sinks and element edits.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn check_floor(&self, floor: u32) -> WorkflowResult<()> {
        if floor == 0 || floor > self.story_count() {
            return Err(WorkflowError::InvalidFloor {
                floor,
                story_count: self.story_count(),
            });
        }
        Ok(())
    }

    fn floor_state_mut(&mut self, floor: u32) -> WorkflowResult<&mut FloorState> {
        self.check_floor(floor)?;
        let story_count = self.story_count();
        self.floors
            .get_mut(&floor)
            .ok_or(WorkflowError::InvalidFloor { floor, story_count })
    }

    fn is_active(&self, floor: u32) -> bool {
        self.active == Some(floor)
    }

    // ---------------------------------------------------------------------
    // Floors
    // ---------------------------------------------------------------------

    pub fn floor(&self, floor: u32) -> Option<&FloorState> {
        self.floors.get(&floor)
    }

    /// Floors in level order.
    pub fn floors(&self) -> impl Iterator<Item = &FloorState> {
        self.floors.values()
    }

    pub fn active_floor(&self) -> Option<u32> {
        self.active
    }

    /// Attaches a decoded image to a floor.
    ///
    /// A different image starts the floor over: its analysis, acceptance
    /// and scale are discarded and any request in flight becomes stale.
    pub fn set_floor_image(&mut self, floor: u32, image: FloorImage) -> WorkflowResult<()> {
        let state = self.floor_state_mut(floor)?;
        if state.image.as_ref() == Some(&image) {
            return Ok(());
        }
        state.reset();
        state.image = Some(image);
        self.in_flight.abandon(floor);
        tracing::info!("Floor {} image set", floor);

        if self.is_active(floor) {
            self.show_floor(floor);
        }
        Ok(())
    }

    /// Decodes an image file off the UI thread, then attaches it.
    pub async fn load_floor_image(
        &mut self,
        floor: u32,
        path: impl Into<PathBuf>,
    ) -> WorkflowResult<()> {
        self.check_floor(floor)?;
        let image = image_loader::load_image(path).await?;
        self.set_floor_image(floor, image)
    }

    /// Removes a floor's image and everything derived from it. Returns
    /// `false` when the floor had no image.
    pub fn remove_floor_image(&mut self, floor: u32) -> WorkflowResult<bool> {
        let state = self.floor_state_mut(floor)?;
        if state.image.is_none() {
            return Ok(false);
        }
        state.reset();
        self.in_flight.abandon(floor);
        tracing::info!("Floor {} image removed", floor);

        if self.is_active(floor) {
            self.show_floor(floor);
        }
        Ok(true)
    }

    /// Shows `floor` on the canvas.
    pub fn select_floor(&mut self, floor: u32) -> WorkflowResult<()> {
        self.check_floor(floor)?;
        self.active = Some(floor);
        self.show_floor(floor);
        tracing::debug!("Floor {} active", floor);
        Ok(())
    }

    /// Reloads the canvas from the floor's stored state. An accepted floor
    /// shows its frozen set; otherwise its raw data is converted afresh.
    fn show_floor(&mut self, floor: u32) {
        self.pending_calibration = None;
        let Some(state) = self.floors.get(&floor) else {
            return;
        };

        match &state.image {
            Some(image) => self.canvas.load_image(image.clone()),
            None => self.canvas.clear_image(),
        }
        self.canvas.set_mode(InteractionMode::Select);

        match (&state.analysis, &state.frozen) {
            (Some(analysis), Some(frozen)) if state.accepted => {
                self.canvas.set_raw_layers(analysis.layers.clone());
                self.canvas.load_elements(frozen.clone());
            }
            (Some(analysis), _) => {
                self.canvas.load_ocr(analysis.layers.clone());
            }
            (None, _) => self.canvas.clear(),
        }
    }

    // ---------------------------------------------------------------------
    // Layers
    // ---------------------------------------------------------------------

    /// Shows or hides a raw OCR layer. Derived elements are unaffected.
    pub fn set_layer_visible(&mut self, layer: Layer, visible: bool) {
        self.canvas.set_layer_visible(layer, visible);
    }

    pub fn is_layer_visible(&self, layer: Layer) -> bool {
        self.canvas.is_layer_visible(layer)
    }

    // ---------------------------------------------------------------------
    // Input forwarding
    // ---------------------------------------------------------------------

    pub fn pointer_down(&mut self, sx: f64, sy: f64, button: PointerButton) -> InteractionOutcome {
        let outcome = self.canvas.pointer_down(sx, sy, button);
        self.observe(&outcome);
        outcome
    }

    pub fn pointer_move(&mut self, sx: f64, sy: f64) -> InteractionOutcome {
        self.canvas.pointer_move(sx, sy)
    }

    pub fn pointer_up(&mut self, sx: f64, sy: f64, button: PointerButton) -> InteractionOutcome {
        self.canvas.pointer_up(sx, sy, button)
    }

    pub fn wheel(&mut self, delta_y: f64, sx: f64, sy: f64) -> InteractionOutcome {
        self.canvas.wheel(delta_y, sx, sy)
    }

    pub fn key_down(&mut self, key: Key) -> InteractionOutcome {
        let outcome = self.canvas.key_down(key);
        self.observe(&outcome);
        outcome
    }

    fn observe(&mut self, outcome: &InteractionOutcome) {
        match outcome {
            InteractionOutcome::CalibrationMeasured { pixels } => {
                tracing::debug!("Reference line measured: {:.2} px", pixels);
                self.pending_calibration = Some(*pixels);
            }
            InteractionOutcome::CalibrationCancelled => self.pending_calibration = None,
            _ => {}
        }
    }
}
