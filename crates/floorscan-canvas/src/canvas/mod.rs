//! Canvas engine instance: owns the elements, viewport, selection and
//! interaction state for one floor plan.

mod interaction;
mod operations;
mod types;

pub use types::{Gesture, InteractionMode, InteractionOutcome, Key, PointerButton};

use std::collections::BTreeSet;

use floorscan_core::{Layer, OcrLayers, Point};
use floorscan_settings::EngineSettings;

use crate::calibration::CalibrationLine;
use crate::conversion::{convert_layers, ConversionOptions};
use crate::element_store::ElementStore;
use crate::error::{CanvasError, CanvasResult};
use crate::hit_test::{self, PickRadii};
use crate::hooks::CanvasHooks;
use crate::image::FloorImage;
use crate::model::{Element, ElementId};
use crate::selection_manager::SelectionManager;
use crate::svg_renderer::{self, RenderFrame, RenderSink};
use crate::viewport::{ViewTransform, Viewport};

/// Interactive floor-plan canvas.
///
/// All mutable engine state lives here; two canvases never share anything.
/// Every state change that affects the picture re-issues a [`RenderFrame`]
/// built from the single current [`ViewTransform`].
pub struct Canvas {
    pub(crate) store: ElementStore,
    pub(crate) selection: SelectionManager,
    pub(crate) hooks: CanvasHooks,
    viewport: Viewport,
    settings: EngineSettings,
    radii: PickRadii,
    conversion: ConversionOptions,
    mode: InteractionMode,
    gesture: Gesture,
    calibration: CalibrationLine,
    image: Option<FloorImage>,
    raw: OcrLayers,
    visible_layers: BTreeSet<Layer>,
    text_input_focused: bool,
    sink: Option<Box<dyn RenderSink>>,
    last_frame: Option<RenderFrame>,
}

impl Canvas {
    /// Creates a canvas with the given engine settings and the default
    /// viewport size. Settings that fail validation are rejected.
    pub fn new(settings: EngineSettings) -> CanvasResult<Self> {
        settings
            .validate()
            .map_err(|e| CanvasError::InvalidSettings(e.to_string()))?;
        Ok(Self::from_valid_settings(settings))
    }

    fn from_valid_settings(settings: EngineSettings) -> Self {
        let viewport = Viewport::with_zoom_bounds(
            floorscan_core::constants::DEFAULT_VIEWPORT_WIDTH,
            floorscan_core::constants::DEFAULT_VIEWPORT_HEIGHT,
            settings.min_zoom,
            settings.max_zoom,
        );
        Self {
            store: ElementStore::new(),
            selection: SelectionManager::new(),
            hooks: CanvasHooks::new(),
            viewport,
            radii: PickRadii::from_settings(&settings),
            conversion: ConversionOptions::from_settings(&settings),
            settings,
            mode: InteractionMode::Select,
            gesture: Gesture::Idle,
            calibration: CalibrationLine::new(),
            image: None,
            raw: OcrLayers::new(),
            visible_layers: Layer::ALL.into_iter().collect(),
            text_input_focused: false,
            sink: None,
            last_frame: None,
        }
    }

    /// Creates a canvas with default settings and the given viewport size.
    pub fn with_size(width: f64, height: f64) -> Self {
        let mut canvas = Self::from_valid_settings(EngineSettings::default());
        canvas.viewport.set_canvas_size(width, height);
        canvas
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    // ---------------------------------------------------------------------
    // Image
    // ---------------------------------------------------------------------

    /// Installs a resolved backdrop image and fits it to the viewport.
    pub fn load_image(&mut self, image: FloorImage) {
        tracing::info!(
            "Loaded floor image {} ({}x{})",
            image.source,
            image.width,
            image.height
        );
        self.image = Some(image);
        self.gesture = Gesture::Idle;
        // Cannot fail: the image was just set
        let _ = self.zoom_fit();
    }

    /// Removes the backdrop. Transform operations are refused until a new
    /// image is loaded.
    pub fn clear_image(&mut self) {
        self.image = None;
        self.gesture = Gesture::Idle;
        self.last_frame = None;
    }

    pub fn image(&self) -> Option<&FloorImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    fn require_image(&self) -> CanvasResult<&FloorImage> {
        self.image.as_ref().ok_or(CanvasError::ImageNotLoaded)
    }

    // ---------------------------------------------------------------------
    // OCR data and element sets
    // ---------------------------------------------------------------------

    /// Replaces the raw OCR data and rebuilds the editable element set from
    /// it. Previous elements and their edits are discarded. Returns the ids
    /// of the new elements in conversion order.
    pub fn load_ocr(&mut self, layers: OcrLayers) -> Vec<ElementId> {
        let geometry = convert_layers(&layers, &self.conversion);
        self.raw = layers;
        self.replace_elements(geometry.elements)
    }

    /// Replaces the raw overlay data without touching the elements.
    pub fn set_raw_layers(&mut self, layers: OcrLayers) {
        self.raw = layers;
        self.render();
    }

    /// Replaces the editable element set, e.g. with a frozen snapshot.
    pub fn load_elements(&mut self, elements: Vec<Element>) -> Vec<ElementId> {
        self.replace_elements(elements)
    }

    fn replace_elements(&mut self, elements: Vec<Element>) -> Vec<ElementId> {
        if let Gesture::Dragging { .. } = self.gesture {
            self.gesture = Gesture::Idle;
        }
        self.clear_selection_silently();
        self.store.clear();
        let ids = elements.into_iter().map(|el| self.store.add(el)).collect();
        self.render();
        ids
    }

    fn clear_selection_silently(&mut self) {
        if self.selection.deselect() {
            self.hooks.selected(None);
        }
    }

    /// Removes all elements and raw data.
    pub fn clear(&mut self) {
        self.raw = OcrLayers::new();
        self.replace_elements(Vec::new());
    }

    pub fn raw_layers(&self) -> &OcrLayers {
        &self.raw
    }

    /// Copies the current elements in creation order.
    pub fn snapshot(&self) -> Vec<Element> {
        self.store.to_vec()
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.store.iter()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.store.get(id)
    }

    pub fn element_count(&self) -> usize {
        self.store.len()
    }

    // ---------------------------------------------------------------------
    // Layer visibility
    // ---------------------------------------------------------------------

    /// Shows or hides the raw markers of one layer. Elements are unaffected.
    pub fn set_layer_visible(&mut self, layer: Layer, visible: bool) {
        let changed = if visible {
            self.visible_layers.insert(layer)
        } else {
            self.visible_layers.remove(&layer)
        };
        if changed {
            self.render();
        }
    }

    pub fn is_layer_visible(&self, layer: Layer) -> bool {
        self.visible_layers.contains(&layer)
    }

    pub fn visible_layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.visible_layers.iter().copied()
    }

    // ---------------------------------------------------------------------
    // Viewport
    // ---------------------------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The transform shared by rendering and hit-testing.
    pub fn transform(&self) -> ViewTransform {
        self.viewport.transform()
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    /// Resizes the viewport (host window resized).
    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> CanvasResult<()> {
        check_finite("width", width)?;
        check_finite("height", height)?;
        self.viewport.set_canvas_size(width, height);
        self.render();
        Ok(())
    }

    /// Fits the whole image into the viewport with the configured margin and
    /// centers it. Returns the new zoom.
    pub fn zoom_fit(&mut self) -> CanvasResult<f64> {
        let (w, h) = {
            let image = self.require_image()?;
            (image.width_f64(), image.height_f64())
        };
        self.viewport.fit_image(w, h, self.settings.fit_margin);
        tracing::debug!("Zoom to fit: {}", self.viewport);
        self.render();
        Ok(self.viewport.zoom())
    }

    /// Zooms toward a screen anchor. Returns the clamped zoom applied.
    pub fn apply_zoom(&mut self, target_zoom: f64, anchor_x: f64, anchor_y: f64) -> CanvasResult<f64> {
        self.require_image()?;
        check_finite("zoom", target_zoom)?;
        check_finite("anchor_x", anchor_x)?;
        check_finite("anchor_y", anchor_y)?;
        let zoom = self.viewport.apply_zoom(target_zoom, anchor_x, anchor_y);
        self.render();
        Ok(zoom)
    }

    /// Zooms about the viewport center.
    pub fn set_zoom(&mut self, zoom: f64) -> CanvasResult<f64> {
        let (cx, cy) = self.viewport_center();
        self.apply_zoom(zoom, cx, cy)
    }

    /// One wheel step in, about the viewport center.
    pub fn zoom_in(&mut self) -> CanvasResult<f64> {
        let target = self.zoom() * self.settings.wheel_zoom_step;
        self.set_zoom(target)
    }

    /// One wheel step out, about the viewport center.
    pub fn zoom_out(&mut self) -> CanvasResult<f64> {
        let target = self.zoom() / self.settings.wheel_zoom_step;
        self.set_zoom(target)
    }

    /// Pans by a screen-pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> CanvasResult<()> {
        self.require_image()?;
        check_finite("dx", dx)?;
        check_finite("dy", dy)?;
        self.viewport.pan_by(dx, dy);
        self.render();
        Ok(())
    }

    pub fn set_pan(&mut self, x: f64, y: f64) -> CanvasResult<()> {
        self.require_image()?;
        check_finite("pan_x", x)?;
        check_finite("pan_y", y)?;
        self.viewport.set_pan(x, y);
        self.render();
        Ok(())
    }

    fn viewport_center(&self) -> (f64, f64) {
        (
            self.viewport.canvas_width() / 2.0,
            self.viewport.canvas_height() / 2.0,
        )
    }

    pub fn screen_to_image(&self, sx: f64, sy: f64) -> Point {
        self.viewport.screen_to_image(sx, sy)
    }

    pub fn image_to_screen(&self, ix: f64, iy: f64) -> (f64, f64) {
        self.viewport.image_to_screen(ix, iy)
    }

    // ---------------------------------------------------------------------
    // Hit-testing
    // ---------------------------------------------------------------------

    /// Element under a screen point, if any.
    pub fn find_element_at(&self, sx: f64, sy: f64) -> Option<ElementId> {
        let p = self.screen_to_image(sx, sy);
        self.find_element_at_image(&p)
    }

    /// Element under an image-space point, using the current zoom for the
    /// pick radius.
    pub fn find_element_at_image(&self, p: &Point) -> Option<ElementId> {
        hit_test::find_element_at(&self.store, p, self.zoom(), &self.radii)
    }

    // ---------------------------------------------------------------------
    // Modes
    // ---------------------------------------------------------------------

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Switches mode. Entering or leaving calibrate mode clears any pending
    /// reference line. Ignored while a gesture is active.
    pub fn set_mode(&mut self, mode: InteractionMode) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        if mode != self.mode
            && (mode == InteractionMode::Calibrate || self.mode == InteractionMode::Calibrate)
        {
            self.calibration.reset();
        }
        self.mode = mode;
        self.render();
        true
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn calibration_line(&self) -> &CalibrationLine {
        &self.calibration
    }

    /// Keyboard shortcuts are suppressed while the host reports a focused
    /// text field.
    pub fn set_text_input_focused(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }

    // ---------------------------------------------------------------------
    // Hooks and rendering
    // ---------------------------------------------------------------------

    pub fn hooks_mut(&mut self) -> &mut CanvasHooks {
        &mut self.hooks
    }

    pub fn set_render_sink(&mut self, sink: impl RenderSink + 'static) {
        self.sink = Some(Box::new(sink));
        self.render();
    }

    pub fn clear_render_sink(&mut self) {
        self.sink = None;
    }

    /// The most recent frame, or `None` before an image is loaded.
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    /// Rebuilds the frame and pushes it to the sink. Does nothing without an
    /// image.
    pub fn render(&mut self) {
        let Some(frame) = svg_renderer::build_frame(self) else {
            return;
        };
        if let Some(sink) = self.sink.as_mut() {
            sink.present(&frame);
        }
        self.last_frame = Some(frame);
    }

    /// Standalone SVG of the current frame.
    pub fn svg_document(&self) -> Option<String> {
        self.last_frame.as_ref().map(svg_renderer::svg_document)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::from_valid_settings(EngineSettings::default())
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("elements", &self.store.len())
            .field("selected", &self.selection.selected_id())
            .field("viewport", &self.viewport)
            .field("mode", &self.mode)
            .field("gesture", &self.gesture)
            .field("image", &self.image)
            .field("hooks", &self.hooks)
            .finish()
    }
}

fn check_finite(field: &'static str, value: f64) -> CanvasResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CanvasError::InvalidViewport { field, value })
    }
}
