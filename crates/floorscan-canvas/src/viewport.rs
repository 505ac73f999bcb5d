//! Viewport and coordinate transformation for canvas rendering.
//!
//! Handles conversion between screen coordinates (viewport pixels) and image
//! coordinates (floor-plan pixels). Manages zoom and pan operations with
//! proper coordinate mapping.
//!
//! Both spaces have their origin at the top-left with +Y pointing down, so
//! the mapping is a uniform scale followed by a translation:
//!
//! ```text
//! screen = image * zoom + pan
//! image  = (screen - pan) / zoom
//! ```

use std::fmt;

use floorscan_core::constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, MAX_ZOOM, MIN_ZOOM};
use floorscan_core::Point;
use serde::{Deserialize, Serialize};

/// The zoom/pan pair shared by image rendering, overlay rendering and
/// hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Converts screen coordinates to image coordinates.
    pub fn screen_to_image(&self, sx: f64, sy: f64) -> Point {
        Point::new((sx - self.pan_x) / self.zoom, (sy - self.pan_y) / self.zoom)
    }

    /// Converts image coordinates to screen coordinates.
    pub fn image_to_screen(&self, ix: f64, iy: f64) -> (f64, f64) {
        (ix * self.zoom + self.pan_x, iy * self.zoom + self.pan_y)
    }

    pub fn image_point_to_screen(&self, p: &Point) -> (f64, f64) {
        self.image_to_screen(p.x, p.y)
    }

    /// Converts a screen-pixel length to an image-pixel length.
    pub fn screen_len_to_image(&self, len: f64) -> f64 {
        len / self.zoom
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    transform: ViewTransform,
    min_zoom: f64,
    max_zoom: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a new viewport with initial dimensions and default zoom bounds.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self::with_zoom_bounds(canvas_width, canvas_height, MIN_ZOOM, MAX_ZOOM)
    }

    /// Creates a viewport whose zoom is clamped to `[min_zoom, max_zoom]`.
    pub fn with_zoom_bounds(
        canvas_width: f64,
        canvas_height: f64,
        min_zoom: f64,
        max_zoom: f64,
    ) -> Self {
        Self {
            transform: ViewTransform::identity(),
            min_zoom,
            max_zoom,
            canvas_width,
            canvas_height,
        }
    }

    /// Gets the canvas width.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Gets the canvas height.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// The current transform. Rendering and hit-testing both read this.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Clamps a requested zoom into the allowed range.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Sets the zoom level without moving the pan, clamped to the bounds.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.transform.zoom = self.clamp_zoom(zoom);
        }
    }

    /// Gets the pan offset (X coordinate).
    pub fn pan_x(&self) -> f64 {
        self.transform.pan_x
    }

    /// Gets the pan offset (Y coordinate).
    pub fn pan_y(&self) -> f64 {
        self.transform.pan_y
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.transform.pan_x = x;
        self.transform.pan_y = y;
    }

    /// Pans by a screen-pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.transform.pan_x += dx;
        self.transform.pan_y += dy;
    }

    /// Converts screen coordinates to image coordinates.
    pub fn screen_to_image(&self, sx: f64, sy: f64) -> Point {
        self.transform.screen_to_image(sx, sy)
    }

    /// Converts image coordinates to screen coordinates.
    pub fn image_to_screen(&self, ix: f64, iy: f64) -> (f64, f64) {
        self.transform.image_to_screen(ix, iy)
    }

    /// Zooms toward a screen anchor, keeping the image point under it fixed.
    ///
    /// The image point under `(anchor_x, anchor_y)` is taken before the
    /// zoom changes, then the pan is solved so that
    /// `anchor = image * new_zoom + new_pan` holds for that same point.
    /// Returns the zoom actually applied after clamping.
    pub fn apply_zoom(&mut self, target_zoom: f64, anchor_x: f64, anchor_y: f64) -> f64 {
        let new_zoom = self.clamp_zoom(target_zoom);
        let anchored = self.screen_to_image(anchor_x, anchor_y);

        self.transform.zoom = new_zoom;
        self.transform.pan_x = anchor_x - anchored.x * new_zoom;
        self.transform.pan_y = anchor_y - anchored.y * new_zoom;
        new_zoom
    }

    /// Fits an image of the given size into the viewport and centers it.
    ///
    /// `margin` is the fraction of the limiting viewport dimension the image
    /// occupies (e.g. 0.95). Does nothing for non-positive sizes.
    pub fn fit_image(&mut self, image_width: f64, image_height: f64, margin: f64) {
        if image_width <= 0.0 || image_height <= 0.0 {
            return;
        }

        let zoom_x = self.canvas_width / image_width;
        let zoom_y = self.canvas_height / image_height;

        // Use the smaller zoom to fit everything
        let new_zoom = self.clamp_zoom(zoom_x.min(zoom_y) * margin);

        self.transform.zoom = new_zoom;
        self.transform.pan_x = (self.canvas_width - image_width * new_zoom) / 2.0;
        self.transform.pan_y = (self.canvas_height - image_height * new_zoom) / 2.0;
    }

    /// Centers the viewport on an image coordinate.
    pub fn center_on(&mut self, image_x: f64, image_y: f64) {
        self.transform.pan_x = self.canvas_width / 2.0 - image_x * self.transform.zoom;
        self.transform.pan_y = self.canvas_height / 2.0 - image_y * self.transform.zoom;
    }

    /// Resets viewport to default state (1:1 zoom, no pan).
    pub fn reset(&mut self) {
        self.transform = ViewTransform::identity();
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.transform.zoom, self.transform.pan_x, self.transform.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}
