//! Shared numeric defaults.

/// Smallest zoom factor the viewport accepts.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest zoom factor the viewport accepts.
pub const MAX_ZOOM: f64 = 12.0;

/// Multiplicative zoom change per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Fraction of the viewport the image occupies after zoom-to-fit.
pub const FIT_MARGIN: f64 = 0.95;

/// Pick radius for doors, windows and fixtures, in screen pixels.
pub const POINT_PICK_RADIUS_PX: f64 = 15.0;

/// Pick radius for walls, in screen pixels.
pub const WALL_PICK_RADIUS_PX: f64 = 8.0;

/// Rotation applied by one "rotate" command.
pub const ROTATION_STEP_DEG: f64 = 90.0;

/// Nominal door width when the OCR point carries none.
pub const DEFAULT_DOOR_WIDTH_PX: f64 = 30.0;

/// Nominal window width when the OCR point carries none.
pub const DEFAULT_WINDOW_WIDTH_PX: f64 = 40.0;

/// Confidence assigned to derived elements when the OCR point carries none.
pub const DEFAULT_CONFIDENCE: f64 = 0.9;

/// Viewport size used before the host reports a real one.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1200.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;
