//! Canvas type definitions: InteractionMode, PointerButton, Key, Gesture, InteractionOutcome.

use floorscan_core::Point;

use crate::model::ElementId;

/// What a primary-button press does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Press on an element selects and drags it; press on empty space
    /// deselects and pans.
    #[default]
    Select,
    /// Press always pans.
    Pan,
    /// Presses place the two endpoints of a reference line, then the mode
    /// falls back to `Select`.
    Calibrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Char(char),
}

/// The pointer gesture currently in progress. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Dragging an element; `offset` is center minus grab point, in image
    /// pixels, so the element does not jump under the pointer.
    Dragging { id: ElementId, offset_x: f64, offset_y: f64 },
    /// Panning; pan is recomputed from the grab point on every move.
    Panning {
        grab_x: f64,
        grab_y: f64,
        start_pan_x: f64,
        start_pan_y: f64,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

/// What an input event did, reported in addition to any hook calls.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// The event had no effect.
    Ignored,
    /// Selection changed or was confirmed; `None` means cleared.
    Selected(Option<ElementId>),
    /// A pan gesture started.
    PanStarted,
    /// An element was dragged to a new center.
    Moved { id: ElementId, center: Point },
    /// The viewport was panned.
    Panned { pan_x: f64, pan_y: f64 },
    /// The first calibration endpoint was placed.
    CalibrationPoint(Point),
    /// The second endpoint was placed; the line measures `pixels`.
    CalibrationMeasured { pixels: f64 },
    /// Calibration was abandoned with Escape.
    CalibrationCancelled,
    Deleted(ElementId),
    Rotated { id: ElementId, rotation_deg: f64 },
    Zoomed { zoom: f64 },
}
