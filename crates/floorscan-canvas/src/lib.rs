//! # FloorScan Canvas
//!
//! Interactive canvas engine for scanned floor plans. Displays a backdrop
//! image, overlays raw OCR points, converts them into typed architectural
//! elements and lets the user edit those elements by direct manipulation.
//!
//! ## Architecture
//!
//! ```text
//! Canvas (engine instance)
//!   ├── Viewport (zoom/pan, screen <-> image)
//!   ├── ElementStore (id-keyed walls, doors, windows, fixtures)
//!   ├── SelectionManager (single selection)
//!   ├── Interaction (select / pan / calibrate modes, wheel, keys)
//!   ├── CanvasHooks (select, move, rotate, delete, calibrate)
//!   └── RenderFrame (SVG projection pushed to a RenderSink)
//!
//! Conversion (OCR layers -> elements)
//! Calibration (reference line / direct entry -> px per foot)
//! ```
//!
//! The engine performs no I/O. Images arrive already decoded as a
//! [`FloorImage`] reference plus dimensions.

pub mod calibration;
pub mod canvas;
pub mod conversion;
pub mod element_store;
pub mod error;
pub mod hooks;
pub mod image;
pub mod model;
pub mod selection_manager;
pub mod svg_renderer;
pub mod viewport;

pub use calibration::{CalibrationLine, ScaleSource, ScaleState};
pub use canvas::{Canvas, Gesture, InteractionMode, InteractionOutcome, Key, PointerButton};
pub use conversion::{convert_layers, ConversionOptions, ConvertedGeometry};
pub use element_store::ElementStore;
pub use error::{CanvasError, CanvasResult};
pub use hit_test::PickRadii;
pub use hooks::{CanvasHooks, ElementEvent};
pub use image::FloorImage;
pub use model::{Element, ElementId, ElementKind, Fixture, FixtureKind, Opening, Wall, WallCategory};
pub use svg_renderer::{RenderFrame, RenderSink};
pub use viewport::{ViewTransform, Viewport};
