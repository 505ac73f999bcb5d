//! Raw OCR data model.
//!
//! These types describe what the external OCR service hands back for one
//! floor: tagged points grouped by layer, plus a detected-scale hint. They
//! are read-only input to the canvas engine; interaction never mutates them.

mod ocr;

pub use ocr::{Layer, OcrLayers, OcrPoint, ScaleHint};
