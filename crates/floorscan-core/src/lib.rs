//! # FloorScan Core
//!
//! Core types and utilities shared by the FloorScan crates.
//! Provides image-space geometry, pixel/feet unit conversion, the raw OCR
//! data model consumed by the canvas engine, and the common error types.

pub mod constants;
pub mod data;
pub mod error;
pub mod geometry;
pub mod types;
pub mod units;

pub use data::{Layer, OcrLayers, OcrPoint, ScaleHint};
pub use error::{CoreError, Error, Result};
pub use geometry::{point_segment_distance, Point, Segment};
pub use units::{pixels_to_feet, round_to, ScaleRatio, FEET_PRECISION};

// Re-export type aliases for convenience
pub use types::{shared, thread_safe, DataCallback, Shared, ThreadSafe};
