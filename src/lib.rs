//! # FloorScan
//!
//! Turns a scanned floor plan into calibrated building geometry:
//! - Displays the scan and overlays OCR-detected points per layer
//! - Converts points into walls, doors, windows and fixtures
//! - Lets the user correct elements by dragging, rotating and deleting
//! - Calibrates pixels to feet from a reference line or a typed ratio
//! - Exports accepted floors as a multi-level manifest in feet
//!
//! ## Architecture
//!
//! FloorScan is organized as a workspace with multiple crates:
//!
//! 1. **floorscan-core** - Geometry, units, OCR data model, errors
//! 2. **floorscan-settings** - Engine tuning and project configuration
//! 3. **floorscan-canvas** - Interactive canvas engine
//! 4. **floorscan-workflow** - Per-floor workflow controller and manifest export
//! 5. **floorscan** - This crate: re-exports, logging setup and the session driver

pub use floorscan_canvas as canvas;
pub use floorscan_settings as settings;
pub use floorscan_workflow as workflow;

pub use floorscan_canvas::{
    Canvas, CanvasError, Element, ElementId, ElementKind, FloorImage, InteractionMode,
    InteractionOutcome, Key, PointerButton, RenderFrame, ScaleState, ViewTransform,
};
pub use floorscan_core::{Layer, OcrLayers, OcrPoint, Point, ScaleHint, ScaleRatio};
pub use floorscan_settings::{Config, EngineSettings, ProjectConfig};
pub use floorscan_workflow::{
    AnalysisResponse, AnalysisTicket, FloorAnalyzer, Manifest, Session, WorkflowController,
    WorkflowError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, keeping stdout for the manifest
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
