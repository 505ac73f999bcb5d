//! # FloorScan Workflow
//!
//! Project-level controller around the canvas engine. Tracks each floor's
//! image, OCR analysis, scale and acceptance, shows one floor at a time on
//! the [`floorscan_canvas::Canvas`], and exports the accepted floors as a
//! manifest in feet.
//!
//! ```text
//! WorkflowController
//!   ├── FloorState per floor (image, analysis, scale, accepted, frozen set)
//!   ├── InFlightRegistry (one analysis request per floor)
//!   ├── Canvas (active floor only)
//!   └── export -> Manifest
//! ```
//!
//! OCR runs outside this crate behind [`FloorAnalyzer`].

pub mod analysis;
pub mod error;
pub mod floor;
pub mod image_loader;
pub mod manifest;
pub mod session;
pub mod workflow_state;

pub use analysis::{AnalysisResponse, AnalysisTicket, FloorAnalyzer, InFlightRegistry};
pub use error::{WorkflowError, WorkflowResult};
pub use floor::{FloorAnalysis, FloorState};
pub use manifest::{
    build_manifest, FloorExport, Manifest, ManifestFixture, ManifestFloor, ManifestWall, ScanMeta,
};
pub use session::{Session, SessionFloor, SessionImage};
pub use workflow_state::WorkflowController;
