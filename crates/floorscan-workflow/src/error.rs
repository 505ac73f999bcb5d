//! Error types for the workflow controller.

use floorscan_canvas::CanvasError;
use floorscan_core::CoreError;
use floorscan_settings::SettingsError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Floors are numbered `1..=story_count`
    #[error("Floor {floor} is outside 1..={story_count}")]
    InvalidFloor { floor: u32, story_count: u32 },

    #[error("Floor {0} has no image")]
    NoImage(u32),

    #[error("Floor {0} has not been analyzed")]
    NotAnalyzed(u32),

    #[error("No floor is active")]
    NoActiveFloor,

    /// An analysis request for this floor has not finished yet
    #[error("Analysis already in flight for floor {0}")]
    AnalysisInFlight(u32),

    /// The ticket no longer matches the floor's outstanding request
    #[error("Analysis ticket {request_id} for floor {floor} is stale")]
    StaleTicket { floor: u32, request_id: Uuid },

    #[error("Analysis failed for floor {floor}: {reason}")]
    Analysis { floor: u32, reason: String },

    #[error("No calibration line has been measured")]
    NoPendingCalibration,

    #[error("Image decode failed for {source_ref}: {reason}")]
    ImageDecode { source_ref: String, reason: String },

    #[error("Background task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkflowError {
    pub fn analysis(floor: u32, reason: impl Into<String>) -> Self {
        Self::Analysis {
            floor,
            reason: reason.into(),
        }
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
