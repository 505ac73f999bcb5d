//! OCR analysis requests.
//!
//! The OCR model itself is an external service behind [`FloorAnalyzer`].
//! A request is represented by an [`AnalysisTicket`]; while a ticket for a
//! floor is alive, no second request for that floor can be issued.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use floorscan_canvas::FloorImage;
use floorscan_core::{thread_safe, OcrLayers, ScaleHint, ThreadSafe};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{WorkflowError, WorkflowResult};

/// What the OCR service returns for one floor image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub layers: OcrLayers,
    #[serde(default)]
    pub scale: ScaleHint,
}

/// External OCR analysis service.
#[async_trait]
pub trait FloorAnalyzer: Send + Sync {
    /// Analyzes one floor image. Errors are reported to the user by the
    /// caller; the floor's previous state is kept.
    async fn analyze(&self, floor: u32, image: &FloorImage) -> WorkflowResult<AnalysisResponse>;
}

/// Floors with an outstanding request, keyed to the request id.
#[derive(Debug, Clone, Default)]
pub struct InFlightRegistry {
    inner: ThreadSafe<HashMap<u32, Uuid>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self {
            inner: thread_safe(HashMap::new()),
        }
    }

    /// Claims `floor` for a new request.
    pub fn issue(&self, floor: u32) -> WorkflowResult<AnalysisTicket> {
        let mut map = self.inner.lock();
        if map.contains_key(&floor) {
            return Err(WorkflowError::AnalysisInFlight(floor));
        }
        let request_id = Uuid::new_v4();
        map.insert(floor, request_id);
        Ok(AnalysisTicket {
            floor,
            request_id,
            issued_at: Utc::now(),
            registry: self.clone(),
        })
    }

    pub fn is_in_flight(&self, floor: u32) -> bool {
        self.inner.lock().contains_key(&floor)
    }

    /// True when `ticket` is still the floor's outstanding request.
    pub fn is_current(&self, ticket: &AnalysisTicket) -> bool {
        self.inner.lock().get(&ticket.floor) == Some(&ticket.request_id)
    }

    /// Forgets the floor's outstanding request, making its ticket stale.
    pub fn abandon(&self, floor: u32) -> bool {
        self.inner.lock().remove(&floor).is_some()
    }

    fn release(&self, floor: u32, request_id: Uuid) {
        let mut map = self.inner.lock();
        if map.get(&floor) == Some(&request_id) {
            map.remove(&floor);
        }
    }
}

/// Handle for one outstanding analysis request.
///
/// Dropping the ticket releases the floor, so an abandoned request (for
/// instance a cancelled future) never blocks the floor forever.
#[derive(Debug)]
pub struct AnalysisTicket {
    floor: u32,
    request_id: Uuid,
    issued_at: DateTime<Utc>,
    registry: InFlightRegistry,
}

impl AnalysisTicket {
    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

impl Drop for AnalysisTicket {
    fn drop(&mut self) {
        self.registry.release(self.floor, self.request_id);
    }
}
