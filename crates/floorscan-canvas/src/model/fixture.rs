use serde::{Deserialize, Serialize};

use floorscan_core::{Layer, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    Plumbing,
    Kitchen,
}

impl FixtureKind {
    pub fn layer(&self) -> Layer {
        match self {
            Self::Plumbing => Layer::Plumbing,
            Self::Kitchen => Layer::Kitchen,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plumbing => "plumbing",
            Self::Kitchen => "kitchen",
        }
    }
}

/// A labelled point marker (sink, toilet, range, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub center: Point,
    pub kind: FixtureKind,
    pub tag: String,
    #[serde(default)]
    pub rotation_deg: f64,
    pub confidence: f64,
}

impl Fixture {
    pub fn new(center: Point, kind: FixtureKind, tag: impl Into<String>) -> Self {
        Self {
            center,
            kind,
            tag: tag.into(),
            rotation_deg: 0.0,
            confidence: 1.0,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}
