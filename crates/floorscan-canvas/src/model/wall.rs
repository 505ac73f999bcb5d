use serde::{Deserialize, Serialize};

use floorscan_core::{Point, Segment};

/// Which side of the building envelope a wall belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallCategory {
    Interior,
    Exterior,
}

impl WallCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interior => "interior",
            Self::Exterior => "exterior",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub start: Point,
    pub end: Point,
    pub category: WallCategory,
    pub structural: bool,
    pub confidence: f64,
}

impl Wall {
    /// Exterior walls default to structural, interior walls do not.
    pub fn new(start: Point, end: Point, category: WallCategory) -> Self {
        Self {
            start,
            end,
            category,
            structural: category == WallCategory::Exterior,
            confidence: 1.0,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }

    pub fn center(&self) -> Point {
        self.start.midpoint(&self.end)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn distance_to(&self, p: &Point) -> f64 {
        self.segment().distance_to_point(p)
    }

    /// Rigid translation: both endpoints move by the same delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.start = self.start.offset(dx, dy);
        self.end = self.end.offset(dx, dy);
    }
}
