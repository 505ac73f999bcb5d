//! Architectural elements edited on the canvas.
//!
//! An [`Element`] is a tagged variant over walls, doors, windows and point
//! fixtures. Hit-testing, moving and rotating all match on the variant.

use serde::{Deserialize, Serialize};
use std::fmt;

use floorscan_core::Point;

mod fixture;
mod opening;
mod wall;

pub use fixture::{Fixture, FixtureKind};
pub use opening::{normalize_degrees, Opening};
pub use wall::{Wall, WallCategory};

/// Stable handle for an element. Assigned at creation, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element category, declared in hit-test priority order.
///
/// The derived `Ord` is the priority: `Door` wins over everything, `Wall`
/// loses to everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Door,
    Window,
    Plumbing,
    Kitchen,
    Wall,
}

impl ElementKind {
    pub fn is_point(&self) -> bool {
        !matches!(self, Self::Wall)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Wall(Wall),
    Door(Opening),
    Window(Opening),
    Fixture(Fixture),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Wall(_) => ElementKind::Wall,
            Element::Door(_) => ElementKind::Door,
            Element::Window(_) => ElementKind::Window,
            Element::Fixture(f) => match f.kind {
                FixtureKind::Plumbing => ElementKind::Plumbing,
                FixtureKind::Kitchen => ElementKind::Kitchen,
            },
        }
    }

    /// Center point. For walls this is the segment midpoint.
    pub fn center(&self) -> Point {
        match self {
            Element::Wall(w) => w.center(),
            Element::Door(o) | Element::Window(o) => o.center,
            Element::Fixture(f) => f.center,
        }
    }

    /// Image-space distance used by hit-testing: point distance to the center
    /// for point elements, point-to-segment distance for walls.
    pub fn hit_distance(&self, p: &Point) -> f64 {
        match self {
            Element::Wall(w) => w.distance_to(p),
            _ => self.center().distance_to(p),
        }
    }

    pub fn rotation_deg(&self) -> Option<f64> {
        match self {
            Element::Wall(_) => None,
            Element::Door(o) | Element::Window(o) => Some(o.rotation_deg),
            Element::Fixture(f) => Some(f.rotation_deg),
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Element::Wall(w) => w.confidence,
            Element::Door(o) | Element::Window(o) => o.confidence,
            Element::Fixture(f) => f.confidence,
        }
    }

    pub fn is_rotatable(&self) -> bool {
        !matches!(self, Element::Wall(_))
    }

    /// Translates the element by an image-space delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Element::Wall(w) => w.translate(dx, dy),
            Element::Door(o) | Element::Window(o) => o.center = o.center.offset(dx, dy),
            Element::Fixture(f) => f.center = f.center.offset(dx, dy),
        }
    }

    /// Moves the element so its center lands on `(x, y)`.
    ///
    /// Walls translate rigidly by the center delta; their length and
    /// direction are preserved.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let c = self.center();
        self.translate(x - c.x, y - c.y);
    }

    /// Advances the rotation by `step_deg`, modulo 360. Returns the new
    /// rotation, or `None` for walls which do not rotate.
    pub fn rotate(&mut self, step_deg: f64) -> Option<f64> {
        let rotation = match self {
            Element::Wall(_) => return None,
            Element::Door(o) | Element::Window(o) => &mut o.rotation_deg,
            Element::Fixture(f) => &mut f.rotation_deg,
        };
        *rotation = normalize_degrees(*rotation + step_deg);
        Some(*rotation)
    }

    pub fn as_wall(&self) -> Option<&Wall> {
        match self {
            Element::Wall(w) => Some(w),
            _ => None,
        }
    }
}
