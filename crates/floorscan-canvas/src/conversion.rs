//! OCR point to geometry conversion.
//!
//! Turns the raw per-layer OCR points of one floor into typed elements:
//!
//! - exterior points, sorted by `order`, form a closed wall polygon
//! - interior points are grouped by `pair`; each `start`/`end` couple is
//!   one wall, incomplete couples are dropped
//! - door and window points become openings oriented by `facing` /
//!   `wall_side`
//! - plumbing and kitchen points become labelled markers
//!
//! Conversion is a pure function of the raw layers, so running it twice on
//! the same input yields the same elements in the same order.

use std::collections::HashMap;

use floorscan_core::constants::{DEFAULT_CONFIDENCE, DEFAULT_DOOR_WIDTH_PX, DEFAULT_WINDOW_WIDTH_PX};
use floorscan_core::{OcrLayers, OcrPoint};
use floorscan_settings::EngineSettings;

use crate::model::{Element, Fixture, FixtureKind, Opening, Wall, WallCategory};

/// Defaults applied when an OCR point leaves a field empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionOptions {
    pub default_door_width_px: f64,
    pub default_window_width_px: f64,
    pub default_confidence: f64,
}

impl ConversionOptions {
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self {
            default_door_width_px: settings.default_door_width_px,
            default_window_width_px: settings.default_window_width_px,
            default_confidence: settings.default_confidence,
        }
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            default_door_width_px: DEFAULT_DOOR_WIDTH_PX,
            default_window_width_px: DEFAULT_WINDOW_WIDTH_PX,
            default_confidence: DEFAULT_CONFIDENCE,
        }
    }
}

/// Output of one conversion pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedGeometry {
    /// Exterior walls, interior walls, doors, windows, plumbing, kitchen,
    /// in that order.
    pub elements: Vec<Element>,
    /// Interior pair ids that lacked a start or an end.
    pub dropped_pairs: Vec<String>,
}

impl ConvertedGeometry {
    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.elements.iter().filter_map(Element::as_wall)
    }
}

/// Converts every layer of `layers` into elements.
pub fn convert_layers(layers: &OcrLayers, options: &ConversionOptions) -> ConvertedGeometry {
    let mut elements = Vec::with_capacity(layers.total_points());

    let exterior = exterior_walls(layers, options);
    let (interior, dropped_pairs) = interior_walls(&layers.interior_walls, options);
    let n_exterior = exterior.len();
    let n_interior = interior.len();

    elements.extend(exterior.into_iter().map(Element::Wall));
    elements.extend(interior.into_iter().map(Element::Wall));

    elements.extend(layers.doors.iter().map(|p| {
        Element::Door(
            Opening::new(
                p.position(),
                p.tag.clone().unwrap_or_else(|| "single".to_string()),
                p.width.unwrap_or(options.default_door_width_px),
            )
            .with_rotation(facing_rotation(p.facing.as_deref()))
            .with_confidence(confidence_of(p, options)),
        )
    }));

    elements.extend(layers.windows.iter().map(|p| {
        Element::Window(
            Opening::new(
                p.position(),
                p.tag.clone().unwrap_or_else(|| "fixed".to_string()),
                p.width.unwrap_or(options.default_window_width_px),
            )
            .with_rotation(wall_side_rotation(p.wall_side.as_deref()))
            .with_confidence(confidence_of(p, options)),
        )
    }));

    for (points, kind) in [
        (&layers.plumbing, FixtureKind::Plumbing),
        (&layers.kitchen, FixtureKind::Kitchen),
    ] {
        elements.extend(points.iter().map(|p| {
            Element::Fixture(
                Fixture::new(
                    p.position(),
                    kind,
                    p.tag.clone().unwrap_or_else(|| kind.as_str().to_string()),
                )
                .with_confidence(confidence_of(p, options)),
            )
        }));
    }

    if !dropped_pairs.is_empty() {
        tracing::debug!(
            "Dropped {} incomplete interior wall pair(s): {:?}",
            dropped_pairs.len(),
            dropped_pairs
        );
    }
    tracing::debug!(
        "Converted OCR layers: {} exterior walls, {} interior walls, {} doors, {} windows, {} fixtures",
        n_exterior,
        n_interior,
        layers.doors.len(),
        layers.windows.len(),
        layers.plumbing.len() + layers.kitchen.len()
    );

    ConvertedGeometry {
        elements,
        dropped_pairs,
    }
}

/// Builds the closed exterior polygon.
///
/// N ordered points give N walls, the last joining back to the first. Fewer
/// than two points cannot form a wall and give none.
pub fn exterior_walls(layers: &OcrLayers, options: &ConversionOptions) -> Vec<Wall> {
    let ordered = layers.ordered_exterior();
    if ordered.len() < 2 {
        return Vec::new();
    }

    let n = ordered.len();
    (0..n)
        .map(|i| {
            let a = ordered[i];
            let b = ordered[(i + 1) % n];
            Wall::new(a.position(), b.position(), WallCategory::Exterior)
                .with_confidence(confidence_of(a, options).min(confidence_of(b, options)))
        })
        .collect()
}

/// Pairs interior points into walls. Returns the walls in first-seen pair
/// order and the ids of pairs that were incomplete.
pub fn interior_walls(points: &[OcrPoint], options: &ConversionOptions) -> (Vec<Wall>, Vec<String>) {
    let mut order: Vec<&str> = Vec::new();
    let mut ends: HashMap<&str, (Option<&OcrPoint>, Option<&OcrPoint>)> = HashMap::new();

    for point in points {
        let Some(pair) = point.pair.as_deref() else {
            continue;
        };
        let entry = ends.entry(pair).or_insert_with(|| {
            order.push(pair);
            (None, None)
        });
        match point.tag.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("start") => {
                entry.0.get_or_insert(point);
            }
            Some("end") => {
                entry.1.get_or_insert(point);
            }
            _ => {}
        }
    }

    let mut walls = Vec::new();
    let mut dropped = Vec::new();
    for pair in order {
        match ends.get(pair) {
            Some((Some(start), Some(end))) => walls.push(
                Wall::new(start.position(), end.position(), WallCategory::Interior).with_confidence(
                    confidence_of(start, options).min(confidence_of(end, options)),
                ),
            ),
            _ => dropped.push(pair.to_string()),
        }
    }
    (walls, dropped)
}

/// Door rotation from its compass facing. Unknown or missing facings give 0.
pub fn facing_rotation(facing: Option<&str>) -> f64 {
    match facing.map(|f| f.trim().to_ascii_lowercase()).as_deref() {
        Some("north") | Some("n") => 270.0,
        Some("south") | Some("s") => 90.0,
        Some("west") | Some("w") => 180.0,
        _ => 0.0,
    }
}

/// Window rotation from the wall side it sits on.
pub fn wall_side_rotation(side: Option<&str>) -> f64 {
    match side.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("east") | Some("west") | Some("e") | Some("w") => 90.0,
        _ => 0.0,
    }
}

fn confidence_of(point: &OcrPoint, options: &ConversionOptions) -> f64 {
    point
        .confidence
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(options.default_confidence)
}
