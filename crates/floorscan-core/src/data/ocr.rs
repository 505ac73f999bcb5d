use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::geometry::Point;

/// One OCR-detected category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    ExteriorWalls,
    InteriorWalls,
    Doors,
    Windows,
    Plumbing,
    Kitchen,
}

impl Layer {
    pub const ALL: [Layer; 6] = [
        Layer::ExteriorWalls,
        Layer::InteriorWalls,
        Layer::Doors,
        Layer::Windows,
        Layer::Plumbing,
        Layer::Kitchen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExteriorWalls => "exterior_walls",
            Self::InteriorWalls => "interior_walls",
            Self::Doors => "doors",
            Self::Windows => "windows",
            Self::Plumbing => "plumbing",
            Self::Kitchen => "kitchen",
        }
    }

    /// Overlay marker colour for raw points on this layer.
    pub fn color(&self) -> &'static str {
        match self {
            Self::ExteriorWalls => "#e74c3c",
            Self::InteriorWalls => "#e67e22",
            Self::Doors => "#27ae60",
            Self::Windows => "#3498db",
            Self::Plumbing => "#16a085",
            Self::Kitchen => "#9b59b6",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exterior_walls" | "exterior" => Ok(Self::ExteriorWalls),
            "interior_walls" | "interior" => Ok(Self::InteriorWalls),
            "doors" | "door" => Ok(Self::Doors),
            "windows" | "window" => Ok(Self::Windows),
            "plumbing" => Ok(Self::Plumbing),
            "kitchen" => Ok(Self::Kitchen),
            other => Err(CoreError::UnknownLayer(other.to_string())),
        }
    }
}

/// A single raw OCR point in image pixels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OcrPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    /// Wall id shared by the start and end points of one interior wall.
    /// The OCR service emits either numbers or strings here.
    #[serde(
        default,
        deserialize_with = "deserialize_pair",
        skip_serializing_if = "Option::is_none"
    )]
    pub pair: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_side: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl OcrPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn with_order(mut self, order: f64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    pub fn with_facing(mut self, facing: impl Into<String>) -> Self {
        self.facing = Some(facing.into());
        self
    }

    pub fn with_wall_side(mut self, side: impl Into<String>) -> Self {
        self.wall_side = Some(side.into());
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

fn deserialize_pair<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Raw OCR output for one floor, grouped by layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OcrLayers {
    #[serde(default)]
    pub exterior_walls: Vec<OcrPoint>,
    #[serde(default)]
    pub interior_walls: Vec<OcrPoint>,
    #[serde(default)]
    pub doors: Vec<OcrPoint>,
    #[serde(default)]
    pub windows: Vec<OcrPoint>,
    #[serde(default)]
    pub plumbing: Vec<OcrPoint>,
    #[serde(default)]
    pub kitchen: Vec<OcrPoint>,
}

impl OcrLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups a flat point list by each point's `layer` field.
    pub fn from_points(points: Vec<OcrPoint>) -> Result<Self, CoreError> {
        let mut layers = Self::new();
        for point in points {
            let layer = point
                .layer
                .ok_or_else(|| CoreError::UnknownLayer("<missing>".to_string()))?;
            layers.layer_mut(layer).push(point);
        }
        Ok(layers)
    }

    pub fn layer(&self, layer: Layer) -> &[OcrPoint] {
        match layer {
            Layer::ExteriorWalls => &self.exterior_walls,
            Layer::InteriorWalls => &self.interior_walls,
            Layer::Doors => &self.doors,
            Layer::Windows => &self.windows,
            Layer::Plumbing => &self.plumbing,
            Layer::Kitchen => &self.kitchen,
        }
    }

    pub fn layer_mut(&mut self, layer: Layer) -> &mut Vec<OcrPoint> {
        match layer {
            Layer::ExteriorWalls => &mut self.exterior_walls,
            Layer::InteriorWalls => &mut self.interior_walls,
            Layer::Doors => &mut self.doors,
            Layer::Windows => &mut self.windows,
            Layer::Plumbing => &mut self.plumbing,
            Layer::Kitchen => &mut self.kitchen,
        }
    }

    /// Iterates every point together with the layer it belongs to.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &OcrPoint)> + '_ {
        Layer::ALL
            .into_iter()
            .flat_map(move |layer| self.layer(layer).iter().map(move |p| (layer, p)))
    }

    pub fn total_points(&self) -> usize {
        Layer::ALL.iter().map(|l| self.layer(*l).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_points() == 0
    }

    /// Exterior points sorted ascending by `order`.
    ///
    /// Points without an order sort after ordered ones, keeping their input
    /// order among themselves.
    pub fn ordered_exterior(&self) -> Vec<&OcrPoint> {
        let mut points: Vec<&OcrPoint> = self.exterior_walls.iter().collect();
        points.sort_by(|a, b| match (a.order, b.order) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        points
    }
}

/// Scale the OCR service detected on the drawing, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleHint {
    #[serde(alias = "pixelsPerFoot")]
    pub pixels_per_foot: f64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub detected: bool,
}

impl ScaleHint {
    pub fn detected(pixels_per_foot: f64, confidence: f64) -> Self {
        Self {
            pixels_per_foot,
            confidence,
            detected: true,
        }
    }

    /// True when the hint carries a ratio that can be divided by.
    pub fn is_usable(&self) -> bool {
        self.detected && self.pixels_per_foot.is_finite() && self.pixels_per_foot > 0.0
    }
}
