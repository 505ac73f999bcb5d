//! Multi-floor manifest export.
//!
//! Every geometric field is in feet, rounded to
//! [`floorscan_core::FEET_PRECISION`] places. Floors are labelled by their
//! 1-based floor number, never by image order.

use chrono::{DateTime, Utc};
use floorscan_canvas::{Element, FixtureKind, Wall, WallCategory};
use floorscan_core::{OcrLayers, ScaleRatio};
use floorscan_settings::ProjectConfig;
use serde::{Deserialize, Serialize};

pub const UNITS: &str = "feet";

pub const FAMILY_DOORS: &str = "Doors";
pub const FAMILY_WINDOWS: &str = "Windows";
pub const FAMILY_PLUMBING: &str = "Plumbing Fixtures";
pub const FAMILY_CASEWORK: &str = "Casework";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanMeta {
    pub project_type: String,
    pub foundation_type: String,
    pub story_count: u32,
    pub units: String,
    pub generator: String,
    /// RFC 3339
    pub exported_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestWall {
    #[serde(rename = "type")]
    pub wall_type: String,
    pub level: String,
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub structural: bool,
}

impl ManifestWall {
    pub fn length(&self) -> f64 {
        let dx = self.end[0] - self.start[0];
        let dy = self.end[1] - self.start[1];
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestFixture {
    pub family: String,
    #[serde(rename = "type")]
    pub fixture_type: String,
    pub point: [f64; 2],
    pub level: String,
    /// Index into [`Manifest::walls`] of the nearest wall on the same floor.
    pub host_wall_index: Option<usize>,
    pub rotation_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestFloor {
    #[serde(rename = "type")]
    pub floor_type: String,
    pub level: String,
    pub boundary: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub scan_meta: ScanMeta,
    pub walls: Vec<ManifestWall>,
    pub fixtures: Vec<ManifestFixture>,
    pub floors: Vec<ManifestFloor>,
}

impl Manifest {
    pub fn walls_on<'a>(&'a self, level: &'a str) -> impl Iterator<Item = &'a ManifestWall> + 'a {
        self.walls.iter().filter(move |w| w.level == level)
    }
}

/// One accepted, calibrated floor ready for export.
#[derive(Debug, Clone, Copy)]
pub struct FloorExport<'a> {
    /// 1-based floor number
    pub floor: u32,
    pub ratio: ScaleRatio,
    pub elements: &'a [Element],
    /// Raw OCR data; the ordered exterior points form the boundary
    pub layers: &'a OcrLayers,
}

/// Assembles the manifest from calibrated floors.
///
/// Returns `None` when `floors` is empty, since there is then no scale to
/// express anything in feet.
pub fn build_manifest(
    project: &ProjectConfig,
    floors: &[FloorExport<'_>],
    exported_at: DateTime<Utc>,
) -> Option<Manifest> {
    if floors.is_empty() {
        return None;
    }

    let mut manifest = Manifest {
        scan_meta: ScanMeta {
            project_type: project.project_type.clone(),
            foundation_type: project.foundation_type.clone(),
            story_count: project.story_count,
            units: UNITS.to_string(),
            generator: format!("floorscan {}", env!("CARGO_PKG_VERSION")),
            exported_at: exported_at.to_rfc3339(),
        },
        walls: Vec::new(),
        fixtures: Vec::new(),
        floors: Vec::new(),
    };

    let mut ordered: Vec<&FloorExport<'_>> = floors.iter().collect();
    ordered.sort_by_key(|f| f.floor);

    for export in ordered {
        export_floor(project, export, &mut manifest);
    }

    tracing::info!(
        "Manifest built: {} floors, {} walls, {} fixtures",
        manifest.floors.len(),
        manifest.walls.len(),
        manifest.fixtures.len()
    );
    Some(manifest)
}

fn export_floor(project: &ProjectConfig, export: &FloorExport<'_>, manifest: &mut Manifest) {
    let level = ProjectConfig::level_label(export.floor);
    let ratio = export.ratio;
    let wall_offset = manifest.walls.len();

    let walls: Vec<&Wall> = export.elements.iter().filter_map(Element::as_wall).collect();
    for wall in &walls {
        let wall_type = match wall.category {
            WallCategory::Exterior => &project.default_wall_type,
            WallCategory::Interior => &project.interior_wall_type,
        };
        manifest.walls.push(ManifestWall {
            wall_type: wall_type.clone(),
            level: level.clone(),
            start: ratio.point_to_feet(wall.start.x, wall.start.y),
            end: ratio.point_to_feet(wall.end.x, wall.end.y),
            structural: wall.structural,
        });
    }

    for element in export.elements {
        let (family, fixture_type, rotation_deg) = match element {
            Element::Wall(_) => continue,
            Element::Door(o) => (FAMILY_DOORS, o.subtype.clone(), o.rotation_deg),
            Element::Window(o) => (FAMILY_WINDOWS, o.subtype.clone(), o.rotation_deg),
            Element::Fixture(f) => {
                let family = match f.kind {
                    FixtureKind::Plumbing => FAMILY_PLUMBING,
                    FixtureKind::Kitchen => FAMILY_CASEWORK,
                };
                (family, f.tag.clone(), f.rotation_deg)
            }
        };
        let center = element.center();
        let host_wall_index = walls
            .iter()
            .enumerate()
            .map(|(i, w)| (i, w.distance_to(&center)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| wall_offset + i);

        manifest.fixtures.push(ManifestFixture {
            family: family.to_string(),
            fixture_type,
            point: ratio.point_to_feet(center.x, center.y),
            level: level.clone(),
            host_wall_index,
            rotation_deg,
        });
    }

    let floor_type = if export.floor == 1 {
        &project.foundation_type
    } else {
        &project.upper_floor_type
    };
    manifest.floors.push(ManifestFloor {
        floor_type: floor_type.clone(),
        level,
        boundary: export
            .layers
            .ordered_exterior()
            .into_iter()
            .map(|p| ratio.point_to_feet(p.x, p.y))
            .collect(),
    });
}
