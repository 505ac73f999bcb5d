//! Configuration and settings management for FloorScan
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into two sections:
//! - Engine settings (zoom bounds, pick radii, element defaults)
//! - Project settings (story count and pass-through type labels)

use floorscan_core::constants;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Tuning for the canvas engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Smallest allowed zoom factor
    pub min_zoom: f64,
    /// Largest allowed zoom factor
    pub max_zoom: f64,
    /// Zoom multiplier per wheel notch
    pub wheel_zoom_step: f64,
    /// Fraction of the viewport the image fills after zoom-to-fit
    pub fit_margin: f64,
    /// Pick radius for point-type elements, in screen pixels
    pub point_pick_radius_px: f64,
    /// Pick radius for walls, in screen pixels
    pub wall_pick_radius_px: f64,
    /// Rotation step for the rotate command, in degrees
    pub rotation_step_deg: f64,
    /// Door width used when OCR gives none, in image pixels
    pub default_door_width_px: f64,
    /// Window width used when OCR gives none, in image pixels
    pub default_window_width_px: f64,
    /// Confidence used when OCR gives none
    pub default_confidence: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
            wheel_zoom_step: constants::WHEEL_ZOOM_STEP,
            fit_margin: constants::FIT_MARGIN,
            point_pick_radius_px: constants::POINT_PICK_RADIUS_PX,
            wall_pick_radius_px: constants::WALL_PICK_RADIUS_PX,
            rotation_step_deg: constants::ROTATION_STEP_DEG,
            default_door_width_px: constants::DEFAULT_DOOR_WIDTH_PX,
            default_window_width_px: constants::DEFAULT_WINDOW_WIDTH_PX,
            default_confidence: constants::DEFAULT_CONFIDENCE,
        }
    }
}

impl EngineSettings {
    /// Validate engine settings
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(out_of_range("min_zoom", self.min_zoom));
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            return Err(out_of_range("max_zoom", self.max_zoom));
        }
        if !(self.wheel_zoom_step.is_finite() && self.wheel_zoom_step > 1.0) {
            return Err(out_of_range("wheel_zoom_step", self.wheel_zoom_step));
        }
        if !(self.fit_margin > 0.0 && self.fit_margin <= 1.0) {
            return Err(out_of_range("fit_margin", self.fit_margin));
        }
        if !(self.point_pick_radius_px > 0.0 && self.wall_pick_radius_px > 0.0) {
            return Err(SettingsError::invalid(
                "pick_radius",
                "pick radii must be positive",
            ));
        }
        if !(self.rotation_step_deg > 0.0 && self.rotation_step_deg < 360.0) {
            return Err(out_of_range("rotation_step_deg", self.rotation_step_deg));
        }
        if !(self.default_door_width_px > 0.0 && self.default_window_width_px > 0.0) {
            return Err(SettingsError::invalid(
                "default_width",
                "default door/window widths must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.default_confidence) {
            return Err(out_of_range("default_confidence", self.default_confidence));
        }
        Ok(())
    }
}

/// Per-project metadata carried through to the manifest.
///
/// None of these values are interpreted by the engine; they label the
/// exported walls and floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project type label (e.g. "residential")
    pub project_type: String,
    /// Foundation type, used as the Level 1 floor type
    pub foundation_type: String,
    /// Wall type label for exterior walls
    pub default_wall_type: String,
    /// Wall type label for interior walls
    pub interior_wall_type: String,
    /// Floor type label for levels above the first
    pub upper_floor_type: String,
    /// Number of floors that must be accepted before export
    pub story_count: u32,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_type: "residential".to_string(),
            foundation_type: "Slab on Grade".to_string(),
            default_wall_type: "Exterior - 2x6 Wood Stud".to_string(),
            interior_wall_type: "Interior - 2x4 Wood Stud".to_string(),
            upper_floor_type: "Wood Joist Floor".to_string(),
            story_count: 1,
        }
    }
}

impl ProjectConfig {
    /// Validate project settings
    pub fn validate(&self) -> SettingsResult<()> {
        if self.story_count == 0 {
            return Err(SettingsError::invalid(
                "story_count",
                "must be at least 1",
            ));
        }
        if self.default_wall_type.trim().is_empty() {
            return Err(SettingsError::invalid(
                "default_wall_type",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Level label for a 1-based floor index.
    pub fn level_label(floor: u32) -> String {
        format!("Level {}", floor)
    }
}

/// Complete configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Canvas engine tuning
    pub engine: EngineSettings,
    /// Project metadata
    pub project: ProjectConfig,
}

impl Config {
    /// Platform default config file location.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("floorscan").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format_of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.engine.validate()?;
        self.project.validate()?;
        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("<none>").to_string()).into()),
    }
}

fn out_of_range(key: &str, value: f64) -> SettingsError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}
