//! FloorScan Settings Crate
//!
//! Handles engine tuning, per-project configuration, and config file
//! persistence.

pub mod config;
pub mod error;

pub use config::{Config, EngineSettings, ProjectConfig};
pub use error::{ConfigError, SettingsError, SettingsResult};
