//! Configuration loading for the stage.
//!
//! All stage settings are loaded from a TOML file; every section and field
//! has a default, so a partial file (or none at all) works.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::Geometry;

/// Complete stage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageConfig {
    /// Tile geometry settings
    #[serde(default)]
    pub geometry: GeometryConfig,
    /// Animation and scheduling timings
    #[serde(default)]
    pub timing: TimingConfig,
}

impl StageConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Toml)
    }
}

/// Tile geometry: source tile size and on-screen upscale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub tile_size: u32,
    pub scale: u32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            tile_size: 16,
            scale: 4,
        }
    }
}

impl GeometryConfig {
    pub fn geometry(&self) -> Geometry {
        Geometry {
            tile_size: self.tile_size,
            scale: self.scale,
        }
    }
}

/// Animation and auto-advance timing, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Duration of one cell-to-cell tween.
    pub step_duration_ms: u64,
    /// Interval between automatic step requests.
    pub auto_advance_ms: u64,
    /// Simulated frame length used by the headless driver loop.
    pub tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            step_duration_ms: 200,
            auto_advance_ms: 8000,
            tick_ms: 50,
        }
    }
}

impl TimingConfig {
    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_duration_ms)
    }

    pub fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(toml::de::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Stage Configuration

[geometry]
tile_size = 16
scale = 4

[timing]
step_duration_ms = 200
auto_advance_ms = 8000
tick_ms = 50
"#
    .to_string()
}
