//! # Configuration System
//!
//! Serializable configuration for the simulation core. Every configuration
//! type implements [`Config`], which can load and save TOML or RON files
//! based on the file extension.
//!
//! ## Configuration Categories
//!
//! - **Simulation**: fixed-step clock settings ([`SimulationConfig`])
//! - **Collision**: spatial hash bounds, resolution and reporting ([`CollisionConfig`])
//! - **Engine**: the aggregate of the above ([`EngineConfig`])

pub use serde::{Serialize, Deserialize};

use crate::foundation::math::Rect;
use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Fixed-step simulation clock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Length of one fixed step in seconds
    pub fixed_interval: f64,
}

impl SimulationConfig {
    /// Default fixed step: one hundredth of a second
    pub const DEFAULT_FIXED_INTERVAL: f64 = 1.0 / 100.0;

    /// Reject non-positive or non-finite intervals
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fixed_interval.is_finite() && self.fixed_interval > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!(
                "fixed_interval must be a positive number of seconds, got {}",
                self.fixed_interval
            )))
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_interval: Self::DEFAULT_FIXED_INTERVAL,
        }
    }
}

impl Config for SimulationConfig {}

/// How the collision detector reports pairs that stay in contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingMode {
    /// Report every overlapping pair on every fixed step it overlaps
    #[default]
    Continuous,
    /// Report a pair only on the first step of contact
    OnEnter,
}

/// Spatial hash collision detector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// World-space region covered by the grid
    pub bounding_box: Rect,
    /// Number of cells along X
    pub columns: u32,
    /// Number of cells along Y
    pub rows: u32,
    /// Pair reporting behaviour
    pub reporting: ReportingMode,
}

impl CollisionConfig {
    /// Default grid resolution along each axis
    pub const DEFAULT_CELLS: u32 = 6;

    /// Configuration covering `width × height` at the origin with default resolution
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            bounding_box: Rect::new(0.0, 0.0, width, height),
            ..Self::default()
        }
    }

    /// Reject empty or non-finite bounds and zero grid dimensions
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bounding_box.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "collision bounding box must have positive finite size, got {:?}",
                self.bounding_box
            )));
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::Invalid(format!(
                "collision grid must have at least one cell, got {}x{}",
                self.columns, self.rows
            )));
        }
        Ok(())
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            bounding_box: Rect::new(0.0, 0.0, 800.0, 600.0),
            columns: Self::DEFAULT_CELLS,
            rows: Self::DEFAULT_CELLS,
            reporting: ReportingMode::default(),
        }
    }
}

impl Config for CollisionConfig {}

/// Aggregate engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Simulation clock settings
    pub simulation: SimulationConfig,
    /// Collision detector settings
    pub collision: CollisionConfig,
}

impl EngineConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        self.collision.validate()
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("reify_engine_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.collision.columns, 6);
        assert_eq!(config.collision.rows, 6);
        assert_eq!(config.collision.reporting, ReportingMode::Continuous);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            [simulation]
            fixed_interval = 0.02

            [collision]
            columns = 4
            reporting = "on_enter"
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.fixed_interval, 0.02);
        assert_eq!(config.collision.columns, 4);
        assert_eq!(config.collision.rows, CollisionConfig::DEFAULT_CELLS);
        assert_eq!(config.collision.reporting, ReportingMode::OnEnter);
    }

    #[test]
    fn test_save_and_load_ron_file() {
        let path = temp_path("engine.ron");
        let mut config = EngineConfig::default();
        config.collision = CollisionConfig::with_size(320.0, 240.0);

        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = EngineConfig::default().save_to_file(temp_path("engine.yaml"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let simulation = SimulationConfig { fixed_interval: 0.0 };
        assert!(simulation.validate().is_err());

        let mut collision = CollisionConfig::with_size(0.0, 100.0);
        assert!(collision.validate().is_err());

        collision = CollisionConfig::with_size(100.0, 100.0);
        collision.rows = 0;
        assert!(collision.validate().is_err());
    }
}
