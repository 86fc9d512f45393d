//! Layered dashboard configuration.
//!
//! Defaults are overridden by an optional TOML file, then by
//! `CLIMATE_DASHBOARD__SECTION__KEY` environment variables. Command-line
//! flags are applied last by the CLI.

use crate::error::Result;
use crate::render::AnimationSettings;
use crate::utils::constants::{
    DEFAULT_ANIMATION_MS, DEFAULT_BOUNDARY_SOURCE, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_SOURCE,
    DEFAULT_CHART_WIDTH, DEFAULT_CONFIG_FILE, DEFAULT_INITIAL_YEAR, DEFAULT_MAP_HEIGHT,
    DEFAULT_MAP_WIDTH, DEFAULT_POINT_GROW_MS, DEFAULT_POINT_RADIUS, DEFAULT_TEMPERATURE_SOURCE,
    ENV_PREFIX,
};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    #[validate(length(min = 1))]
    pub temperature_source: String,

    #[validate(length(min = 1))]
    pub chart_source: String,

    #[validate(length(min = 1))]
    pub boundary_source: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            temperature_source: DEFAULT_TEMPERATURE_SOURCE.to_string(),
            chart_source: DEFAULT_CHART_SOURCE.to_string(),
            boundary_source: DEFAULT_BOUNDARY_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MapConfig {
    #[validate(range(min = 100, max = 10000))]
    pub width: u32,

    #[validate(range(min = 100, max = 10000))]
    pub height: u32,

    /// Year shown first; the earliest year is used when it has no data.
    pub initial_year: i32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            initial_year: DEFAULT_INITIAL_YEAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartConfig {
    #[validate(range(min = 200, max = 10000))]
    pub width: u32,

    #[validate(range(min = 200, max = 10000))]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnimationConfig {
    #[validate(range(min = 1, max = 600000))]
    pub duration_ms: u64,

    #[validate(range(min = 1, max = 600000))]
    pub point_grow_ms: u64,

    #[validate(range(min = 0.5, max = 100.0))]
    pub point_radius: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_ANIMATION_MS,
            point_grow_ms: DEFAULT_POINT_GROW_MS,
            point_radius: DEFAULT_POINT_RADIUS,
        }
    }
}

impl AnimationConfig {
    pub fn settings(&self) -> AnimationSettings {
        AnimationSettings {
            duration: Duration::from_millis(self.duration_ms),
            point_grow: Duration::from_millis(self.point_grow_ms),
            point_radius: self.point_radius,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Page path; a dated default is generated when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    #[validate(nested)]
    pub data: DataConfig,

    #[validate(nested)]
    pub map: MapConfig,

    #[validate(nested)]
    pub charts: ChartConfig,

    #[validate(nested)]
    pub animation: AnimationConfig,

    pub output: OutputConfig,
}

impl DashboardConfig {
    /// Load and validate the layered configuration.
    ///
    /// An explicit `path` must exist; without one, `dashboard.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (file, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let config: DashboardConfig = Config::builder()
            .add_source(
                File::from(file.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        debug!(file = %file.display(), "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = DashboardConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.map.initial_year, 2000);
        assert_eq!((config.map.width, config.map.height), (1200, 800));
        assert_eq!(config.animation.settings().duration, Duration::from_secs(4));
    }

    #[test]
    fn test_file_overrides_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "[map]")?;
        writeln!(file, "initial_year = 1950")?;
        writeln!(file, "[data]")?;
        writeln!(file, "chart_source = \"other.csv\"")?;

        let config = DashboardConfig::load(Some(file.path()))?;
        assert_eq!(config.map.initial_year, 1950);
        assert_eq!(config.map.width, 1200);
        assert_eq!(config.data.chart_source, "other.csv");
        assert_eq!(config.data.temperature_source, DEFAULT_TEMPERATURE_SOURCE);
        Ok(())
    }

    #[test]
    fn test_zero_duration_is_rejected() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "[animation]")?;
        writeln!(file, "duration_ms = 0")?;

        let result = DashboardConfig::load(Some(file.path()));
        assert!(matches!(result, Err(DashboardError::Validation(_))));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = DashboardConfig::load(Some(Path::new("/nonexistent/dashboard.toml")));
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }
}
