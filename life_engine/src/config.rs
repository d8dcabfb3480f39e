//! Configuration loading for a simulation.
//!
//! Settings live in a small TOML file (`life.toml` by convention). Every
//! field is optional; a missing field takes the value the browser version
//! of the game always used (20x20 start, 1000x1000 cap, one tick a second).

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::engine::Limits;
use crate::error::ConfigError;
use crate::grid::Dimensions;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifeConfig {
    /// Initial size and size limits.
    pub grid: GridConfig,

    /// Tick timing.
    pub simulation: SimulationConfig,
}

/// `[grid]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub max_width: usize,
    pub max_height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            max_width: 1000,
            max_height: 1000,
        }
    }
}

/// `[simulation]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Milliseconds between generations while running.
    pub tick_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { tick_interval_ms: 1000 }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl LifeConfig {
    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Toml`] if it is not valid TOML for this schema, or
    /// [`ConfigError::Invalid`] if the values are inconsistent.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// As [`LifeConfig::from_file`], minus the I/O case.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values against each other.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid { reason });

        if self.simulation.tick_interval_ms == 0 {
            return invalid("simulation.tick_interval_ms must be at least 1".to_owned());
        }
        let grid = &self.grid;
        if i64::try_from(grid.max_width).is_err() || i64::try_from(grid.max_height).is_err() {
            return invalid("grid.max_width and grid.max_height are out of range".to_owned());
        }
        if grid.width > grid.max_width || grid.height > grid.max_height {
            return invalid(format!(
                "initial grid {}x{} exceeds the maximum {}x{}",
                grid.width, grid.height, grid.max_width, grid.max_height
            ));
        }
        Ok(())
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_width: self.grid.max_width,
            max_height: self.grid.max_height,
        }
    }

    pub fn initial_dimensions(&self) -> Dimensions {
        Dimensions::new(self.grid.width, self.grid.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = LifeConfig::from_toml_str("").unwrap();
        assert_eq!(config, LifeConfig::default());
        assert_eq!(config.initial_dimensions(), Dimensions::new(20, 20));
        assert_eq!(config.limits(), Limits::default());
        assert_eq!(config.simulation.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = LifeConfig::from_toml_str(
            r#"
            [grid]
            width = 64

            [simulation]
            tick_interval_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.width, 64);
        assert_eq!(config.grid.height, 20);
        assert_eq!(config.grid.max_width, 1000);
        assert_eq!(config.simulation.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let err = LifeConfig::from_toml_str("[simulation]\ntick_interval_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn start_size_must_fit_limits() {
        let err = LifeConfig::from_toml_str("[grid]\nwidth = 50\nmax_width = 40").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: initial grid 50x20 exceeds the maximum 40x1000"
        );
    }

    #[test]
    fn negative_sizes_fail_to_parse() {
        let err = LifeConfig::from_toml_str("[grid]\nheight = -5").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = LifeConfig::from_toml_str("[grid]\ndepth = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = LifeConfig::from_file(Path::new("/nonexistent/life.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
