//! Error types for the `life_engine` crate.
//!
//! Engine operations return [`EngineError`]; loading a [`LifeConfig`]
//! returns [`ConfigError`]. None of them leave the engine half-updated.
//!
//! [`LifeConfig`]: crate::config::LifeConfig

/// Why a requested width/height pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DimensionProblem {
    /// One of the values is not a base-10 integer.
    #[error("width and height must be whole numbers")]
    NotAnInteger,

    /// One of the values is below zero.
    #[error("width and height must not be negative")]
    Negative,

    /// One of the values is above the configured maximum.
    #[error("grid may be at most {max_width}x{max_height}")]
    TooLarge {
        /// Largest accepted width.
        max_width: usize,
        /// Largest accepted height.
        max_height: usize,
    },
}

/// Errors raised by [`GridEngine`](crate::GridEngine) and
/// [`SimulationController`](crate::SimulationController).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A create/resize request named an unusable size. Nothing was changed.
    #[error("invalid dimensions (width {width}, height {height}): {problem}")]
    InvalidDimensions {
        /// The width as requested.
        width: String,
        /// The height as requested.
        height: String,
        /// What is wrong with it.
        problem: DimensionProblem,
    },

    /// A cell coordinate lies outside the grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    CellOutOfBounds {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// The grid cannot be edited while the simulation is running.
    #[error("simulation is running; pause it before editing the grid")]
    SimulationRunning,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("failed to parse config TOML: {source}")]
    Toml {
        /// The underlying TOML parse error.
        #[from]
        source: toml::de::Error,
    },

    /// The file parsed but describes an unusable setup.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}
