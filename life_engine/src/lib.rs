//! Conway's Game of Life on a bounded grid.
//!
//! [`GridEngine`] owns one grid and applies every change to it: creation,
//! cell toggling, clearing, resizing and advancing a generation. Cells
//! beyond the edges are always dead. [`SimulationController`] runs an
//! engine on a fixed tick using a tokio runtime and tells its caller which
//! controls make sense in the current run state.
//!
//! ```
//! use life_engine::{Dimensions, GridEngine, Limits};
//!
//! let mut engine = GridEngine::new(Limits::default(), Dimensions::new(10, 10))?;
//! for x in 4..7 {
//!     engine.toggle(x, 5)?;
//! }
//! engine.step();
//! assert!(engine.is_alive(5, 4) && engine.is_alive(5, 6));
//! # Ok::<(), life_engine::EngineError>(())
//! ```

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod grid;

pub use config::LifeConfig;
pub use controller::{Controls, SharedEngine, SimulationController};
pub use engine::{GridEngine, Limits};
pub use error::{ConfigError, DimensionProblem, EngineError};
pub use grid::{Dimensions, Grid};
