//! The grid engine: owns the current generation and every operation that
//! replaces it.
//!
//! A rejected request never touches the engine. Accepted size changes
//! always start from an empty grid; the previous contents are not carried
//! over, even where the old and new rectangles overlap.

use std::num::IntErrorKind;

use tracing::{debug, trace};

use crate::error::{DimensionProblem, EngineError};
use crate::grid::{Dimensions, Grid};

/// Largest width and height the engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_width: usize,
    pub max_height: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_width: 1000, max_height: 1000 }
    }
}

impl Limits {
    /// Validates a requested size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] if either value is
    /// negative or above its maximum.
    pub fn check(&self, width: i64, height: i64) -> Result<Dimensions, EngineError> {
        let reject = |problem| EngineError::InvalidDimensions {
            width: width.to_string(),
            height: height.to_string(),
            problem,
        };

        let (Ok(w), Ok(h)) = (usize::try_from(width), usize::try_from(height)) else {
            return Err(reject(DimensionProblem::Negative));
        };
        if w > self.max_width || h > self.max_height {
            return Err(reject(DimensionProblem::TooLarge {
                max_width: self.max_width,
                max_height: self.max_height,
            }));
        }
        Ok(Dimensions::new(w, h))
    }

    /// Validates a size that is already in cells.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] if it exceeds the maxima.
    pub fn admit(&self, dims: Dimensions) -> Result<Dimensions, EngineError> {
        if dims.width() > self.max_width || dims.height() > self.max_height {
            return Err(EngineError::InvalidDimensions {
                width: dims.width().to_string(),
                height: dims.height().to_string(),
                problem: DimensionProblem::TooLarge {
                    max_width: self.max_width,
                    max_height: self.max_height,
                },
            });
        }
        Ok(dims)
    }

    /// Parses and validates user-supplied text, e.g. form fields or query
    /// parameters. Surrounding whitespace is ignored; anything else that is
    /// not a plain base-10 integer is rejected. Integers too long for `i64`
    /// are still integers and are reported as too large or negative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] with
    /// [`DimensionProblem::NotAnInteger`] for unparsable text, otherwise as
    /// [`Limits::check`].
    pub fn parse(&self, width: &str, height: &str) -> Result<Dimensions, EngineError> {
        let value = |text: &str| {
            text.trim().parse::<i64>().map_err(|error| match error.kind() {
                IntErrorKind::PosOverflow => DimensionProblem::TooLarge {
                    max_width: self.max_width,
                    max_height: self.max_height,
                },
                IntErrorKind::NegOverflow => DimensionProblem::Negative,
                _ => DimensionProblem::NotAnInteger,
            })
        };
        match (value(width), value(height)) {
            (Ok(w), Ok(h)) => self.check(w, h),
            (Err(problem), _) | (Ok(_), Err(problem)) => Err(EngineError::InvalidDimensions {
                width: width.to_owned(),
                height: height.to_owned(),
                problem,
            }),
        }
    }
}

/// Owns one simulation's grid, its size limits and its generation count.
#[derive(Debug, Clone)]
pub struct GridEngine {
    grid: Grid,
    limits: Limits,
    generation: u64,
}

impl GridEngine {
    /// Creates an engine with an empty grid of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] if `dims` exceeds `limits`.
    pub fn new(limits: Limits, dims: Dimensions) -> Result<Self, EngineError> {
        let dims = limits.admit(dims)?;
        debug!(%dims, "grid created");
        Ok(Self {
            grid: Grid::new(dims),
            limits,
            generation: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Steps taken since the grid was last created, cleared or resized.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.grid.is_alive(x, y)
    }

    /// Replaces the grid with an empty one of `width x height`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] for a negative or
    /// oversized request, leaving the engine as it was.
    pub fn create(&mut self, width: i64, height: i64) -> Result<&Grid, EngineError> {
        let dims = self.limits.check(width, height)?;
        Ok(self.replace(dims))
    }

    /// Same as [`GridEngine::create`]: the old contents are always dropped.
    ///
    /// # Errors
    ///
    /// As [`GridEngine::create`].
    pub fn resize(&mut self, width: i64, height: i64) -> Result<&Grid, EngineError> {
        self.create(width, height)
    }

    /// Resize from an already-measured size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] if `dims` exceeds the limits.
    pub fn resize_to(&mut self, dims: Dimensions) -> Result<&Grid, EngineError> {
        let dims = self.limits.admit(dims)?;
        Ok(self.replace(dims))
    }

    /// Resize from text input, see [`Limits::parse`].
    ///
    /// # Errors
    ///
    /// As [`Limits::parse`].
    pub fn resize_from_input(&mut self, width: &str, height: &str) -> Result<&Grid, EngineError> {
        let dims = self.limits.parse(width, height)?;
        Ok(self.replace(dims))
    }

    /// Kills every cell, keeping the current size.
    pub fn clear(&mut self) -> &Grid {
        self.replace(self.dimensions())
    }

    /// Flips cell `(x, y)` and returns its new state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CellOutOfBounds`] if the cell is off the grid.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool, EngineError> {
        let dims = self.dimensions();
        self.grid.toggle(x, y).ok_or(EngineError::CellOutOfBounds {
            x,
            y,
            width: dims.width(),
            height: dims.height(),
        })
    }

    /// Live neighbours of `(x, y)`, in `0..=8`.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        self.grid.live_neighbors(x, y)
    }

    /// Advances one generation.
    pub fn step(&mut self) -> &Grid {
        self.grid = self.grid.next_generation();
        self.generation += 1;
        trace!(generation = self.generation, "generation advanced");
        &self.grid
    }

    fn replace(&mut self, dims: Dimensions) -> &Grid {
        self.grid = Grid::new(dims);
        self.generation = 0;
        debug!(%dims, "grid replaced");
        &self.grid
    }
}

impl Default for GridEngine {
    /// A 20x20 grid under the default limits.
    fn default() -> Self {
        Self {
            grid: Grid::new(Dimensions::new(20, 20)),
            limits: Limits::default(),
            generation: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> GridEngine {
        let mut engine = GridEngine::default();
        for (x, y) in [(4, 5), (5, 5), (6, 5)] {
            engine.toggle(x, y).unwrap();
        }
        engine.step();
        engine
    }

    fn invalid(result: Result<&Grid, EngineError>) -> DimensionProblem {
        match result {
            Err(EngineError::InvalidDimensions { problem, .. }) => problem,
            other => panic!("expected InvalidDimensions, got {other:?}"),
        }
    }

    #[test]
    fn default_engine_is_twenty_by_twenty() {
        let engine = GridEngine::default();
        assert_eq!(engine.dimensions(), Dimensions::new(20, 20));
        assert_eq!(engine.limits(), Limits { max_width: 1000, max_height: 1000 });
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn create_builds_empty_grid_of_requested_size() {
        let mut engine = seeded();
        let grid = engine.create(30, 12).unwrap();
        assert_eq!(grid.rows().len(), 12);
        assert!(grid.rows().iter().all(|row| row.len() == 30));
        assert_eq!(grid.population(), 0);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn limits_are_inclusive() {
        let mut engine = GridEngine::default();
        assert!(engine.create(1000, 1000).is_ok());
        assert!(engine.create(0, 0).is_ok());
        assert_eq!(engine.dimensions(), Dimensions::new(0, 0));
    }

    #[test]
    fn rejected_sizes_leave_engine_untouched() {
        let mut engine = seeded();
        let before = engine.grid().clone();
        let generation = engine.generation();

        assert_eq!(invalid(engine.create(-1, 10)), DimensionProblem::Negative);
        assert_eq!(invalid(engine.resize(10, -3)), DimensionProblem::Negative);
        assert_eq!(
            invalid(engine.resize(1001, 10)),
            DimensionProblem::TooLarge { max_width: 1000, max_height: 1000 }
        );
        assert!(matches!(
            invalid(engine.resize(10, 5000)),
            DimensionProblem::TooLarge { .. }
        ));
        assert_eq!(invalid(engine.resize_from_input("abc", "10")), DimensionProblem::NotAnInteger);
        assert_eq!(invalid(engine.resize_from_input("3.5", "10")), DimensionProblem::NotAnInteger);
        assert_eq!(invalid(engine.resize_from_input("", "")), DimensionProblem::NotAnInteger);
        assert_eq!(invalid(engine.resize_from_input("-4", "10")), DimensionProblem::Negative);

        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.generation(), generation);
    }

    #[test]
    fn integers_beyond_i64_keep_their_sign_problem() {
        let limits = Limits::default();
        let problem = |w: &str, h: &str| match limits.parse(w, h) {
            Err(EngineError::InvalidDimensions { problem, .. }) => problem,
            other => panic!("expected InvalidDimensions, got {other:?}"),
        };
        assert_eq!(
            problem("99999999999999999999", "10"),
            DimensionProblem::TooLarge { max_width: 1000, max_height: 1000 }
        );
        assert_eq!(problem("10", "-99999999999999999999"), DimensionProblem::Negative);
        assert_eq!(problem("abc", "99999999999999999999"), DimensionProblem::NotAnInteger);
    }

    #[test]
    fn parse_trims_whitespace() {
        let limits = Limits::default();
        assert_eq!(limits.parse(" 40 ", "\t30\n").unwrap(), Dimensions::new(40, 30));
    }

    #[test]
    fn error_message_names_the_request() {
        let err = Limits::default().parse("abc", "7").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid dimensions (width abc, height 7): width and height must be whole numbers"
        );
    }

    #[test]
    fn resize_discards_contents_even_when_growing() {
        // Deliberate: nothing from the old grid survives a resize.
        let mut engine = seeded();
        assert!(engine.population() > 0);
        engine.resize(25, 25).unwrap();
        assert_eq!(engine.population(), 0);

        engine.toggle(1, 1).unwrap();
        engine.resize_to(Dimensions::new(25, 25)).unwrap();
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn resize_to_respects_limits() {
        let mut engine = GridEngine::new(
            Limits { max_width: 50, max_height: 50 },
            Dimensions::new(10, 10),
        )
        .unwrap();
        assert!(engine.resize_to(Dimensions::new(51, 1)).is_err());
        assert_eq!(engine.dimensions(), Dimensions::new(10, 10));
    }

    #[test]
    fn new_rejects_oversized_start() {
        let limits = Limits { max_width: 8, max_height: 8 };
        assert!(GridEngine::new(limits, Dimensions::new(9, 2)).is_err());
    }

    #[test]
    fn clear_keeps_size_and_resets_generation() {
        let mut engine = seeded();
        engine.clear();
        assert_eq!(engine.dimensions(), Dimensions::new(20, 20));
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn toggle_out_of_bounds_is_reported() {
        let mut engine = GridEngine::default();
        assert_eq!(
            engine.toggle(20, 0),
            Err(EngineError::CellOutOfBounds { x: 20, y: 0, width: 20, height: 20 })
        );
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn step_advances_blinker_and_counts_generations() {
        let mut engine = seeded();
        assert_eq!(engine.generation(), 1);
        assert!(engine.is_alive(5, 4) && engine.is_alive(5, 5) && engine.is_alive(5, 6));
        assert_eq!(engine.count_live_neighbors(5, 5), 2);
        assert_eq!(engine.count_live_neighbors(4, 5), 3);

        engine.step();
        assert_eq!(engine.generation(), 2);
        assert!(engine.is_alive(4, 5) && engine.is_alive(6, 5));
    }
}
