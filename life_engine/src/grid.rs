// grid.rs - Grid types for Conway's Game of Life
//
// Cells are stored row-major as `cells[y][x]`. Everything outside the
// `width x height` rectangle is permanently dead: there is no wraparound.

use std::fmt;

/// Offsets of the Moore neighbourhood, centre excluded.
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Width and height of a grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One generation: a rectangular matrix of live/dead cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<Vec<bool>>,
}

impl Grid {
    /// An all-dead grid of the given size.
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![vec![false; dims.width]; dims.height],
        }
    }

    /// Builds a grid with exactly the listed `(x, y)` cells alive.
    /// Coordinates outside the grid are ignored.
    pub fn with_live_cells(dims: Dimensions, live: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(dims);
        for &(x, y) in live {
            if dims.contains(x, y) {
                grid.cells[y][x] = true;
            }
        }
        grid
    }

    pub const fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub const fn width(&self) -> usize {
        self.dims.width
    }

    pub const fn height(&self) -> usize {
        self.dims.height
    }

    /// Rows in `y` order, each `width` cells long.
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }

    /// State of cell `(x, y)`; anything off the grid reads as dead.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Flips cell `(x, y)` and returns its new state, or `None` when the
    /// coordinate is off the grid (nothing changes in that case).
    pub fn toggle(&mut self, x: usize, y: usize) -> Option<bool> {
        let cell = self.cells.get_mut(y)?.get_mut(x)?;
        *cell = !*cell;
        Some(*cell)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&alive| alive).count())
            .sum()
    }

    /// `(x, y)` of every live cell, row by row.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &alive)| alive)
                .map(move |(x, _)| (x, y))
        })
    }

    /// Live cells among the 8 neighbours of `(x, y)`. Neighbours that fall
    /// outside the grid count as dead.
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for &(dx, dy) in &NEIGHBOURS {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
            else {
                continue;
            };
            if self.is_alive(nx, ny) { count += 1; }
        }
        count
    }

    /// Computes the next generation into a fresh grid. `self` is only read,
    /// so every cell sees the same previous generation.
    pub fn next_generation(&self) -> Grid {
        let cells = (0..self.dims.height).map(|y| self.next_row(y)).collect();
        Grid { dims: self.dims, cells }
    }

    fn next_row(&self, y: usize) -> Vec<bool> {
        (0..self.dims.width)
            .map(|x| {
                match (self.cells[y][x], self.live_neighbors(x, y)) {
                    (true, 2) | (true, 3) => true,   // Survival
                    (false, 3)            => true,   // Birth
                    _                     => false,  // Death or stays dead
                }
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    /// `#` for live cells, `.` for dead ones, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
