//! Core domain types shared across the lattice-life workspace.
//!
//! This crate holds the pure data model of the simulation: the square cell
//! [`Grid`], coordinates into it, and immutable [`Pattern`] definitions.
//! It contains no transition logic; the automaton lives in
//! `lattice-life-engine`.

use std::fmt;
use std::hash::Hasher;

use ahash::AHasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

/// Errors produced by the core data types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A coordinate fell outside the grid.
    #[error("coordinate ({row}, {col}) out of bounds for {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    /// A pattern definition could not be parsed.
    #[error("invalid pattern {name:?}: {message}")]
    InvalidPattern { name: String, message: String },
}

// =============================================================================
// Coordinates
// =============================================================================

/// A cell position on the grid, row-major.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    /// Create a new coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for CellCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

// =============================================================================
// Grid
// =============================================================================

/// An N×N matrix of two-state cells, N fixed at construction.
///
/// Cells are stored row-major as booleans (`true` = alive). The grid never
/// changes shape during a run; every access is bounds-checked. The engine
/// replaces the grid wholesale on each generation, so a transition always
/// reads a fully-formed prior state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid of the given side length.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check a coordinate against the grid bounds.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, CoreError> {
        if self.contains(row, col) {
            Ok(row * self.size + col)
        } else {
            Err(CoreError::OutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }

    /// Get the state of a cell.
    pub fn get(&self, row: usize, col: usize) -> Result<bool, CoreError> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set the state of a cell.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), CoreError> {
        let i = self.index(row, col)?;
        self.cells[i] = alive;
        Ok(())
    }

    /// Count of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Whether every cell is dead.
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Kill every cell, keeping the shape.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Iterate over the coordinates of all live cells.
    pub fn live_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, &alive)| {
            alive.then(|| CellCoord::new(i / self.size, i % self.size))
        })
    }

    /// Raw row-major cell slice.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Build a grid from a row-major cell vector.
    ///
    /// The vector length must be exactly `size * size`.
    pub fn from_cells(size: usize, cells: Vec<bool>) -> Result<Self, CoreError> {
        if cells.len() != size * size {
            return Err(CoreError::OutOfBounds {
                row: cells.len() / size.max(1),
                col: 0,
                size,
            });
        }
        Ok(Self { size, cells })
    }

    /// Compact content identity for history membership.
    ///
    /// Hashes the dimension and every cell, so two grids compare equal iff
    /// their fingerprints were produced from identical contents (modulo the
    /// usual 64-bit collision caveat, acceptable for a bounded window).
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = AHasher::default();
        hasher.write_usize(self.size);
        for chunk in self.cells.chunks(64) {
            let mut word = 0u64;
            for (bit, &alive) in chunk.iter().enumerate() {
                if alive {
                    word |= 1 << bit;
                }
            }
            hasher.write_u64(word);
        }
        hasher.finish()
    }

    /// Coordinates whose state differs from `other`.
    ///
    /// Both grids must have the same shape; a mismatch yields the
    /// out-of-bounds error rather than a partial diff.
    pub fn diff(&self, other: &Grid) -> Result<Vec<CellCoord>, CoreError> {
        if self.size != other.size {
            return Err(CoreError::OutOfBounds {
                row: other.size,
                col: other.size,
                size: self.size,
            });
        }
        Ok(self
            .cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter_map(|(i, (&a, &b))| {
                (a != b).then(|| CellCoord::new(i / self.size, i % self.size))
            })
            .collect())
    }
}

// =============================================================================
// Patterns
// =============================================================================

/// An immutable named binary cell matrix, defined in row-major orientation.
///
/// Patterns are reference data: rotation and placement never mutate the
/// original definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    name: String,
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// Parse a pattern from ASCII-art rows (`#` = alive, `.` = dead).
    ///
    /// All rows must have the same width and there must be at least one row.
    pub fn from_rows(name: impl Into<String>, rows: &[&str]) -> Result<Self, CoreError> {
        let name = name.into();
        if rows.is_empty() {
            return Err(CoreError::InvalidPattern {
                name,
                message: "no rows".to_string(),
            });
        }
        let width = rows[0].chars().count();
        if width == 0 {
            return Err(CoreError::InvalidPattern {
                name,
                message: "empty row".to_string(),
            });
        }

        let mut cells = Vec::with_capacity(rows.len() * width);
        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(CoreError::InvalidPattern {
                    name,
                    message: format!("row {} width differs from row 0", r),
                });
            }
            for ch in row.chars() {
                match ch {
                    '#' => cells.push(true),
                    '.' => cells.push(false),
                    other => {
                        return Err(CoreError::InvalidPattern {
                            name,
                            message: format!("unexpected character {:?} in row {}", other, r),
                        })
                    }
                }
            }
        }

        Ok(Self {
            name,
            height: rows.len(),
            width,
            cells,
        })
    }

    /// Pattern name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// State of the pattern cell at local coordinates, `false` outside the
    /// pattern's own bounds.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col]
        } else {
            false
        }
    }

    /// Count of live cells in the definition.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Rotate 90° clockwise, producing a new pattern.
    ///
    /// Dimensions swap unless the pattern is square; four rotations return
    /// the original orientation.
    pub fn rotate_cw(&self) -> Pattern {
        let mut cells = vec![false; self.cells.len()];
        for r in 0..self.height {
            for c in 0..self.width {
                // (r, c) maps to (c, height - 1 - r) in the rotated matrix.
                cells[c * self.height + (self.height - 1 - r)] =
                    self.cells[r * self.width + c];
            }
        }
        Pattern {
            name: self.name.clone(),
            height: self.width,
            width: self.height,
            cells,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height {
            for c in 0..self.width {
                f.write_str(if self.is_alive(r, c) { "#" } else { "." })?;
            }
            if r + 1 < self.height {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grid_starts_dead() {
        let grid = Grid::new(10);
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.population(), 0);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_grid_set_get() {
        let mut grid = Grid::new(8);
        grid.set(3, 4, true).unwrap();
        assert!(grid.get(3, 4).unwrap());
        assert!(!grid.get(0, 0).unwrap());
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_grid_out_of_bounds() {
        let mut grid = Grid::new(5);
        assert!(matches!(
            grid.get(5, 0),
            Err(CoreError::OutOfBounds { row: 5, col: 0, size: 5 })
        ));
        assert!(grid.set(0, 5, true).is_err());
        assert!(grid.get(4, 4).is_ok());
    }

    #[test]
    fn test_grid_equality_and_fingerprint() {
        let mut a = Grid::new(6);
        let mut b = Grid::new(6);
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());

        a.set(2, 2, true).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.fingerprint(), b.fingerprint());

        b.set(2, 2, true).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_grid_diff() {
        let mut a = Grid::new(4);
        let mut b = Grid::new(4);
        a.set(0, 0, true).unwrap();
        b.set(3, 3, true).unwrap();

        let diff = a.diff(&b).unwrap();
        assert_eq!(diff, vec![CellCoord::new(0, 0), CellCoord::new(3, 3)]);

        let other = Grid::new(5);
        assert!(a.diff(&other).is_err());
    }

    #[test]
    fn test_grid_live_cells() {
        let mut grid = Grid::new(4);
        grid.set(1, 2, true).unwrap();
        grid.set(3, 0, true).unwrap();

        let live: Vec<_> = grid.live_cells().collect();
        assert_eq!(live, vec![CellCoord::new(1, 2), CellCoord::new(3, 0)]);
    }

    #[test]
    fn test_pattern_parse() {
        let glider = Pattern::from_rows("Glider", &[".#.", "..#", "###"]).unwrap();
        assert_eq!(glider.height(), 3);
        assert_eq!(glider.width(), 3);
        assert_eq!(glider.live_count(), 5);
        assert!(glider.is_alive(0, 1));
        assert!(!glider.is_alive(0, 0));
        // Outside the pattern's own bounds reads as dead.
        assert!(!glider.is_alive(9, 9));
    }

    #[test]
    fn test_pattern_parse_rejects_ragged_rows() {
        assert!(matches!(
            Pattern::from_rows("bad", &["##", "#"]),
            Err(CoreError::InvalidPattern { .. })
        ));
        assert!(Pattern::from_rows("bad", &[]).is_err());
        assert!(Pattern::from_rows("bad", &["#x"]).is_err());
    }

    #[test]
    fn test_pattern_rotation_swaps_dimensions() {
        let blinker = Pattern::from_rows("Blinker", &["###"]).unwrap();
        let rotated = blinker.rotate_cw();
        assert_eq!(rotated.height(), 3);
        assert_eq!(rotated.width(), 1);
        assert!(rotated.is_alive(0, 0));
        assert!(rotated.is_alive(1, 0));
        assert!(rotated.is_alive(2, 0));
    }

    #[test]
    fn test_pattern_rotation_direction() {
        // .#      ..
        // ..  ->  .#
        let p = Pattern::from_rows("corner", &[".#", ".."]).unwrap();
        let r = p.rotate_cw();
        assert!(!r.is_alive(0, 0));
        assert!(!r.is_alive(0, 1));
        assert!(!r.is_alive(1, 0));
        assert!(r.is_alive(1, 1));
    }

    proptest! {
        #[test]
        fn prop_four_rotations_identity(height in 1usize..6, width in 1usize..6, seed in any::<u64>()) {
            // Build a deterministic pseudo-random pattern from the seed.
            let rows: Vec<String> = (0..height)
                .map(|r| {
                    (0..width)
                        .map(|c| {
                            let bit = seed
                                .wrapping_mul(6364136223846793005)
                                .wrapping_add((r * width + c) as u64)
                                % 3;
                            if bit == 0 { '#' } else { '.' }
                        })
                        .collect()
                })
                .collect();
            let row_refs: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();
            let pattern = Pattern::from_rows("prop", &row_refs).unwrap();

            let back = pattern.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
            prop_assert_eq!(&back, &pattern);

            // Two rotations preserve dimensions, one swaps them.
            let once = pattern.rotate_cw();
            prop_assert_eq!(once.height(), pattern.width());
            prop_assert_eq!(once.width(), pattern.height());
            prop_assert_eq!(once.live_count(), pattern.live_count());
        }
    }
}
