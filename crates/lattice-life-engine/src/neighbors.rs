//! Moore-neighborhood live counts under a selectable boundary policy.

use lattice_life_core::Grid;
use serde::{Deserialize, Serialize};

/// How neighbor lookups treat coordinates outside the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Toroidal topology: indices wrap modulo the grid size in both
    /// dimensions, so the last row/column is adjacent to the first.
    #[default]
    Wrap,

    /// Fixed dead border: anything outside `[0, N)` counts as permanently
    /// dead.
    Fixed,
}

/// Offsets of the 8 Moore neighbors.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Compute, for every cell, the count of live cells among its 8 neighbors.
///
/// Reads only the prior grid; no count depends on any already-updated value,
/// so every cell is independent. Returns a row-major matrix of counts in
/// `0..=8` with the same shape as the grid.
pub fn count_neighbors(grid: &Grid, policy: BoundaryPolicy) -> Vec<u8> {
    let n = grid.size() as i64;
    let cells = grid.cells();
    let mut counts = vec![0u8; cells.len()];

    for row in 0..n {
        for col in 0..n {
            let mut count = 0u8;
            for (dr, dc) in NEIGHBOR_OFFSETS {
                let (r, c) = (row + dr, col + dc);
                let alive = match policy {
                    BoundaryPolicy::Wrap => {
                        let (r, c) = (r.rem_euclid(n), c.rem_euclid(n));
                        cells[(r * n + c) as usize]
                    }
                    BoundaryPolicy::Fixed => {
                        if r < 0 || c < 0 || r >= n || c >= n {
                            false
                        } else {
                            cells[(r * n + c) as usize]
                        }
                    }
                };
                if alive {
                    count += 1;
                }
            }
            counts[(row * n + col) as usize] = count;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(size: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(size);
        for &(r, c) in live {
            grid.set(r, c, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_empty_grid_all_zero() {
        let grid = Grid::new(8);
        for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Fixed] {
            assert!(count_neighbors(&grid, policy).iter().all(|&c| c == 0));
        }
    }

    #[test]
    fn test_interior_counts() {
        let grid = grid_with(5, &[(2, 1), (2, 2), (2, 3)]);
        for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Fixed] {
            let counts = count_neighbors(&grid, policy);
            // Middle of the blinker sees both flanks.
            assert_eq!(counts[2 * 5 + 2], 2);
            // Flanks see the middle only.
            assert_eq!(counts[2 * 5 + 1], 1);
            assert_eq!(counts[2 * 5 + 3], 1);
            // Cells above/below the middle see all three.
            assert_eq!(counts[5 + 2], 3);
            assert_eq!(counts[3 * 5 + 2], 3);
        }
    }

    #[test]
    fn test_wrap_makes_opposite_corners_adjacent() {
        let grid = grid_with(5, &[(0, 0), (4, 4)]);

        let wrapped = count_neighbors(&grid, BoundaryPolicy::Wrap);
        assert_eq!(wrapped[0], 1);
        assert_eq!(wrapped[4 * 5 + 4], 1);

        let fixed = count_neighbors(&grid, BoundaryPolicy::Fixed);
        assert_eq!(fixed[0], 0);
        assert_eq!(fixed[4 * 5 + 4], 0);
    }

    #[test]
    fn test_wrap_row_and_column_edges() {
        // A live cell at the right edge is a neighbor of the left edge
        // under Wrap only.
        let grid = grid_with(4, &[(1, 3)]);
        let wrapped = count_neighbors(&grid, BoundaryPolicy::Wrap);
        assert_eq!(wrapped[4], 1); // (1, 0) sees (1, 3) across the seam
        let fixed = count_neighbors(&grid, BoundaryPolicy::Fixed);
        assert_eq!(fixed[4], 0);
    }

    #[test]
    fn test_counts_max_out_at_eight() {
        // Fully live 3x3 grid: under Fixed, the center has 8 live neighbors.
        let mut grid = Grid::new(3);
        for r in 0..3 {
            for c in 0..3 {
                grid.set(r, c, true).unwrap();
            }
        }
        let counts = count_neighbors(&grid, BoundaryPolicy::Fixed);
        assert_eq!(counts[4], 8);
        assert_eq!(counts[0], 3);
    }
}
