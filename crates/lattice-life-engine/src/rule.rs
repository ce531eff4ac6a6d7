//! The B3/S23 transition function.

use lattice_life_core::Grid;

/// Apply Conway's rule to produce the next generation.
///
/// For each cell: alive with 2 or 3 live neighbors survives, dead with
/// exactly 3 live neighbors is born, everything else is dead. Inputs are
/// never mutated; the result is a freshly-populated grid so callers can
/// diff old against new for redraw hints and history comparison.
///
/// `counts` must be the neighbor matrix for `grid` (same shape, values
/// `0..=8`), as produced by [`count_neighbors`](crate::count_neighbors).
pub fn next_generation(grid: &Grid, counts: &[u8]) -> Grid {
    let cells = grid.cells();
    debug_assert_eq!(cells.len(), counts.len());

    let next: Vec<bool> = cells
        .iter()
        .zip(counts.iter())
        .map(|(&alive, &count)| matches!((alive, count), (true, 2) | (true, 3) | (false, 3)))
        .collect();

    // Shape is preserved by construction.
    Grid::from_cells(grid.size(), next).unwrap_or_else(|_| Grid::new(grid.size()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::{count_neighbors, BoundaryPolicy};

    fn advance(grid: &Grid, policy: BoundaryPolicy) -> Grid {
        let counts = count_neighbors(grid, policy);
        next_generation(grid, &counts)
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let grid = Grid::new(10);
        for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Fixed] {
            let next = advance(&grid, policy);
            assert!(next.is_empty());
        }
    }

    #[test]
    fn test_lone_cell_dies() {
        for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Fixed] {
            let mut grid = Grid::new(9);
            grid.set(4, 4, true).unwrap();
            let next = advance(&grid, policy);
            assert!(next.is_empty());
        }
    }

    #[test]
    fn test_block_is_still_life() {
        for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Fixed] {
            let mut grid = Grid::new(10);
            for (r, c) in [(4, 4), (4, 5), (5, 4), (5, 5)] {
                grid.set(r, c, true).unwrap();
            }
            let next = advance(&grid, policy);
            assert_eq!(next, grid);
        }
    }

    #[test]
    fn test_blinker_has_period_two() {
        let mut grid = Grid::new(9);
        for c in [3, 4, 5] {
            grid.set(4, c, true).unwrap();
        }

        let step1 = advance(&grid, BoundaryPolicy::Wrap);
        assert_ne!(step1, grid);
        assert_eq!(step1.population(), 3);
        // Vertical phase.
        for r in [3, 4, 5] {
            assert!(step1.get(r, 4).unwrap());
        }

        let step2 = advance(&step1, BoundaryPolicy::Wrap);
        assert_eq!(step2, grid);
    }

    #[test]
    fn test_birth_requires_exactly_three() {
        // An L-shaped triomino: the concave corner has exactly 3 neighbors
        // and is born; cells with 2 neighbors survive.
        let mut grid = Grid::new(8);
        for (r, c) in [(3, 3), (4, 3), (4, 4)] {
            grid.set(r, c, true).unwrap();
        }
        let next = advance(&grid, BoundaryPolicy::Fixed);
        assert!(next.get(3, 4).unwrap());
        // Settles into a block.
        assert_eq!(next.population(), 4);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let mut grid = Grid::new(6);
        grid.set(2, 2, true).unwrap();
        let before = grid.clone();
        let counts = count_neighbors(&grid, BoundaryPolicy::Wrap);
        let _ = next_generation(&grid, &counts);
        assert_eq!(grid, before);
    }
}
