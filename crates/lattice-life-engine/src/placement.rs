//! Bounded pattern overlay onto the grid.
//!
//! Placement never wraps, even when the simulation runs under the toroidal
//! boundary policy: targets outside the grid are silently skipped.

use lattice_life_core::{CellCoord, Grid, Pattern};

/// Overlay `pattern` onto `grid` anchored at `anchor` (the pattern's local
/// origin), clipping to grid bounds.
///
/// The pattern overwrites within its bounding box: a dead cell in the
/// definition clears a previously-live grid cell. Returns the coordinates
/// whose value actually changed, in row-major order.
pub fn place(grid: &mut Grid, pattern: &Pattern, anchor: CellCoord) -> Vec<CellCoord> {
    let mut changed = Vec::new();
    for r in 0..pattern.height() {
        for c in 0..pattern.width() {
            let (row, col) = (anchor.row + r, anchor.col + c);
            if !grid.contains(row, col) {
                continue;
            }
            let value = pattern.is_alive(r, c);
            if let Ok(current) = grid.get(row, col) {
                if current != value {
                    grid.set(row, col, value).ok();
                    changed.push(CellCoord::new(row, col));
                }
            }
        }
    }
    changed
}

/// The in-bounds live cells `pattern` would cover when anchored at `anchor`.
///
/// Read-only; used for ghost-overlay rendering before a commit.
pub fn preview(grid: &Grid, pattern: &Pattern, anchor: CellCoord) -> Vec<CellCoord> {
    let mut covered = Vec::new();
    for r in 0..pattern.height() {
        for c in 0..pattern.width() {
            if !pattern.is_alive(r, c) {
                continue;
            }
            let (row, col) = (anchor.row + r, anchor.col + c);
            if grid.contains(row, col) {
                covered.push(CellCoord::new(row, col));
            }
        }
    }
    covered
}
