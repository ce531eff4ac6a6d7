//! End-state detection over a bounded fingerprint window.

use std::collections::VecDeque;

use lattice_life_core::Grid;
use serde::{Deserialize, Serialize};

/// Classification of a completed generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The run goes on.
    Continuing,
    /// Every cell died.
    Dead,
    /// The grid reproduced itself exactly (still life).
    Stable,
    /// The grid recurred within the history window (period <= capacity).
    Oscillating,
}

impl Outcome {
    /// Whether this outcome halts the run until an explicit reset.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Dead | Outcome::Stable | Outcome::Oscillating)
    }
}

/// Retains a bounded FIFO of recent grid fingerprints to classify each tick
/// as dead, statically stable, periodically oscillating, or continuing.
///
/// A grid whose true cycle period exceeds the window capacity is reported as
/// non-oscillating indefinitely. That bounded-window behavior is deliberate;
/// the detector answers "has recurred recently", not "is periodic".
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    window: VecDeque<u64>,
    capacity: usize,
}

impl HistoryTracker {
    /// Create a tracker retaining up to `capacity` fingerprints.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Classify one generation transition.
    ///
    /// Checks run in priority order: death, then static stability against
    /// `previous`, then recurrence against the window. Only a `Continuing`
    /// outcome grows the window (with `previous`'s fingerprint, evicting the
    /// oldest entry at capacity).
    pub fn classify(&mut self, previous: &Grid, next: &Grid) -> Outcome {
        if next.is_empty() {
            return Outcome::Dead;
        }
        if next == previous {
            return Outcome::Stable;
        }
        if self.window.contains(&next.fingerprint()) {
            return Outcome::Oscillating;
        }

        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(previous.fingerprint());
        Outcome::Continuing
    }

    /// Forget all retained fingerprints.
    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// Number of fingerprints currently retained.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// The configured window capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
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
    fn test_dead_outcome_wins() {
        let mut tracker = HistoryTracker::new(10);
        let previous = grid_with(5, &[(2, 2)]);
        let next = Grid::new(5);
        assert_eq!(tracker.classify(&previous, &next), Outcome::Dead);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_stable_outcome() {
        let mut tracker = HistoryTracker::new(10);
        let block = grid_with(6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        assert_eq!(tracker.classify(&block, &block.clone()), Outcome::Stable);
    }

    #[test]
    fn test_oscillation_detected_on_recurrence() {
        let mut tracker = HistoryTracker::new(10);
        let horizontal = grid_with(7, &[(3, 2), (3, 3), (3, 4)]);
        let vertical = grid_with(7, &[(2, 3), (3, 3), (4, 3)]);

        // Tick 1: horizontal -> vertical, horizontal enters the window.
        assert_eq!(tracker.classify(&horizontal, &vertical), Outcome::Continuing);
        // Tick 2: vertical -> horizontal, which is already in the window.
        assert_eq!(tracker.classify(&vertical, &horizontal), Outcome::Oscillating);
    }

    #[test]
    fn test_window_eviction() {
        let mut tracker = HistoryTracker::new(2);
        let a = grid_with(4, &[(0, 0), (1, 1)]);
        let b = grid_with(4, &[(0, 1), (1, 1)]);
        let c = grid_with(4, &[(0, 2), (1, 1)]);
        let d = grid_with(4, &[(0, 3), (1, 1)]);

        assert_eq!(tracker.classify(&a, &b), Outcome::Continuing);
        assert_eq!(tracker.classify(&b, &c), Outcome::Continuing);
        assert_eq!(tracker.len(), 2);
        // Pushing a third evicts a's fingerprint.
        assert_eq!(tracker.classify(&c, &d), Outcome::Continuing);
        assert_eq!(tracker.len(), 2);
        // Recurrence of the evicted grid is no longer detected: bounded
        // window, documented limitation.
        assert_eq!(tracker.classify(&d, &a), Outcome::Continuing);
    }

    #[test]
    fn test_capacity_floor_is_one() {
        let tracker = HistoryTracker::new(0);
        assert_eq!(tracker.capacity(), 1);
    }

    #[test]
    fn test_clear() {
        let mut tracker = HistoryTracker::new(4);
        let a = grid_with(4, &[(0, 0)]);
        let b = grid_with(4, &[(0, 1)]);
        tracker.classify(&a, &b);
        assert_eq!(tracker.len(), 1);
        tracker.clear();
        assert!(tracker.is_empty());
    }
}
