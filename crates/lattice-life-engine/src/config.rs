//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::neighbors::BoundaryPolicy;

/// Configuration for the simulation engine.
///
/// All values are fixed at construction; the grid cannot be resized and the
/// rule cannot be swapped at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Side length of the square grid.
    pub grid_size: usize,

    /// Interval, in milliseconds, at which an external driver should invoke
    /// [`SimulationController::step`](crate::SimulationController::step).
    /// The engine itself never sleeps.
    pub tick_interval_ms: u64,

    /// How neighbor lookups treat the grid edge.
    pub boundary: BoundaryPolicy,

    /// Fingerprint window size for oscillation detection.
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: 100,
            tick_interval_ms: 30,
            boundary: BoundaryPolicy::Wrap,
            history_capacity: 10,
        }
    }
}

impl EngineConfig {
    /// Create a config sized for quick tests.
    pub fn small() -> Self {
        Self {
            grid_size: 16,
            ..Default::default()
        }
    }

    /// The tick interval as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> EngineResult<()> {
        if self.grid_size == 0 {
            return Err(EngineError::InvalidConfig {
                message: "grid_size must be > 0".to_string(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(EngineError::InvalidConfig {
                message: "tick_interval_ms must be > 0".to_string(),
            });
        }
        if self.history_capacity == 0 {
            return Err(EngineError::InvalidConfig {
                message: "history_capacity must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}
