//! Conway life simulation engine with end-state detection, pattern overlay,
//! and a controlling state machine.
//!
//! The engine simulates a two-state cellular automaton on a fixed-size
//! square grid under the B3/S23 rule. It is deliberately rendering-free: a
//! presentation layer drives [`SimulationController::step`] from a periodic
//! timer and reads back the grid, scalar statistics, and the current state
//! label.
//!
//! ## Core concepts
//!
//! - **Grid**: the N×N cell matrix, replaced wholesale each generation
//! - **BoundaryPolicy**: toroidal wrap or fixed dead border for neighbor
//!   lookups
//! - **Outcome**: per-tick classification into continuing / dead / stable /
//!   oscillating, via a bounded fingerprint window
//! - **PatternCatalog**: named still lifes, oscillators, spaceships, guns,
//!   and methuselahs for interactive overlay
//! - **SimulationController**: the state machine tying it together,
//!   including the pattern-challenge scoring mode
//!
//! ## One tick
//!
//! ```text
//! step() = count_neighbors(grid)           // Moore counts, 0..=8
//!        -> next_generation(grid, counts)  // B3/S23, pure
//!        -> HistoryTracker::classify       // dead | stable | oscillating | continuing
//!        -> state + statistics update
//! ```
//!
//! Concurrency model: single logical thread of control. All mutation goes
//! through `&mut SimulationController`; pausing takes effect at tick
//! boundaries.

mod catalog;
mod config;
mod controller;
mod error;
mod history;
mod neighbors;
mod placement;
mod rule;

pub use catalog::{PatternCatalog, PatternCategory};
pub use config::EngineConfig;
pub use controller::{ChallengeRecord, SimulationController, SimulationState, StepResult};
pub use error::{EngineError, EngineResult};
pub use history::{HistoryTracker, Outcome};
pub use neighbors::{count_neighbors, BoundaryPolicy};
pub use placement::{place, preview};
pub use rule::next_generation;

// Core data types, re-exported for downstream convenience.
pub use lattice_life_core::{CellCoord, CoreError, Grid, Pattern};
