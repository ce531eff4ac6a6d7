//! The simulation controller state machine.
//!
//! Owns the grid, the generation counter, the end-state detector, the
//! pattern selection, and the statistics windows. An external periodic
//! timer drives one [`SimulationController::step`] per tick; all other
//! operations run between ticks.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use lattice_life_core::{CellCoord, Grid, Pattern};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::PatternCatalog;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::history::{HistoryTracker, Outcome};
use crate::neighbors::count_neighbors;
use crate::placement;
use crate::rule::next_generation;

/// Capacity of the rolling population and tick-duration windows.
const STATS_WINDOW: usize = 20;

/// The controller's current state. Exactly one is active at any time.
///
/// `Stable`, `Dead`, and `Oscillating` are terminal for the run: the engine
/// refuses further stepping until an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimulationState {
    Paused,
    Running,
    RunningChallenge,
    Stable,
    Dead,
    Oscillating,
    PlacePattern,
}

impl SimulationState {
    /// Whether this state ends the run until a reset.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SimulationState::Stable | SimulationState::Dead | SimulationState::Oscillating
        )
    }

    /// Display label for the state.
    pub fn label(&self) -> &'static str {
        match self {
            SimulationState::Paused => "Paused",
            SimulationState::Running => "Running",
            SimulationState::RunningChallenge => "Running Challenge",
            SimulationState::Stable => "Stable",
            SimulationState::Dead => "Dead",
            SimulationState::Oscillating => "Oscillating",
            SimulationState::PlacePattern => "Place Pattern",
        }
    }
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a single step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// State after the step.
    pub state: SimulationState,

    /// Generation counter after the step.
    pub generation: u64,

    /// Live-cell count after the step.
    pub population: usize,

    /// Cells whose value changed this step (redraw hint).
    pub changed: Vec<CellCoord>,

    /// Whether a generation was actually computed. `false` when the
    /// controller was paused, placing, or terminal; the grid is untouched
    /// in that case.
    pub advanced: bool,

    /// Wall-clock duration of the step computation.
    pub duration: Duration,
}

/// Populations recorded at the start and end of a challenge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    /// Live-cell count immediately after the challenge pattern was placed.
    pub initial_population: usize,

    /// Live-cell count at the terminal step.
    pub final_population: usize,
}

/// Grid and generation captured at the start of the current run.
#[derive(Debug, Clone)]
struct RunSnapshot {
    grid: Grid,
    generation: u64,
}

/// Challenge-mode sub-state.
#[derive(Debug, Clone, Copy, Default)]
struct ChallengeState {
    active: bool,
    placed: bool,
    initial_population: usize,
}

/// The simulation state machine.
///
/// Drives one pass of neighbor counting, rule application, and end-state
/// classification per tick, and exposes the pause/resume/reset/challenge
/// operations and pattern-overlay mechanics.
pub struct SimulationController {
    config: EngineConfig,
    catalog: PatternCatalog,
    grid: Grid,
    generation: u64,
    state: SimulationState,
    history: HistoryTracker,
    run_snapshot: Option<RunSnapshot>,
    selection: Option<Pattern>,
    challenge: ChallengeState,
    challenge_record: Option<ChallengeRecord>,
    population_history: VecDeque<usize>,
    tick_times: VecDeque<Duration>,
}

impl SimulationController {
    /// Create a controller from a validated configuration.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let catalog = PatternCatalog::standard()?;
        Ok(Self {
            grid: Grid::new(config.grid_size),
            generation: 0,
            state: SimulationState::Paused,
            history: HistoryTracker::new(config.history_capacity),
            run_snapshot: None,
            selection: None,
            challenge: ChallengeState::default(),
            challenge_record: None,
            population_history: VecDeque::with_capacity(STATS_WINDOW),
            tick_times: VecDeque::with_capacity(STATS_WINDOW),
            catalog,
            config,
        })
    }

    // -------------------------------------------------------------------------
    // Stepping
    // -------------------------------------------------------------------------

    /// Advance one generation if running.
    ///
    /// In any other state this is a no-op: the result carries the current
    /// state with `advanced == false` and the grid is untouched.
    pub fn step(&mut self) -> StepResult {
        if !matches!(
            self.state,
            SimulationState::Running | SimulationState::RunningChallenge
        ) {
            return StepResult {
                state: self.state,
                generation: self.generation,
                population: self.grid.population(),
                changed: Vec::new(),
                advanced: false,
                duration: Duration::ZERO,
            };
        }

        let started = Instant::now();

        // The first tick of a run captures the reset-run snapshot.
        if self.run_snapshot.is_none() {
            self.run_snapshot = Some(RunSnapshot {
                grid: self.grid.clone(),
                generation: self.generation,
            });
        }

        self.generation += 1;

        let counts = count_neighbors(&self.grid, self.config.boundary);
        let next = next_generation(&self.grid, &counts);
        let outcome = self.history.classify(&self.grid, &next);
        let changed = next.diff(&self.grid).unwrap_or_default();

        let population = next.population();
        self.grid = next;

        self.push_population(population);

        match outcome {
            Outcome::Continuing => {}
            Outcome::Dead => self.finish_run(SimulationState::Dead, population),
            Outcome::Stable => self.finish_run(SimulationState::Stable, population),
            Outcome::Oscillating => self.finish_run(SimulationState::Oscillating, population),
        }

        let duration = started.elapsed();
        self.push_tick_time(duration);

        debug!(
            generation = self.generation,
            population,
            changed = changed.len(),
            state = self.state.label(),
            "step_complete"
        );

        StepResult {
            state: self.state,
            generation: self.generation,
            population,
            changed,
            advanced: true,
            duration,
        }
    }

    /// Terminal outcome handling: auto-pause into the terminal state and, if
    /// a challenge run was in flight, record its result.
    fn finish_run(&mut self, terminal: SimulationState, population: usize) {
        self.state = terminal;
        info!(
            generation = self.generation,
            population,
            state = terminal.label(),
            "run_finished"
        );

        if self.challenge.active && self.challenge.placed {
            let record = ChallengeRecord {
                initial_population: self.challenge.initial_population,
                final_population: population,
            };
            self.challenge = ChallengeState::default();
            self.challenge_record = Some(record);
            info!(
                initial_population = record.initial_population,
                final_population = record.final_population,
                "challenge_complete"
            );
        }
    }

    // -------------------------------------------------------------------------
    // Run control
    // -------------------------------------------------------------------------

    /// Begin or continue running.
    ///
    /// Refused from terminal states and during challenge placement; only a
    /// reset can leave those. Clears the history window and the run
    /// snapshot, so a new run begins at the next tick.
    pub fn resume(&mut self) -> bool {
        if self.state != SimulationState::Paused {
            debug!(state = self.state.label(), "resume_refused");
            return false;
        }

        self.history.clear();
        self.run_snapshot = None;
        self.state = if self.challenge.active && self.challenge.placed {
            SimulationState::RunningChallenge
        } else {
            SimulationState::Running
        };
        info!(generation = self.generation, "simulation_resumed");
        true
    }

    /// Pause at the next tick boundary.
    pub fn pause(&mut self) -> bool {
        match self.state {
            SimulationState::Running | SimulationState::RunningChallenge => {
                self.state = SimulationState::Paused;
                info!(generation = self.generation, "simulation_paused");
                true
            }
            _ => false,
        }
    }

    /// Restore the grid and generation captured at the start of the most
    /// recent run, then pause. Without a snapshot this is a full reset.
    pub fn reset_run(&mut self) {
        let Some(snapshot) = self.run_snapshot.take() else {
            debug!("no_run_snapshot_full_reset");
            self.full_reset();
            return;
        };

        // A snapshot whose shape disagrees with the configured grid would
        // corrupt the run; discard it loudly instead of truncating.
        if snapshot.grid.size() != self.config.grid_size {
            warn!(
                snapshot_size = snapshot.grid.size(),
                grid_size = self.config.grid_size,
                "run_snapshot_shape_mismatch"
            );
            self.full_reset();
            return;
        }

        self.grid = snapshot.grid;
        self.generation = snapshot.generation;
        self.state = SimulationState::Paused;
        self.history.clear();
        self.population_history.clear();
        self.tick_times.clear();
        self.cancel_selection();
        info!(generation = self.generation, "run_reset");
    }

    /// Clear the grid to all-dead, the generation to 0, and every history
    /// and statistic, then pause. Exits challenge mode but keeps the last
    /// completed [`ChallengeRecord`].
    pub fn full_reset(&mut self) {
        self.grid = Grid::new(self.config.grid_size);
        self.generation = 0;
        self.state = SimulationState::Paused;
        self.history.clear();
        self.run_snapshot = None;
        self.population_history.clear();
        self.tick_times.clear();
        self.challenge = ChallengeState::default();
        self.cancel_selection();
        info!("full_reset");
    }

    // -------------------------------------------------------------------------
    // Pattern selection and placement
    // -------------------------------------------------------------------------

    /// Select a catalog pattern for placement.
    ///
    /// Selecting the name that is already selected toggles the selection
    /// off, matching click-to-deselect behavior.
    pub fn select_pattern(&mut self, name: &str) -> EngineResult<()> {
        if self.selection.as_ref().is_some_and(|p| p.name() == name) {
            self.selection = None;
            debug!(pattern = name, "selection_toggled_off");
            return Ok(());
        }

        let pattern = self
            .catalog
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::PatternNotFound {
                name: name.to_string(),
            })?;
        debug!(pattern = name, "pattern_selected");
        self.selection = Some(pattern);
        Ok(())
    }

    /// The currently selected (possibly rotated) pattern.
    pub fn selected_pattern(&self) -> Option<&Pattern> {
        self.selection.as_ref()
    }

    /// Rotate the current selection 90° clockwise. No-op without one.
    pub fn rotate_current(&mut self) -> bool {
        match self.selection.take() {
            Some(pattern) => {
                self.selection = Some(pattern.rotate_cw());
                true
            }
            None => false,
        }
    }

    /// Drop the current selection.
    pub fn cancel_selection(&mut self) {
        self.selection = None;
    }

    /// The in-bounds live cells the current selection would cover at
    /// `anchor`. Empty without a selection. Read-only.
    pub fn preview_placement(&self, anchor: CellCoord) -> Vec<CellCoord> {
        match &self.selection {
            Some(pattern) => placement::preview(&self.grid, pattern, anchor),
            None => Vec::new(),
        }
    }

    /// Commit the current selection at `anchor`, consuming the selection.
    ///
    /// Returns the cells that actually changed; empty with no selection or
    /// when the overlay was identical to the grid. The first effective
    /// placement of a pending challenge arms the challenge run.
    pub fn place(&mut self, anchor: CellCoord) -> Vec<CellCoord> {
        let Some(pattern) = self.selection.take() else {
            debug!("place_without_selection");
            return Vec::new();
        };

        let changed = placement::place(&mut self.grid, &pattern, anchor);
        info!(
            pattern = pattern.name(),
            row = anchor.row,
            col = anchor.col,
            changed = changed.len(),
            "pattern_placed"
        );

        if changed.is_empty() {
            return changed;
        }

        if self.state == SimulationState::PlacePattern
            && self.challenge.active
            && !self.challenge.placed
        {
            self.challenge.placed = true;
            self.challenge.initial_population = self.grid.population();
            self.state = SimulationState::RunningChallenge;
            info!(
                initial_population = self.challenge.initial_population,
                "challenge_pattern_placed"
            );
        }

        changed
    }

    // -------------------------------------------------------------------------
    // Challenge mode
    // -------------------------------------------------------------------------

    /// Enter challenge mode: full reset, then await a pattern placement.
    /// Only available from `Paused`.
    pub fn start_challenge(&mut self) -> bool {
        if self.state != SimulationState::Paused {
            debug!(state = self.state.label(), "start_challenge_refused");
            return false;
        }

        self.full_reset();
        self.challenge_record = None;
        self.challenge = ChallengeState {
            active: true,
            placed: false,
            initial_population: 0,
        };
        self.state = SimulationState::PlacePattern;
        info!("challenge_started");
        true
    }

    /// Abandon an in-flight challenge: full reset, record cleared.
    pub fn cancel_challenge(&mut self) -> bool {
        if !self.challenge.active {
            return false;
        }
        self.full_reset();
        self.challenge_record = None;
        info!("challenge_cancelled");
        true
    }

    // -------------------------------------------------------------------------
    // Read-only accessors
    // -------------------------------------------------------------------------

    /// Current state machine state.
    pub fn current_state(&self) -> SimulationState {
        self.state
    }

    /// Generation counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Live-cell count of the current grid.
    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// The current grid, for rendering.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The pattern catalog.
    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The last completed challenge result, if any.
    pub fn challenge_record(&self) -> Option<ChallengeRecord> {
        self.challenge_record
    }

    /// Whether a challenge is active (placing or running).
    pub fn challenge_active(&self) -> bool {
        self.challenge.active
    }

    /// Rolling average step duration over the last 20 ticks.
    pub fn avg_tick_time(&self) -> Option<Duration> {
        if self.tick_times.is_empty() {
            return None;
        }
        let total: Duration = self.tick_times.iter().sum();
        Some(total / self.tick_times.len() as u32)
    }

    /// Population standard deviation over the last 20 ticks.
    ///
    /// Needs at least two samples.
    pub fn population_stddev(&self) -> Option<f64> {
        if self.population_history.len() < 2 {
            return None;
        }
        let n = self.population_history.len() as f64;
        let mean = self.population_history.iter().sum::<usize>() as f64 / n;
        let variance = self
            .population_history
            .iter()
            .map(|&p| {
                let d = p as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        Some(variance.sqrt())
    }

    // Internal helpers

    fn push_population(&mut self, population: usize) {
        if self.population_history.len() == STATS_WINDOW {
            self.population_history.pop_front();
        }
        self.population_history.push_back(population);
    }

    fn push_tick_time(&mut self, duration: Duration) {
        if self.tick_times.len() == STATS_WINDOW {
            self.tick_times.pop_front();
        }
        self.tick_times.push_back(duration);
    }
}

impl fmt::Debug for SimulationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationController")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("population", &self.grid.population())
            .field("grid_size", &self.config.grid_size)
            .field("challenge_active", &self.challenge.active)
            .finish()
    }
}
