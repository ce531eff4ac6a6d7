//! Conway's Game of Life in the terminal, driven by the simulation engine.
//!
//! Seeds a few catalog patterns, runs until the engine classifies the run
//! as dead, stable, or oscillating, and prints the rolling statistics.
//!
//! Run with:
//! ```bash
//! cargo run --example terminal_life -p lattice-life-engine
//! ```

use std::thread;

use lattice_life_engine::{CellCoord, EngineConfig, SimulationController, StepResult};

/// Print the grid with ANSI escape codes, cursor reset to the top.
fn print_grid(ctrl: &SimulationController, result: &StepResult) {
    print!("\x1B[2J\x1B[H");

    let size = ctrl.grid().size();
    println!(
        "  Generation {:06}  |  {}  |  Population {}",
        result.generation,
        result.state.label(),
        result.population
    );

    print!("  ┌");
    for _ in 0..size {
        print!("─");
    }
    println!("┐");

    for row in 0..size {
        print!("  │");
        for col in 0..size {
            let alive = ctrl.grid().get(row, col).unwrap_or(false);
            if alive {
                print!("\x1B[92m█\x1B[0m");
            } else {
                print!(" ");
            }
        }
        println!("│");
    }

    print!("  └");
    for _ in 0..size {
        print!("─");
    }
    println!("┘");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let config = EngineConfig {
        grid_size: 40,
        tick_interval_ms: 80,
        ..Default::default()
    };
    let interval = config.tick_interval();
    let mut ctrl = SimulationController::new(config)?;

    // Seed the board from the catalog.
    ctrl.select_pattern("Glider")?;
    ctrl.place(CellCoord::new(2, 2));
    ctrl.select_pattern("Pulsar")?;
    ctrl.place(CellCoord::new(12, 20));
    ctrl.select_pattern("R-pentomino")?;
    ctrl.place(CellCoord::new(28, 8));

    ctrl.resume();

    let max_generations = 500;
    let mut last = ctrl.step();
    print_grid(&ctrl, &last);

    while last.advanced && !last.state.is_terminal() && last.generation < max_generations {
        thread::sleep(interval);
        last = ctrl.step();
        print_grid(&ctrl, &last);
    }

    println!();
    println!("  Finished: {}", last.state.label());
    if let Some(avg) = ctrl.avg_tick_time() {
        println!("  Avg tick time: {:?}", avg);
    }
    if let Some(stddev) = ctrl.population_stddev() {
        println!("  Population stddev: {:.2}", stddev);
    }
    println!("  Final step: {}", serde_json::to_string_pretty(&last)?);

    Ok(())
}
