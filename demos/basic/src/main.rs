//! basic-demo — smallest runnable example for the parking-lot routing
//! simulation.
//!
//! Builds a small lot with two rows of parking either side of a single
//! through-road, seeds a handful of cars that are already parked and a
//! handful waiting to leave, lets a trickle of new arrivals in over time,
//! and prints a summary once every car still in scope has finished moving.

use anyhow::Result;

use pk_core::Tick;
use pk_grid::{CellKind, GridBuilder};
use pk_sim::{RecordingObserver, RunStatus, SimBuilder, SimConfig};

const WIDTH: u32 = 10;
const HEIGHT: u32 = 5;
const SEED: u64 = 7;

fn build_lot() -> pk_grid::Grid {
    let mut b = GridBuilder::new(WIDTH, HEIGHT);
    for x in 0..WIDTH {
        b.set(x, HEIGHT / 2, CellKind::Road);
    }
    for x in 1..WIDTH - 1 {
        b.set(x, 1, CellKind::Parking);
        b.set(x, HEIGHT - 2, CellKind::Parking);
    }
    b.set(0, HEIGHT / 2, CellKind::Entry);
    b.set(WIDTH - 1, HEIGHT / 2, CellKind::Exit);
    b.build().expect("demo grid is well-formed")
}

fn main() -> Result<()> {
    println!("=== basic-demo — parking lot routing simulation ===");

    let grid = build_lot();
    println!("Grid: {}x{}, {} parking cells", grid.width(), grid.height(), grid.parking_cells().len());

    let mut config = SimConfig::new(SEED);
    config.initial_parked_cars = 4;
    config.initial_active_cars = 3;
    config.initial_active_exit_rate = 0.4;
    config.arrival_lambda = 0.3;
    config.max_arriving_cars = 6;
    config.max_ticks = Some(2_000);

    let mut sim = SimBuilder::new(config, grid).build()?;
    println!(
        "Seeded: {} parked, {} waiting to exit",
        sim.stats().total_parked,
        sim.stats().total_arrived
    );

    let mut observer = RecordingObserver::default();
    let summary = sim.run(&mut observer);

    println!();
    match summary.status {
        RunStatus::Completed => println!("Run completed at {}", Tick(summary.final_time)),
        RunStatus::MaxStepsReached => println!("Run hit max_ticks at {}", Tick(summary.final_time)),
    }
    println!("  total_arrived:      {}", summary.stats.total_arrived);
    println!("  total_planned:      {}", summary.stats.total_planned);
    println!("  total_failed_plans: {}", summary.stats.total_failed_plans);
    println!("  total_parked:       {}", summary.stats.total_parked);
    println!(
        "  initial exits:      {}",
        summary.stats.initial_active_cars_exited_count
    );
    if let Some(avg) = summary.stats.avg_steps_to_park() {
        println!("  avg steps to park:  {avg:.1}");
    }
    if let Some(avg) = summary.stats.avg_steps_to_exit() {
        println!("  avg steps to exit:  {avg:.1}");
    }
    println!("  snapshots recorded: {}", observer.snapshots.len());

    Ok(())
}
