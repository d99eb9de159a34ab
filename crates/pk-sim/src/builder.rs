//! Fluent builder that validates configuration, seeds the initial
//! population, and hands back a ready-to-run [`Sim`].

use std::collections::HashMap;

use pk_agent::Intent;
use pk_core::{SimRng, Tick};
use pk_grid::Grid;
use pk_parking::ParkingManager;
use pk_planner::{AStarPlanner, Planner};
use pk_reservation::ReservationTable;

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::sim::Sim;
use crate::stats::Stats;

/// Builds a [`Sim`]. Defaults to [`AStarPlanner`]; swap in another
/// [`Planner`] impl with [`SimBuilder::planner`].
pub struct SimBuilder<P: Planner = AStarPlanner> {
    config: SimConfig,
    grid: Grid,
    planner: P,
}

impl SimBuilder<AStarPlanner> {
    pub fn new(config: SimConfig, grid: Grid) -> Self {
        Self {
            config,
            grid,
            planner: AStarPlanner,
        }
    }
}

impl<P: Planner> SimBuilder<P> {
    /// Replace the planner with any other [`Planner`] implementation.
    pub fn planner<Q: Planner>(self, planner: Q) -> SimBuilder<Q> {
        SimBuilder {
            config: self.config,
            grid: self.grid,
            planner,
        }
    }

    /// Validate configuration against the grid's parking capacity, seed the
    /// initial parked and waiting-EXIT population, and return a `Sim` ready
    /// for [`Sim::step`] or [`Sim::run`].
    pub fn build(self) -> SimResult<Sim<P>> {
        let SimBuilder {
            mut config,
            grid,
            planner,
        } = self;

        if config.planning_horizon == 0 {
            return Err(SimError::Config(
                "planning_horizon must be greater than 0".into(),
            ));
        }

        let mut parking = ParkingManager::new(&grid);
        let total_spots = parking.total_parking_cells() as u32;

        if config.initial_parked_cars > total_spots {
            return Err(SimError::Config(format!(
                "initial_parked_cars ({}) exceeds total parking capacity ({})",
                config.initial_parked_cars, total_spots
            )));
        }
        let required = config.initial_parked_cars + config.initial_active_cars;
        if required > total_spots {
            let max_active = total_spots - config.initial_parked_cars;
            if config.initial_active_cars > max_active {
                eprintln!(
                    "[pk-sim] warning: not enough parking capacity for {} initial active cars \
                     alongside {} initial parked cars ({} spots total); capping initial_active_cars to {}",
                    config.initial_active_cars, config.initial_parked_cars, total_spots, max_active
                );
                config.initial_active_cars = max_active;
            }
        }

        let mut rng = SimRng::new(config.seed);
        let mut reservations = ReservationTable::new();
        let mut stats = Stats::default();
        let mut parked_positions = HashMap::new();
        let mut active = HashMap::new();
        let mut waiting = Vec::new();

        for _ in 0..config.initial_parked_cars {
            if parking.free_spot_count() == 0 {
                break;
            }
            let Some(car) = parking.create_parked_car(&mut rng, Tick::ZERO) else {
                break;
            };
            reservations.reserve_goal(car.current_position);
            parked_positions.insert(car.id, car.current_position);
            stats.total_parked += 1;
        }

        for _ in 0..config.initial_active_cars {
            let Some(spot) = parking.take_and_occupy_random_free_spot(&mut rng) else {
                break;
            };
            let car = parking.create_active_car(spot, Intent::Exit, Tick::ZERO, true);
            reservations.reserve_goal(spot);
            stats.total_arrived += 1;
            waiting.push(car.id);
            active.insert(car.id, car);
        }

        Ok(Sim {
            grid,
            reservations,
            parking,
            planner,
            config,
            rng,
            tick: Tick::ZERO,
            active,
            waiting,
            parked_positions,
            exited_last_tick: HashMap::new(),
            stats,
        })
    }
}
