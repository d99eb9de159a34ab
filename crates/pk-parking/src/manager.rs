//! `ParkingManager` — slot allocation and exit-cell selection.
//!
//! Free/assigned/occupied slots are kept in `BTreeSet<Position>` rather than
//! a hashed set: nearest-spot selection does a linear scan over free spots
//! picking the minimum by Manhattan distance, and ties need a stable,
//! reproducible winner for seed-equivalence across runs. Iterating a
//! `BTreeSet` always yields positions in the same `(x, y)` order, so
//! `Iterator::min_by_key`'s first-wins tie-break is deterministic without
//! an extra sort step.

use std::collections::{BTreeSet, HashMap};

use pk_core::{CarId, SimRng, Tick};
use pk_grid::{Grid, Position};

use pk_agent::{Car, Intent};

#[derive(Debug)]
pub struct ParkingManager {
    entry_cells: Vec<Position>,
    exit_cells: Vec<Position>,

    free_spots: BTreeSet<Position>,
    assigned_spots: HashMap<CarId, Position>,
    occupied_spots: BTreeSet<Position>,

    next_car_id: u32,
}

impl ParkingManager {
    pub fn new(grid: &Grid) -> Self {
        Self {
            entry_cells: grid.entry_cells().to_vec(),
            exit_cells: grid.exit_cells().to_vec(),
            free_spots: grid.parking_cells().iter().copied().collect(),
            assigned_spots: HashMap::new(),
            occupied_spots: BTreeSet::new(),
            next_car_id: 0,
        }
    }

    pub fn entry_cells(&self) -> &[Position] {
        &self.entry_cells
    }

    pub fn exit_cells(&self) -> &[Position] {
        &self.exit_cells
    }

    pub fn free_spot_count(&self) -> usize {
        self.free_spots.len()
    }

    pub fn total_parking_cells(&self) -> usize {
        self.free_spots.len() + self.assigned_spots.len() + self.occupied_spots.len()
    }

    fn next_id(&mut self) -> CarId {
        let id = CarId(self.next_car_id);
        self.next_car_id += 1;
        id
    }

    // ── Car creation ─────────────────────────────────────────────────────

    /// Create a new active car at `start` with the given intent. Does not
    /// touch any slot set.
    pub fn create_active_car(
        &mut self,
        start: Position,
        intent: Intent,
        spawn_time: Tick,
        is_initial: bool,
    ) -> Car {
        let id = self.next_id();
        Car::new(id, start, intent, spawn_time, is_initial)
    }

    /// Create a car pre-placed on a uniformly random free slot, marking that
    /// slot occupied immediately. Used to seed the simulation's initial
    /// parked population.
    pub fn create_parked_car(&mut self, rng: &mut SimRng, spawn_time: Tick) -> Option<Car> {
        let spots: Vec<Position> = self.free_spots.iter().copied().collect();
        let spot = *rng.choose(&spots)?;

        self.free_spots.remove(&spot);
        self.occupied_spots.insert(spot);

        let id = self.next_id();
        let mut car = Car::new(id, spot, Intent::None, spawn_time, true);
        car.goal = Some(spot);
        Some(car)
    }

    // ── Goal assignment ──────────────────────────────────────────────────

    /// Assign a goal to `car` per its intent, returning the chosen position.
    /// Returns `None` if no slot/exit is available, or the intent is
    /// `Intent::None`.
    pub fn assign_goal(&mut self, car: &Car) -> Option<Position> {
        match car.intent {
            Intent::Park => self.choose_free_parking_spot(car),
            Intent::Exit => self.choose_exit_cell(car),
            Intent::None => None,
        }
    }

    fn choose_free_parking_spot(&mut self, car: &Car) -> Option<Position> {
        let spot = *self
            .free_spots
            .iter()
            .min_by_key(|p| p.manhattan(car.current_position))?;
        self.free_spots.remove(&spot);
        self.assigned_spots.insert(car.id, spot);
        Some(spot)
    }

    fn choose_exit_cell(&self, car: &Car) -> Option<Position> {
        self.exit_cells
            .iter()
            .min_by_key(|p| p.manhattan(car.current_position))
            .copied()
    }

    /// Choose a new exit goal uniformly at random, used by the failure
    /// escalation policy to break deadlocks between an EXIT car and its
    /// previously chosen exit.
    pub fn random_exit_cell(&self, rng: &mut SimRng) -> Option<Position> {
        rng.choose(&self.exit_cells).copied()
    }

    pub fn mark_occupied(&mut self, car_id: CarId, spot: Position) {
        self.assigned_spots.remove(&car_id);
        self.occupied_spots.insert(spot);
    }

    /// Return a car's assigned-but-not-yet-occupied slot to the free pool.
    /// No-op if the car has no assigned slot.
    pub fn release_assigned_spot(&mut self, car_id: CarId) {
        if let Some(spot) = self.assigned_spots.remove(&car_id) {
            if !self.occupied_spots.contains(&spot) {
                self.free_spots.insert(spot);
            }
        }
    }

    /// Return a parked car's occupied slot to the free pool, for when a
    /// waiting initial EXIT car wakes up and vacates its cell.
    pub fn release_occupied_spot(&mut self, spot: Position) {
        self.occupied_spots.remove(&spot);
        self.free_spots.insert(spot);
    }

    /// Consume a uniformly random free slot and mark it occupied without
    /// creating a car for it. Used to seed initial waiting EXIT cars, which
    /// physically sit on a parking cell before they start moving — treating
    /// the cell as occupied (rather than letting it fall out of every set)
    /// keeps the free/assigned/occupied partition of `parking_cells` exact
    /// even while the car is still waiting to wake up.
    pub fn take_and_occupy_random_free_spot(&mut self, rng: &mut SimRng) -> Option<Position> {
        let spots: Vec<Position> = self.free_spots.iter().copied().collect();
        let spot = *rng.choose(&spots)?;
        self.free_spots.remove(&spot);
        self.occupied_spots.insert(spot);
        Some(spot)
    }
}
