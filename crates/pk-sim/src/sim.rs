//! The scheduler: owns the grid, reservation table, parking manager, and
//! every car, and drives the tick protocol.

use std::collections::HashMap;

use rustc_hash::FxHashSet;

use pk_agent::{Car, Intent};
use pk_core::{CarId, SimRng, Tick};
use pk_grid::{Grid, Position};
use pk_parking::ParkingManager;
use pk_planner::Planner;
use pk_reservation::ReservationTable;

use crate::config::SimConfig;
use crate::observer::SimObserver;
use crate::stats::{RunStatus, RunSummary, Stats};

/// Lower bound (inclusive) of a planner call's randomized ephemeral-obstacle
/// persistence window, in ticks.
const OBSTACLE_PERSISTENCE_MIN: u64 = 10;
/// Upper bound (inclusive).
const OBSTACLE_PERSISTENCE_MAX: u64 = 30;

/// How many ticks ahead an entry cell must be provably free before a new
/// arrival is allowed to claim it.
const ENTRY_SAFETY_WINDOW: u64 = 20;

enum Escalation {
    PlanFailure,
    Blocked,
}

/// The live simulation. Construct with [`SimBuilder`][crate::SimBuilder].
#[derive(Debug)]
pub struct Sim<P: Planner> {
    pub(crate) grid: Grid,
    pub(crate) reservations: ReservationTable,
    pub(crate) parking: ParkingManager,
    pub(crate) planner: P,
    pub(crate) config: SimConfig,
    pub(crate) rng: SimRng,
    pub(crate) tick: Tick,

    /// Every car that is not yet parked: driving, waiting to wake, or
    /// freshly arrived. Parked cars move to `parked_positions` and drop out
    /// of this map entirely.
    pub(crate) active: HashMap<CarId, Car>,
    /// Subset of `active` keys that are seeded EXIT cars not yet woken.
    pub(crate) waiting: Vec<CarId>,
    pub(crate) parked_positions: HashMap<CarId, Position>,
    /// Cars that exited this tick, kept visible in the snapshot for exactly
    /// one tick and dropped by the next tick's cleanup phase.
    pub(crate) exited_last_tick: HashMap<CarId, Position>,

    pub(crate) stats: Stats,
}

impl<P: Planner> Sim<P> {
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Every car's current position, including parked cars.
    pub fn positions_snapshot(&self) -> HashMap<CarId, Position> {
        let mut out: HashMap<CarId, Position> = self
            .active
            .iter()
            .map(|(&id, car)| (id, car.current_position))
            .collect();
        out.extend(self.parked_positions.iter().map(|(&id, &p)| (id, p)));
        out.extend(self.exited_last_tick.iter().map(|(&id, &p)| (id, p)));
        out
    }

    /// The active population is empty and no further arrivals can occur.
    pub fn is_done(&self) -> bool {
        self.active.is_empty()
            && (self.stats.arriving_cars_created >= self.config.max_arriving_cars
                || self.config.arrival_lambda == 0.0)
    }

    /// Advance one tick. The five phases run in a fixed order: cleanup,
    /// wake, advance (plan/intend/resolve/commit), arrival, then the tick
    /// counter itself increments last so every phase above observes the
    /// tick it is acting for.
    pub fn step(&mut self) {
        self.exited_last_tick.clear();
        self.wake_waiting_cars();
        self.advance();
        self.maybe_arrival();
        self.tick = self.tick.offset(1);
    }

    /// Run until [`Sim::is_done`] or `max_ticks`, invoking `observer` at
    /// each tick boundary.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunSummary {
        let status = loop {
            observer.on_tick_start(self.tick);
            self.step();
            observer.on_tick_end(self.tick, &self.stats);
            observer.on_snapshot(self.tick, &self.positions_snapshot());

            if self.is_done() {
                break RunStatus::Completed;
            }
            if let Some(max) = self.config.max_ticks {
                if self.tick.0 >= max {
                    break RunStatus::MaxStepsReached;
                }
            }
        };
        observer.on_sim_end(self.tick);
        RunSummary {
            final_time: self.tick.0,
            status,
            stats: self.stats.clone(),
        }
    }

    // ── Phase 1: wake ────────────────────────────────────────────────────

    fn wake_waiting_cars(&mut self) {
        let now = self.tick;
        let mut woken = Vec::new();
        for &id in &self.waiting {
            if self.rng.gen_bool(self.config.initial_active_exit_rate) {
                woken.push(id);
            }
        }
        for id in woken {
            self.waiting.retain(|&w| w != id);
            let pos = self.active[&id].current_position;
            self.reservations.unreserve_goal(pos);
            self.parking.release_occupied_spot(pos);
            self.plan_or_fail(id, now);
        }
    }

    // ── Phase 2: advance ─────────────────────────────────────────────────

    fn advance(&mut self) {
        let now = self.tick;

        // (a) plan every car without a path, nearest-to-goal first.
        let mut needing_plan: Vec<CarId> = self
            .active
            .iter()
            .filter(|&(id, car)| !self.waiting.contains(id) && !car.has_path())
            .map(|(&id, _)| id)
            .collect();
        needing_plan.sort_by_key(|&id| {
            let car = &self.active[&id];
            match car.goal {
                Some(g) => car.current_position.manhattan(g),
                None => u32::MAX,
            }
        });
        for id in needing_plan {
            self.ensure_goal(id);
            if self.active[&id].goal.is_none() {
                continue;
            }
            self.plan_or_fail(id, now);
        }

        // (b) every car (driving or waiting) states its intended next cell.
        let mut intended: HashMap<CarId, Position> = HashMap::new();
        let mut current: HashMap<CarId, Position> = HashMap::new();
        for (&id, car) in &self.active {
            current.insert(id, car.current_position);
            if self.waiting.contains(&id) {
                intended.insert(id, car.current_position);
            } else {
                intended.insert(id, car.peek_next(now));
            }
        }

        // (c) resolve vertex and edge-swap conflicts to a fixpoint.
        resolve_conflicts(&mut intended, &current);

        // (d) commit every car's resolved position.
        let ids: Vec<CarId> = self.active.keys().copied().collect();
        for id in ids {
            let target = intended[&id];
            let from = current[&id];
            self.commit_car(id, now, target, from);
        }
    }

    fn ensure_goal(&mut self, id: CarId) {
        let has_goal = self.active[&id].goal.is_some();
        if has_goal {
            return;
        }
        let goal = self.parking.assign_goal(&self.active[&id]);
        if let Some(g) = goal {
            self.active.get_mut(&id).unwrap().goal = Some(g);
        }
    }

    fn unplanned_obstacles(&self, exclude: CarId) -> FxHashSet<Position> {
        self.active
            .iter()
            .filter(|&(&id, car)| id != exclude && !self.waiting.contains(&id) && !car.has_path())
            .map(|(_, car)| car.current_position)
            .collect()
    }

    fn plan_or_fail(&mut self, id: CarId, start_time: Tick) {
        let obstacles = self.unplanned_obstacles(id);
        let persistence = self
            .rng
            .gen_range(OBSTACLE_PERSISTENCE_MIN..=OBSTACLE_PERSISTENCE_MAX);
        let (start, goal) = {
            let car = &self.active[&id];
            match car.goal {
                Some(g) => (car.current_position, g),
                None => return,
            }
        };

        let result = self.planner.plan(
            &self.grid,
            &self.reservations,
            start,
            start_time.0,
            goal,
            self.config.planning_horizon,
            &obstacles,
            persistence,
        );

        match result {
            Some(path) => {
                self.reservations.reserve_path(&path);
                let car = self.active.get_mut(&id).unwrap();
                car.set_path(path);
                car.plan_fail_count = 0;
                self.stats.total_planned += 1;
            }
            None => {
                self.stats.total_failed_plans += 1;
                let car = self.active.get_mut(&id).unwrap();
                car.plan_fail_count += 1;
                car.last_plan_fail_time = Some(start_time);
                self.apply_escalation(id, Escalation::PlanFailure);
            }
        }
    }

    fn commit_car(&mut self, id: CarId, now: Tick, target: Position, from: Position) {
        if self.waiting.contains(&id) {
            return;
        }

        if target != from {
            let car = self.active.get_mut(&id).unwrap();
            car.consume_to(now);
            car.current_position = target;
            car.blocked_count = 0;
            self.finish_or_continue(id, now);
            return;
        }

        // Resolution held this car in place. Was that voluntary (the path
        // wanted to hold too) or was it blocked by a conflict?
        let wanted_to_move = self.active[&id].peek_next(now) != from;
        if wanted_to_move {
            self.reservations.unreserve_path(&self.active[&id].path);
            let car = self.active.get_mut(&id).unwrap();
            car.clear_path();
            car.blocked_count += 1;
            self.apply_escalation(id, Escalation::Blocked);
        } else {
            let car = self.active.get_mut(&id).unwrap();
            car.consume_to(now);
            self.finish_or_continue(id, now);
        }
    }

    /// After a commit, check whether the car has arrived, or has exhausted
    /// its path without reaching its goal (a degenerate case — force a
    /// replan by dropping the empty path so the next tick's planning pass
    /// picks it back up).
    fn finish_or_continue(&mut self, id: CarId, now: Tick) {
        let car = &self.active[&id];
        if car.has_arrived() {
            self.complete_car(id, now);
        } else if car.path_exhausted() && car.has_path() {
            self.active.get_mut(&id).unwrap().clear_path();
        }
    }

    fn apply_escalation(&mut self, id: CarId, kind: Escalation) {
        let car = &self.active[&id];
        let intent = car.intent;
        let count = match kind {
            Escalation::PlanFailure => car.plan_fail_count,
            Escalation::Blocked => car.blocked_count,
        };

        match intent {
            Intent::Exit => {
                if count > 0 && count % 5 == 0 {
                    if let Some(new_goal) = self.parking.random_exit_cell(&mut self.rng) {
                        self.active.get_mut(&id).unwrap().goal = Some(new_goal);
                    }
                }
            }
            Intent::Park => {
                if count > 0 && count % 3 == 0 {
                    self.parking.release_assigned_spot(id);
                    self.active.get_mut(&id).unwrap().goal = None;
                }
                if count >= 12 {
                    self.parking.release_assigned_spot(id);
                    self.active.get_mut(&id).unwrap().intent = Intent::Exit;
                    self.active.get_mut(&id).unwrap().goal = None;
                    let new_goal = self.parking.assign_goal(&self.active[&id]);
                    self.active.get_mut(&id).unwrap().goal = new_goal;
                }
            }
            Intent::None => {}
        }
    }

    fn complete_car(&mut self, id: CarId, now: Tick) {
        let car = self.active.remove(&id).unwrap();
        self.reservations.unreserve_path(&car.path);

        match car.intent {
            Intent::Park => {
                self.stats.total_parked += 1;
                if !car.is_initial {
                    self.stats.arriving_cars_parked_count += 1;
                    self.stats.sum_steps_to_park += now.since(car.spawn_time);
                }
                self.parking.mark_occupied(car.id, car.current_position);
                self.reservations.reserve_goal(car.current_position);
                self.parked_positions.insert(id, car.current_position);
            }
            Intent::Exit => {
                if car.is_initial {
                    self.stats.initial_active_cars_exited_count += 1;
                    self.stats.sum_steps_to_exit += now.since(car.spawn_time);
                }
                self.exited_last_tick.insert(id, car.current_position);
            }
            Intent::None => {}
        }
    }

    // ── Phase 3: arrivals ────────────────────────────────────────────────

    fn maybe_arrival(&mut self) {
        if self.stats.arriving_cars_created >= self.config.max_arriving_cars {
            return;
        }
        if self.parking.free_spot_count() == 0 {
            return;
        }
        let Some(entry) = self.free_entry() else {
            return;
        };
        if !self.rng.gen_bool(self.config.arrival_lambda) {
            return;
        }

        let spawn_time = self.tick;
        let plan_start = spawn_time.offset(1);
        let mut car = self.parking.create_active_car(entry, Intent::Park, spawn_time, false);
        let id = car.id;
        self.ensure_goal_for(&mut car);
        self.active.insert(id, car);
        self.stats.arriving_cars_created += 1;
        self.stats.total_arrived += 1;

        if self.active[&id].goal.is_none() {
            self.stats.total_failed_plans += 1;
            return;
        }
        self.plan_or_fail(id, plan_start);
    }

    fn ensure_goal_for(&mut self, car: &mut Car) {
        if car.goal.is_none() {
            car.goal = self.parking.assign_goal(car);
        }
    }

    /// A shuffled entry cell with no car on it and no reservation in the
    /// next [`ENTRY_SAFETY_WINDOW`] ticks, so a freshly spawned car never
    /// materializes into an imminent collision.
    pub(crate) fn free_entry(&mut self) -> Option<Position> {
        let mut entries = self.parking.entry_cells().to_vec();
        self.rng.shuffle(&mut entries);

        let occupied: FxHashSet<Position> = self
            .active
            .values()
            .map(|c| c.current_position)
            .chain(self.parked_positions.values().copied())
            .collect();

        for entry in entries {
            if occupied.contains(&entry) {
                continue;
            }
            let safe = (0..ENTRY_SAFETY_WINDOW)
                .all(|dt| self.reservations.is_cell_free(entry, self.tick.0 + dt));
            if safe {
                return Some(entry);
            }
        }
        None
    }
}

/// Resolve vertex conflicts (two cars intend the same cell) and edge-swap
/// conflicts (two cars intend to trade cells) by reverting the losing side
/// to its current position, repeating until nothing changes.
///
/// A car that is already sitting on a contested cell wins it outright;
/// otherwise the lowest `CarId` wins. This is deterministic and requires no
/// extra randomness per tick, matching the single-ordered-draw-sequence
/// contract the rest of the scheduler follows.
pub(crate) fn resolve_conflicts(
    intended: &mut HashMap<CarId, Position>,
    current: &HashMap<CarId, Position>,
) {
    loop {
        let mut changed = false;

        let mut by_target: HashMap<Position, Vec<CarId>> = HashMap::new();
        for (&id, &pos) in intended.iter() {
            by_target.entry(pos).or_default().push(id);
        }
        for (pos, ids) in by_target.iter() {
            if ids.len() < 2 {
                continue;
            }
            let winner = ids
                .iter()
                .copied()
                .find(|id| current[id] == *pos)
                .unwrap_or_else(|| *ids.iter().min().unwrap());
            for &id in ids {
                if id != winner && intended[&id] != current[&id] {
                    intended.insert(id, current[&id]);
                    changed = true;
                }
            }
        }

        let pos_to_car: HashMap<Position, CarId> = current.iter().map(|(&id, &p)| (p, id)).collect();
        let ids: Vec<CarId> = intended.keys().copied().collect();
        for a in ids {
            let curr_a = current[&a];
            let next_a = intended[&a];
            if next_a == curr_a {
                continue;
            }
            if let Some(&b) = pos_to_car.get(&next_a) {
                let curr_b = current[&b];
                let next_b = intended[&b];
                if next_b == curr_a {
                    if intended[&a] != curr_a {
                        intended.insert(a, curr_a);
                        changed = true;
                    }
                    if intended[&b] != curr_b {
                        intended.insert(b, curr_b);
                        changed = true;
                    }
                }
            }
        }

        if !changed {
            break;
        }
    }
}
