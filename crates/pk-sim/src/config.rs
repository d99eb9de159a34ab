//! Top-level simulation configuration.

/// Parameters controlling car arrival, initial population, and planning
/// limits. Construct directly or via [`SimBuilder`][crate::SimBuilder].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Per-plan tick cap: a planner call fails if it can't reach the goal
    /// within this many ticks of the car's start time.
    pub planning_horizon: u64,

    /// Advertised goal-reservation horizon. The reservation table installs
    /// an unbounded static reservation regardless of this value — see the
    /// reservation table's module docs.
    pub goal_reserve_horizon: u64,

    /// Per-tick Bernoulli arrival probability, in `[0, 1]`.
    pub arrival_lambda: f64,

    /// Total arrivals allowed over the run.
    pub max_arriving_cars: u32,

    /// Agents pre-placed as static obstacles (already parked at tick 0).
    pub initial_parked_cars: u32,

    /// Agents pre-placed with intent EXIT, waiting to be woken.
    pub initial_active_cars: u32,

    /// Per-tick Bernoulli wake-up probability for a waiting EXIT car.
    pub initial_active_exit_rate: f64,

    /// Master RNG seed.
    pub seed: u64,

    /// Optional hard cap on ticks, purely a runaway-loop backstop. `None`
    /// means run until the active population naturally drains.
    pub max_ticks: Option<u64>,
}

impl SimConfig {
    /// A reasonable starting point for tests and demos. Override fields as
    /// needed.
    pub fn new(seed: u64) -> Self {
        Self {
            planning_horizon: 100,
            goal_reserve_horizon: 1000,
            arrival_lambda: 0.0,
            max_arriving_cars: 0,
            initial_parked_cars: 0,
            initial_active_cars: 0,
            initial_active_exit_rate: 1.0,
            seed,
            max_ticks: None,
        }
    }
}
