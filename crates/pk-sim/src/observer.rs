//! Simulation observer trait for progress reporting and data collection.

use std::collections::HashMap;

use pk_core::{CarId, Tick};
use pk_grid::Position;

use crate::stats::Stats;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop. All methods have default no-op implementations so
/// implementors only override what they need.
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, with the running stats as of that tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &Stats) {}

    /// Called once per tick with the published position snapshot
    /// (car_id -> position), including cars pending removal this tick.
    fn on_snapshot(&mut self, _tick: Tick, _positions: &HashMap<CarId, Position>) {}

    /// Called once after the run loop exits.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// An in-memory observer that records one snapshot per tick and the final
/// stats. Used by tests and the demo binary; this crate ships no file-output
/// backend since persistence is out of scope.
#[derive(Default)]
pub struct RecordingObserver {
    pub snapshots: Vec<(Tick, HashMap<CarId, Position>)>,
    pub final_stats: Option<Stats>,
}

impl SimObserver for RecordingObserver {
    fn on_snapshot(&mut self, tick: Tick, positions: &HashMap<CarId, Position>) {
        self.snapshots.push((tick, positions.clone()));
    }

    fn on_tick_end(&mut self, _tick: Tick, stats: &Stats) {
        self.final_stats = Some(stats.clone());
    }
}
