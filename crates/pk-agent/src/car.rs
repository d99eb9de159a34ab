//! `Car` — one agent's mutable state and lifecycle helpers.
//!
//! Cars are stored array-of-structs, keyed by [`CarId`] in a `HashMap` owned
//! by the scheduler — not column-by-column as in population frameworks built
//! to scan a single field across millions of agents every tick. The planner
//! and reservation table never need more than one car's position and goal
//! at a time, so there is no hot loop here that a struct-of-arrays layout
//! would speed up; a map keyed by id is simpler to reason about and is what
//! this crate uses.

use pk_core::{CarId, Tick};
use pk_grid::Position;
use pk_reservation::Path;

use crate::intent::Intent;

/// One agent's full mutable state.
#[derive(Debug)]
pub struct Car {
    pub id: CarId,
    pub spawn_time: Tick,
    pub is_initial: bool,

    pub current_position: Position,
    pub intent: Intent,
    pub goal: Option<Position>,
    pub path: Path,
    pub path_cursor: usize,

    pub plan_fail_count: u32,
    pub blocked_count: u32,
    pub last_plan_fail_time: Option<Tick>,
}

impl Car {
    pub fn new(id: CarId, start: Position, intent: Intent, spawn_time: Tick, is_initial: bool) -> Self {
        Self {
            id,
            spawn_time,
            is_initial,
            current_position: start,
            intent,
            goal: None,
            path: Vec::new(),
            path_cursor: 0,
            plan_fail_count: 0,
            blocked_count: 0,
            last_plan_fail_time: None,
        }
    }

    #[inline]
    pub fn has_goal(&self) -> bool {
        self.goal.is_some()
    }

    #[inline]
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// `true` once the cursor has consumed every waypoint.
    #[inline]
    pub fn path_exhausted(&self) -> bool {
        self.path_cursor >= self.path.len()
    }

    /// `true` once the path is exhausted and the car actually sits on its goal.
    pub fn has_arrived(&self) -> bool {
        self.path_exhausted() && self.goal == Some(self.current_position)
    }

    pub fn set_path(&mut self, path: Path) {
        self.path = path;
        self.path_cursor = 0;
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
        self.path_cursor = 0;
    }

    /// Where this car wants to be at `now + 1`, without mutating state.
    ///
    /// Fast-forwards a local cursor past any stale entries (`t <= now`); if
    /// the next live entry targets `now + 1` that is the intended position,
    /// otherwise the car intends to hold its current position (either the
    /// path has a future gap or it is exhausted).
    pub fn peek_next(&self, now: Tick) -> Position {
        let mut idx = self.path_cursor;
        while idx < self.path.len() && self.path[idx].t <= now.0 {
            idx += 1;
        }
        match self.path.get(idx) {
            Some(wp) if wp.t == now.0 + 1 => wp.pos,
            _ => self.current_position,
        }
    }

    /// Consume path entries up through `now + 1`. Call this when the car's
    /// resolved final position for the tick matches what its path wanted
    /// (whether that meant moving or holding in place).
    pub fn consume_to(&mut self, now: Tick) {
        while self.path_cursor < self.path.len() && self.path[self.path_cursor].t <= now.0 {
            self.path_cursor += 1;
        }
        if let Some(wp) = self.path.get(self.path_cursor) {
            if wp.t == now.0 + 1 {
                self.path_cursor += 1;
            }
        }
    }
}
