//! The space-time path type shared by the planner and the reservation table.

use pk_grid::Position;

/// One waypoint in a space-time path: a cell occupied at a specific tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TimedPosition {
    pub pos: Position,
    pub t: u64,
}

impl TimedPosition {
    #[inline]
    pub fn new(pos: Position, t: u64) -> Self {
        Self { pos, t }
    }
}

/// A strictly time-increasing sequence of [`TimedPosition`]s, the first
/// entry being the planner's start state and the last its goal.
pub type Path = Vec<TimedPosition>;
