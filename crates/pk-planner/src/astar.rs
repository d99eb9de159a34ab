//! Time-expanded A* over the `(x, y, t)` search space.
//!
//! # Node representation
//!
//! Nodes are packed into a single `u64` key, `t * area + x * height + y`,
//! rather than boxed tuples — this keeps the open-set heap and the
//! came-from/g-score maps to flat integer keys, which is both faster to
//! hash and cheaper to store than a three-field struct for the node counts
//! this search explores.
//!
//! # Tie-breaking
//!
//! Ties on `f = g + h` are broken by ascending `g` (deeper nodes pop first,
//! which empirically avoids exploring wait-heavy detours before direct
//! ones), then by ascending packed key for full determinism.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use pk_grid::{CellKind, Grid, Position};
use pk_reservation::{Path, ReservationTable, TimedPosition};

/// The four cardinal moves plus "wait in place", in a fixed order so that
/// successor generation (and therefore search outcome) is deterministic.
const MOVES: [(i64, i64); 5] = [(0, 1), (0, -1), (1, 0), (-1, 0), (0, 0)];

#[derive(Copy, Clone, Eq, PartialEq)]
struct OpenEntry {
    f: u32,
    g: u32,
    key: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse every field so the smallest
        // (f, g, key) triple pops first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.g.cmp(&self.g))
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pluggable single-agent planner. The scheduler depends only on this
/// trait, so an alternative search (e.g. a cooperative M* variant) can be
/// substituted without touching tick logic.
pub trait Planner {
    /// Find a conflict-free path from `start` at `start_time` to `goal`,
    /// respecting `reservations` and the given ephemeral obstacles.
    ///
    /// `obstacles` are ignored once `t >= start_time + obstacle_persistence`.
    /// Returns `None` if no path exists within `horizon` ticks of
    /// `start_time`.
    #[allow(clippy::too_many_arguments)]
    fn plan(
        &self,
        grid: &Grid,
        reservations: &ReservationTable,
        start: Position,
        start_time: u64,
        goal: Position,
        horizon: u64,
        obstacles: &FxHashSet<Position>,
        obstacle_persistence: u64,
    ) -> Option<Path>;
}

/// The default time-expanded A* planner.
#[derive(Default, Debug)]
pub struct AStarPlanner;

impl Planner for AStarPlanner {
    fn plan(
        &self,
        grid: &Grid,
        reservations: &ReservationTable,
        start: Position,
        start_time: u64,
        goal: Position,
        horizon: u64,
        obstacles: &FxHashSet<Position>,
        obstacle_persistence: u64,
    ) -> Option<Path> {
        if !grid.in_bounds(start.x as i64, start.y as i64)
            || !grid.in_bounds(goal.x as i64, goal.y as i64)
        {
            return None;
        }
        if !grid.is_drivable(start.x, start.y) || !grid.is_drivable(goal.x, goal.y) {
            return None;
        }
        if obstacles.contains(&start) {
            return None;
        }

        let height = grid.height() as u64;
        let area = grid.width() as u64 * height;
        let max_time = start_time + horizon;
        let persist_until = start_time + obstacle_persistence;

        let pack = |pos: Position, t: u64| -> u64 {
            t * area + (pos.x as u64) * height + pos.y as u64
        };
        let unpack = |key: u64| -> (Position, u64) {
            let t = key / area;
            let idx = key % area;
            let x = idx / height;
            let y = idx % height;
            (Position::new(x as u32, y as u32), t)
        };

        let start_key = pack(start, start_time);
        let mut g_score: FxHashMap<u64, u32> = FxHashMap::default();
        let mut came_from: FxHashMap<u64, u64> = FxHashMap::default();
        g_score.insert(start_key, 0);

        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        open.push(OpenEntry {
            f: start.manhattan(goal),
            g: 0,
            key: start_key,
        });

        while let Some(OpenEntry { g, key, .. }) = open.pop() {
            // Stale entry: a better path to this node was already found.
            match g_score.get(&key) {
                Some(&best) if best == g => {}
                _ => continue,
            }

            let (pos, t) = unpack(key);
            if pos == goal {
                return Some(reconstruct(&came_from, key, unpack));
            }
            if t >= max_time {
                continue;
            }

            for &(dx, dy) in &MOVES {
                let nx = pos.x as i64 + dx;
                let ny = pos.y as i64 + dy;
                let nt = t + 1;
                if !grid.in_bounds(nx, ny) {
                    continue;
                }
                let npos = Position::new(nx as u32, ny as u32);

                let kind = grid.kind(npos.x, npos.y);
                if kind == CellKind::Wall {
                    continue;
                }
                if kind == CellKind::Exit && npos != goal {
                    continue;
                }
                if kind == CellKind::Entry && npos != start && npos != goal {
                    continue;
                }
                if obstacles.contains(&npos) && nt < persist_until {
                    continue;
                }
                if reservations.is_static(npos) || !reservations.is_cell_free(npos, nt) {
                    continue;
                }
                if !reservations.is_edge_free(pos, npos, t) {
                    continue;
                }

                let tentative_g = g + 1;
                let neighbor_key = pack(npos, nt);
                let better = match g_score.get(&neighbor_key) {
                    Some(&prev) => tentative_g < prev,
                    None => true,
                };
                if !better {
                    continue;
                }

                came_from.insert(neighbor_key, key);
                g_score.insert(neighbor_key, tentative_g);
                let h = npos.manhattan(goal);
                open.push(OpenEntry {
                    f: tentative_g + h,
                    g: tentative_g,
                    key: neighbor_key,
                });
            }
        }

        None
    }
}

fn reconstruct(
    came_from: &FxHashMap<u64, u64>,
    goal_key: u64,
    unpack: impl Fn(u64) -> (Position, u64),
) -> Path {
    let mut keys = vec![goal_key];
    let mut cur = goal_key;
    while let Some(&prev) = came_from.get(&cur) {
        keys.push(prev);
        cur = prev;
    }
    keys.reverse();
    keys.into_iter()
        .map(|k| {
            let (pos, t) = unpack(k);
            TimedPosition::new(pos, t)
        })
        .collect()
}
