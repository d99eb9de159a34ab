//! The `ReservationTable` — a space-time occupancy index.
//!
//! Answers four questions: is cell `(x, y)` free at time `t`? Is edge
//! `(x1, y1) -> (x2, y2)` free at time `t`? Can I reserve a whole path?
//! Can I reserve a goal forever?
//!
//! Three independent hashed sets back the table. `rustc-hash`'s FxHash is
//! used in place of the standard SipHash since every key here is a small
//! tuple of integers — FxHash trades DoS-resistance (irrelevant for
//! simulation-internal keys) for materially faster hashing on the hot
//! per-tick lookup path.

use rustc_hash::FxHashSet;

use pk_grid::Position;

use crate::path::{Path, TimedPosition};

type VertexKey = (u32, u32, u64);
type EdgeKey = (u32, u32, u32, u32, u64);
type StaticKey = (u32, u32);

/// Space-time occupancy index. Mutated only by the planner (on reservation)
/// and the scheduler (on goal claim/release); read by both.
#[derive(Default, Debug)]
pub struct ReservationTable {
    vertex: FxHashSet<VertexKey>,
    edge: FxHashSet<EdgeKey>,
    r#static: FxHashSet<StaticKey>,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────────

    #[inline]
    pub fn is_cell_free(&self, pos: Position, t: u64) -> bool {
        !self.r#static.contains(&(pos.x, pos.y))
            && !self.vertex.contains(&(pos.x, pos.y, t))
    }

    /// Forbids both a same-direction re-reservation and a head-on swap: the
    /// edge is blocked if either `(a, b, t)` or `(b, a, t)` is reserved.
    #[inline]
    pub fn is_edge_free(&self, a: Position, b: Position, t: u64) -> bool {
        !self.edge.contains(&(a.x, a.y, b.x, b.y, t))
            && !self.edge.contains(&(b.x, b.y, a.x, a.y, t))
    }

    #[inline]
    pub fn is_static(&self, pos: Position) -> bool {
        self.r#static.contains(&(pos.x, pos.y))
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Reserve every vertex in `path`, plus the edge from each waypoint to
    /// the next.
    pub fn reserve_path(&mut self, path: &Path) {
        for (i, wp) in path.iter().enumerate() {
            self.vertex.insert((wp.pos.x, wp.pos.y, wp.t));
            if i > 0 {
                let prev: TimedPosition = path[i - 1];
                self.edge
                    .insert((prev.pos.x, prev.pos.y, wp.pos.x, wp.pos.y, prev.t));
            }
        }
    }

    /// Inverse of [`reserve_path`][Self::reserve_path]. Idempotent: removing
    /// an entry that isn't present is a no-op.
    pub fn unreserve_path(&mut self, path: &Path) {
        for (i, wp) in path.iter().enumerate() {
            self.vertex.remove(&(wp.pos.x, wp.pos.y, wp.t));
            if i > 0 {
                let prev: TimedPosition = path[i - 1];
                self.edge
                    .remove(&(prev.pos.x, prev.pos.y, wp.pos.x, wp.pos.y, prev.t));
            }
        }
    }

    /// Reserve `pos` permanently. The table has no expiry mechanism — a
    /// goal stays static until [`unreserve_goal`][Self::unreserve_goal] is
    /// called explicitly.
    pub fn reserve_goal(&mut self, pos: Position) {
        self.r#static.insert((pos.x, pos.y));
    }

    /// Idempotent: unreserving a cell that isn't statically reserved is a
    /// no-op.
    pub fn unreserve_goal(&mut self, pos: Position) {
        self.r#static.remove(&(pos.x, pos.y));
    }
}
