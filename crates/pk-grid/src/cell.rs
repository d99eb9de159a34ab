//! Cell kinds and grid positions.

use std::fmt;

/// The kind of one grid cell.
///
/// `WALL` is the default: a freshly allocated grid starts fully walled off,
/// and a [`GridBuilder`][crate::GridBuilder] carves roads, parking, and
/// boundary openings into it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Road,
    Parking,
    #[default]
    Wall,
    Entry,
    Exit,
}

impl CellKind {
    /// `true` for every kind a car may ever occupy.
    #[inline]
    pub fn is_drivable(self) -> bool {
        matches!(
            self,
            CellKind::Road | CellKind::Parking | CellKind::Entry | CellKind::Exit
        )
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CellKind::Road => "road",
            CellKind::Parking => "parking",
            CellKind::Wall => "wall",
            CellKind::Entry => "entry",
            CellKind::Exit => "exit",
        };
        write!(f, "{s}")
    }
}

/// A grid coordinate. `x` indexes columns, `y` indexes rows; both are
/// non-negative and bounded by the owning grid's dimensions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
