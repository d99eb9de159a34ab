//! Grid representation and builder.
//!
//! # Data layout
//!
//! Cells are stored flat, row-major over `(x, y)`, in a single `Vec<CellKind>`
//! sized `width * height`. The three derived cell sets (`parking_cells`,
//! `entry_cells`, `exit_cells`) are computed once by the builder rather than
//! scanned on every query — the grid is immutable for the lifetime of a
//! simulation run, so there is never a reason to recompute them.

use crate::cell::{CellKind, Position};
use crate::error::{GridError, GridResult};

/// An immutable, fixed-size map of typed cells.
///
/// Construct via [`GridBuilder`]; do not build directly.
#[derive(Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellKind>,
    parking_cells: Vec<Position>,
    entry_cells: Vec<Position>,
    exit_cells: Vec<Position>,
}

impl Grid {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (x as usize) * self.height as usize + y as usize
    }

    /// The kind of the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics if `(x, y)` is out of bounds; callers that don't already know
    /// the position is valid should check [`Grid::in_bounds`] first.
    #[inline]
    pub fn kind(&self, x: u32, y: u32) -> CellKind {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn is_drivable(&self, x: u32, y: u32) -> bool {
        self.kind(x, y).is_drivable()
    }

    /// `true` if `(x, y)` lies on the grid boundary but not on a corner.
    /// Used to validate ENTRY/EXIT placement.
    pub fn is_boundary_non_corner(&self, x: u32, y: u32) -> bool {
        if !self.in_bounds(x as i64, y as i64) {
            return false;
        }
        let on_boundary = x == 0 || x == self.width - 1 || y == 0 || y == self.height - 1;
        if !on_boundary {
            return false;
        }
        let is_corner = (x == 0 && y == 0)
            || (x == 0 && y == self.height - 1)
            || (x == self.width - 1 && y == 0)
            || (x == self.width - 1 && y == self.height - 1);
        !is_corner
    }

    pub fn parking_cells(&self) -> &[Position] {
        &self.parking_cells
    }

    pub fn entry_cells(&self) -> &[Position] {
        &self.entry_cells
    }

    pub fn exit_cells(&self) -> &[Position] {
        &self.exit_cells
    }
}

/// Builds a [`Grid`] from a flat, row-major `(x, y)` array of cell kinds.
#[derive(Debug)]
pub struct GridBuilder {
    width: u32,
    height: u32,
    cells: Vec<CellKind>,
}

impl GridBuilder {
    /// Start a builder with every cell defaulted to [`CellKind::Wall`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![CellKind::Wall; (width as usize) * (height as usize)],
        }
    }

    /// Build from a pre-populated flat array, row-major over `(x, y)`
    /// (`cells[x * height + y]`).
    pub fn from_cells(width: u32, height: u32, cells: Vec<CellKind>) -> GridResult<Self> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                got: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn set(&mut self, x: u32, y: u32, kind: CellKind) -> &mut Self {
        let idx = (x as usize) * self.height as usize + y as usize;
        self.cells[idx] = kind;
        self
    }

    /// Consume the builder, validate, and compute derived cell indices.
    pub fn build(self) -> GridResult<Grid> {
        if self.width == 0 || self.height == 0 {
            return Err(GridError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }

        let mut parking_cells = Vec::new();
        let mut entry_cells = Vec::new();
        let mut exit_cells = Vec::new();
        let mut any_drivable = false;

        for x in 0..self.width {
            for y in 0..self.height {
                let kind = self.cells[(x as usize) * self.height as usize + y as usize];
                if kind.is_drivable() {
                    any_drivable = true;
                }
                match kind {
                    CellKind::Parking => parking_cells.push(Position::new(x, y)),
                    CellKind::Entry => entry_cells.push(Position::new(x, y)),
                    CellKind::Exit => exit_cells.push(Position::new(x, y)),
                    _ => {}
                }
            }
        }

        if !any_drivable {
            return Err(GridError::NoDrivableCells);
        }

        Ok(Grid {
            width: self.width,
            height: self.height,
            cells: self.cells,
            parking_cells,
            entry_cells,
            exit_cells,
        })
    }
}
