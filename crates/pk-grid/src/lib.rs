//! `pk-grid` — static map representation for the parking-lot routing simulation.
//!
//! | Module  | Contents                          |
//! |---------|------------------------------------|
//! | [`cell`]| `CellKind`, `Position`            |
//! | [`grid`]| `Grid`, `GridBuilder`             |
//! | [`error`]| `GridError`, `GridResult`        |

pub mod cell;
pub mod error;
pub mod grid;

#[cfg(test)]
mod tests;

pub use cell::{CellKind, Position};
pub use error::{GridError, GridResult};
pub use grid::{Grid, GridBuilder};
