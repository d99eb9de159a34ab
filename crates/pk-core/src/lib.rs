//! `pk-core` — foundational types for the parking-lot routing simulation.
//!
//! This crate is a dependency of every other `pk-*` crate. It intentionally
//! has no `pk-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                         |
//! |----------|-----------------------------------|
//! | [`ids`]  | `CarId`                          |
//! | [`time`] | `Tick`                           |
//! | [`rng`]  | `SimRng` — the simulation's single deterministic RNG |
//! | [`error`]| `PkError`, `PkResult`            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

pub use error::{PkError, PkResult};
pub use ids::CarId;
pub use rng::SimRng;
pub use time::Tick;
