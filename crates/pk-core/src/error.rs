//! Shared error primitives.
//!
//! Sub-crates define their own narrower error enums and convert into
//! [`PkError`] via `From`, or wrap it as one variant — whichever keeps error
//! sites clean for that crate.

use thiserror::Error;

use crate::CarId;

/// Common top-level error type, also usable directly by `pk-core` callers.
#[derive(Debug, Error)]
pub enum PkError {
    #[error("car {0} not found")]
    CarNotFound(CarId),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type PkResult<T> = Result<T, PkError>;
