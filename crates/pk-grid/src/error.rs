use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid has zero area ({width} x {height})")]
    EmptyGrid { width: u32, height: u32 },

    #[error("cell kind array length {got} does not match width*height {expected}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("grid has no drivable cells")]
    NoDrivableCells,
}

pub type GridResult<T> = Result<T, GridError>;
