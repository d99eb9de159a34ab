use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("grid error: {0}")]
    Grid(#[from] pk_grid::GridError),
}

pub type SimResult<T> = Result<T, SimError>;
