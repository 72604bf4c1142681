use thiserror::Error;

/// Everything that can go wrong while building or running a simulation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
    #[error("iteration count must be a positive integer, got {0:?}")]
    InvalidIterationCount(String),
    #[error("alive probability must be within [0, 1], got {0}")]
    InvalidProbability(f32),
    #[error("invalid rule: {0:?}")]
    ParseRule(String),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
