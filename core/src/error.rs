use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("Board must be square, between 4x4 and 8x8")]
    InvalidSize,
}

pub type Result<T> = core::result::Result<T, GameError>;
