use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid dimensions must be at least 1x1")]
    InvalidSize,
    #[error("Too many mines, at least one cell must be safe")]
    TooManyMines,
    #[error("Unknown preset {0:?}, expected one of easy, normal, hard")]
    UnknownPreset(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
