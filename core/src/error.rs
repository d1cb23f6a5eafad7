use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    InvalidSize,
    #[error("Too many mines: requested {requested} but only {capacity} cells fit")]
    TooManyMines { requested: CellCount, capacity: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("A cell cannot touch {0} mines")]
    InvalidAdjacentCount(u8),
    #[error("Cell counts do not match the mine layout")]
    InconsistentBoard,
}

pub type Result<T> = core::result::Result<T, GameError>;
