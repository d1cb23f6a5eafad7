#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Board shape and mine count for one game.
///
/// Only [`GameConfig::new`] and deserialization create one, and both validate,
/// so a config never asks for more mines than cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    size: Coord2,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.size, raw.mines)
    }
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates a board shape and mine count.
    ///
    /// Both dimensions must be at least one, and there can be at most one mine
    /// per cell. A board made entirely of mines is allowed.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let (rows, cols) = size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSize);
        }

        let capacity = mult(rows, cols);
        if mines > capacity {
            return Err(GameError::TooManyMines {
                requested: mines,
                capacity,
            });
        }

        Ok(Self::new_unchecked(size, mines))
    }

    /// `(rows, cols)`
    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((15, 20), 60)
    }
}
