use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Glyph shown for an opened mine.
pub const MINE_GLYPH: char = '*';
/// Glyph shown for a closed, flagged cell.
pub const FLAG_GLYPH: char = 'F';
/// Glyph shown for a closed cell marked with a question.
pub const QUESTION_GLYPH: char = '?';
/// Glyph shown for any other closed cell.
pub const BLANK_GLYPH: char = ' ';

/// One position on the board.
///
/// Mine placement and the adjacency count are fixed once the board is built
/// and are only readable. The visibility flags are plain fields for whatever
/// drives play to update.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCell")]
pub struct Cell {
    is_mine: bool,
    adjacent_mine_count: u8,
    pub is_open: bool,
    pub is_flagged: bool,
    pub is_questioned: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCell {
    is_mine: bool,
    adjacent_mine_count: u8,
    #[serde(default)]
    is_open: bool,
    #[serde(default)]
    is_flagged: bool,
    #[serde(default)]
    is_questioned: bool,
}

impl TryFrom<RawCell> for Cell {
    type Error = GameError;

    fn try_from(raw: RawCell) -> Result<Self> {
        if raw.adjacent_mine_count > 8 {
            return Err(GameError::InvalidAdjacentCount(raw.adjacent_mine_count));
        }
        Ok(Self {
            is_mine: raw.is_mine,
            adjacent_mine_count: raw.adjacent_mine_count,
            is_open: raw.is_open,
            is_flagged: raw.is_flagged,
            is_questioned: raw.is_questioned,
        })
    }
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Mines among the neighbors. Computed for mine cells too.
    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    pub(crate) fn plant_mine(&mut self) {
        self.is_mine = true;
    }

    pub(crate) fn bump_adjacent(&mut self) {
        debug_assert!(self.adjacent_mine_count < 8);
        self.adjacent_mine_count += 1;
    }

    /// The single character a display layer draws for this cell.
    pub fn glyph(&self) -> char {
        if self.is_open {
            if self.is_mine {
                MINE_GLYPH
            } else {
                char::from(b'0' + self.adjacent_mine_count)
            }
        } else if self.is_flagged {
            FLAG_GLYPH
        } else if self.is_questioned {
            QUESTION_GLYPH
        } else {
            BLANK_GLYPH
        }
    }
}
