use core::fmt;
use core::ops::Index;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::*;

/// A fully generated minefield: every cell knows whether it holds a mine and
/// how many of its neighbors do.
///
/// Cells are stored row-major in one contiguous buffer and indexed by
/// `(row, col)`. The shape never changes after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct RawBoard {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    /// Rebuilds the board from the stored mine mask and only accepts the input
    /// when its counts agree with that rebuild. Visibility flags carry over.
    fn try_from(raw: RawBoard) -> Result<Self> {
        let (rows, cols) = raw.cells.dim();
        let size = (
            Coord::try_from(rows).map_err(|_| GameError::InvalidSize)?,
            Coord::try_from(cols).map_err(|_| GameError::InvalidSize)?,
        );
        GameConfig::new(size, 0)?;

        let mines: MineSet = raw
            .cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect();
        let mut board = Self::from_mine_set(size, &mines);
        if board.mine_count != raw.mine_count {
            return Err(GameError::InconsistentBoard);
        }

        for (index, stored) in raw.cells.indexed_iter() {
            let rebuilt = &mut board.cells[index];
            if rebuilt.adjacent_mine_count() != stored.adjacent_mine_count() {
                return Err(GameError::InconsistentBoard);
            }
            rebuilt.is_open = stored.is_open;
            rebuilt.is_flagged = stored.is_flagged;
            rebuilt.is_questioned = stored.is_questioned;
        }

        Ok(board)
    }
}

impl Board {
    /// Builds a board for `config`, asking `sampler` where the mines go.
    pub fn generate(config: GameConfig, sampler: impl CoordinateSampler) -> Self {
        let mines = sampler.sample(config);
        let board = Self::from_mine_set(config.size(), &mines);

        // double check mine count
        if board.mine_count != config.mines() {
            log::warn!(
                "Generated board count mismatch, actual: {}, requested: {}",
                board.mine_count,
                config.mines()
            );
        }
        log::debug!(
            "Generated {}x{} board with {} mines",
            config.rows(),
            config.cols(),
            board.mine_count
        );
        board
    }

    /// Builds a board with mines at exactly `mine_coords`. Repeated coordinates
    /// count once.
    pub fn from_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::new(size, 0)?;

        let mut mines = MineSet::new();
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mines.insert(coords);
        }

        Ok(Self::from_mine_set(size, &mines))
    }

    /// Marks each mine and bumps the count of each of its neighbors, mines
    /// included. Every coordinate in `mines` must lie inside `size`.
    fn from_mine_set(size: Coord2, mines: &MineSet) -> Self {
        let mut cells: Array2<Cell> = Array2::default(size.to_nd_index());

        for &coords in mines {
            cells[coords.to_nd_index()].plant_mine();
            for neighbor in neighbors_of(coords, size) {
                cells[neighbor.to_nd_index()].bump_adjacent();
            }
        }

        Self {
            cells,
            mine_count: mines.len() as CellCount,
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// Mutable access for the visibility flags. Mine placement and counts stay
    /// read-only through [`Cell`]'s accessors.
    pub fn cell_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&mut self.cells[coords.to_nd_index()])
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }

    /// Every cell with its coordinates, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
    }

    pub fn neighbors_of(&self, coords: Coord2) -> Neighbors {
        self.cells.iter_neighbors(coords).collect()
    }

    /// Text grid of glyphs, one line per row.
    pub fn render(&self) -> alloc::string::String {
        use alloc::string::ToString;
        self.to_string()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        for row in self.rows() {
            for cell in row.iter() {
                f.write_char(cell.glyph())?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

/// Generates a new board with `mine_count` mines placed uniformly at random.
pub fn generate_board(size: Coord2, mine_count: CellCount, seed: u64) -> Result<Board> {
    let config = GameConfig::new(size, mine_count)?;
    Ok(Board::generate(config, ShuffleSampler::new(seed)))
}
