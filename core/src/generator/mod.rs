use alloc::collections::BTreeSet;

use crate::*;
pub use rejection::*;
pub use shuffle::*;

mod rejection;
mod shuffle;

/// Distinct coordinates chosen to hold mines.
pub type MineSet = BTreeSet<Coord2>;

/// Picks `config.mines` distinct coordinates inside `config.size`.
///
/// A validated [`GameConfig`] never asks for more mines than cells, so samplers
/// always terminate.
pub trait CoordinateSampler {
    fn sample(self, config: GameConfig) -> MineSet;
}

/// Samples `count` distinct coordinates on a board of `size` with the default
/// bounded-time sampler.
pub fn sample_distinct_coordinates(size: Coord2, count: CellCount, seed: u64) -> Result<MineSet> {
    let config = GameConfig::new(size, count)?;
    Ok(ShuffleSampler::new(seed).sample(config))
}

/// Seed derived from the wall clock, for callers that do not need reproducible boards.
pub fn clock_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

/// Every coordinate of the board, used when the board is entirely mines.
fn full_set(size: Coord2) -> MineSet {
    let (rows, cols) = size;
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .collect()
}

/// Maps a row-major flat index back to `(row, col)`.
fn unflatten(index: CellCount, cols: Coord) -> Coord2 {
    let cols = CellCount::from(cols);
    ((index / cols) as Coord, (index % cols) as Coord)
}
