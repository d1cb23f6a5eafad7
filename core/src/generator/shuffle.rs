use hashbrown::HashMap;

use super::*;

/// Partial Fisher-Yates shuffle over the row-major flattened board.
///
/// Only the swapped slots are remembered, so time and memory scale with the
/// mine count instead of the board area, and no draw is ever wasted.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleSampler {
    seed: u64,
}

impl ShuffleSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl CoordinateSampler for ShuffleSampler {
    fn sample(self, config: GameConfig) -> MineSet {
        use rand::prelude::*;

        let total_cells = config.total_cells();

        if config.mines >= total_cells {
            return full_set(config.size);
        }

        let cols = config.size.1;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        // slot -> value for every slot that no longer holds its own index
        let mut displaced: HashMap<CellCount, CellCount> = HashMap::new();
        let mut mines = MineSet::new();

        for slot in 0..config.mines {
            let pick = rng.random_range(slot..total_cells);
            let at_slot = displaced.get(&slot).copied().unwrap_or(slot);
            let at_pick = displaced.get(&pick).copied().unwrap_or(pick);
            displaced.insert(pick, at_slot);
            mines.insert(unflatten(at_pick, cols));
            log::trace!("Mine {} at flat index {}", slot, at_pick);
        }

        log::debug!(
            "Shuffle sampling placed {} mines over {} cells",
            mines.len(),
            total_cells
        );
        mines
    }
}
