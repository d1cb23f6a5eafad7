use super::*;

/// Draws uniformly random coordinates and throws away repeats until enough
/// distinct ones are collected.
///
/// Expected draws grow sharply as the mine density approaches the full board,
/// so a completely full board is handled without drawing at all.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionSampler {
    seed: u64,
}

impl RejectionSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl CoordinateSampler for RejectionSampler {
    fn sample(self, config: GameConfig) -> MineSet {
        use rand::prelude::*;

        let wanted = config.mines as usize;
        let total_cells = config.total_cells();

        if config.mines >= total_cells {
            return full_set(config.size);
        }

        let (rows, cols) = config.size;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines = MineSet::new();
        let mut draws: u64 = 0;

        while mines.len() < wanted {
            let candidate = (rng.random_range(0..rows), rng.random_range(0..cols));
            draws += 1;
            mines.insert(candidate);
        }

        log::debug!(
            "Rejection sampling placed {} mines in {} draws",
            mines.len(),
            draws
        );
        mines
    }
}
