//! Shuffling seam for bracket seeding.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Source of uniform permutations. Tests supply a fixed order.
pub trait RandomSource {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// `rand`-backed shuffler; seeded for replayable brackets, or from entropy.
#[derive(Clone, Debug)]
pub struct RngSource {
    rng: StdRng,
}

impl RngSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl Default for RngSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for RngSource {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
