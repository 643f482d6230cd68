//! Seedable random source for combat rolls.
//!
//! The game threads a single `GameRng` through everything that needs chance, so a
//! fixed seed replays a session exactly.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct GameRng {
    rng: StdRng,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll a uniformly distributed value within `range` (both ends inclusive).
    pub fn roll(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.rng.random_range(range)
    }
}
