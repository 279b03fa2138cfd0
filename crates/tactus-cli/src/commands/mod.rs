//! CLI subcommands.

pub mod batch;
pub mod calibrate;
pub mod render;
pub mod soundtrack;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seed an RNG from `--seed`, or from entropy when none was given.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
