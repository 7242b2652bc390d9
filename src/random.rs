//! Seedable random sources.
//!
//! Every stochastic operator takes `&mut R where R: Rng`; this module only
//! decides how a run turns its configured seed into a generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates the generator for one run from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Resolves an optional seed, drawing a fresh one from the OS when unset.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Draws `count` child seeds from a parent seed.
///
/// Used to give independent trials their own streams while keeping the
/// whole batch reproducible from one number.
pub fn derive_seeds(seed: u64, count: usize) -> Vec<u64> {
    let mut rng = create_rng(seed);
    (0..count).map(|_| rng.random()).collect()
}
