//! Seeded random number generation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Create a deterministic RNG from a seed.
///
/// All topology randomness flows through an injected generator, so a fixed
/// seed reproduces a creature exactly.
pub fn seeded_rng(seed: u64) -> Pcg64Mcg {
    Pcg64Mcg::seed_from_u64(seed)
}
