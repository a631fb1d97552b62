//! Deterministic RNG utilities for reproducible tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Create a deterministic `ChaCha8Rng` from a seed.
///
/// All test randomization should go through this to ensure reproducibility.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Three values drawn from `[lo, hi)` and sorted ascending.
///
/// Roughly one in five triples has a repeated vertex, so shoulder and
/// singleton triangles get exercised as well.
pub fn random_ordered_triple(rng: &mut impl Rng, lo: f64, hi: f64) -> [f64; 3] {
    let mut triple = [rng.gen_range(lo..hi), rng.gen_range(lo..hi), rng.gen_range(lo..hi)];
    triple.sort_by(f64::total_cmp);
    match rng.gen_range(0..10) {
        0 => triple[1] = triple[0],
        1 => triple[1] = triple[2],
        _ => {}
    }
    triple
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
