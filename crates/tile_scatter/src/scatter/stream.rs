//! Per-row random streams.
//!
//! [`seed_for_row`] derives an independent seed for each grid row from a parent seed, so
//! rows can be sampled in any order (or partitioned across workers) and still produce
//! identical output.

/// Derive the seed for row `y` from `base_seed`.
pub fn seed_for_row(base_seed: u64, y: usize) -> u64 {
    let row = y as u64;
    mix_u64(base_seed ^ row.wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15))
}

/// Finalizer from SplitMix64.
#[inline]
pub(crate) fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}
