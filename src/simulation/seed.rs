//! Seed handling — SplitMix64 stream derivation.
//!
//! One user-visible seed drives every random draw of a render. Independent
//! streams (display sample, expectation sample, and the per-chunk generators
//! of the parallel expectation sample) are derived by mixing the base seed
//! with a stream id through SplitMix64, so neighbouring seeds never produce
//! correlated streams the way `seed + i` would with a weak mixer.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Stream id for the displayed payout sample.
pub const DISPLAY_STREAM: u64 = 0;

/// Stream id for the Monte Carlo expectation sample.
pub const EXPECTATION_STREAM: u64 = 1;

/// SplitMix64 PRNG — single u64 state.
#[derive(Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    #[inline(always)]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }
}

/// Seed for sub-stream `stream` of `seed`.
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    let mut sm = SplitMix64::new(seed ^ stream.wrapping_mul(0xd1b54a32d192ed03));
    sm.next_u64()
}

/// Seeded generator for sub-stream `stream` of `seed`.
pub fn stream_rng(seed: u64, stream: u64) -> SmallRng {
    SmallRng::seed_from_u64(derive_seed(seed, stream))
}

/// Fresh seed from OS entropy, for interactive renders that did not ask for one.
pub fn fresh_seed() -> u64 {
    rand::random::<u64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_splitmix64_deterministic() {
        let mut rng1 = SplitMix64::new(42);
        let mut rng2 = SplitMix64::new(42);
        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_streams_differ() {
        assert_ne!(
            derive_seed(7, DISPLAY_STREAM),
            derive_seed(7, EXPECTATION_STREAM)
        );
        assert_ne!(derive_seed(7, 0), derive_seed(8, 0));
    }

    #[test]
    fn test_stream_rng_reproducible() {
        let mut r1 = stream_rng(3, EXPECTATION_STREAM);
        let mut r2 = stream_rng(3, EXPECTATION_STREAM);
        for _ in 0..16 {
            assert_eq!(r1.random::<u64>(), r2.random::<u64>());
        }
    }
}
