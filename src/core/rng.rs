//! Deterministic Random Number Generator
//!
//! Uses Xorshift128+ for fast, deterministic randomness. Enemy decisions
//! draw from a single world-owned generator so replays are exact.

use serde::{Serialize, Deserialize};

/// Deterministic PRNG using Xorshift128+ algorithm.
///
/// Given the same seed, produces the exact same sequence on any platform.
///
/// # Example
///
/// ```
/// use platformer_core::core::rng::DeterministicRng;
///
/// let mut a = DeterministicRng::new(12345);
/// let mut b = DeterministicRng::new(12345);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Xorshift must never sit on the all-zero state
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range [0, max).
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % max as u64) as u32
    }

    /// Roll a `percent` in 100 chance. Values of 100 or more always succeed.
    #[inline]
    pub fn chance(&mut self, percent: u32) -> bool {
        self.next_int(100) < percent
    }

    /// Raw generator state, for state hashing.
    pub fn state(&self) -> [u64; 2] {
        self.state
    }
}

/// SplitMix64 step used for seeding.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = DeterministicRng::new(777);
        let mut b = DeterministicRng::new(777);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = DeterministicRng::new(1);
        let mut b = DeterministicRng::new(2);
        let same = (0..32).filter(|_| a.next_u64() == b.next_u64()).count();
        assert!(same < 32);
    }

    #[test]
    fn test_next_int_bounds() {
        let mut rng = DeterministicRng::new(42);
        for _ in 0..1000 {
            assert!(rng.next_int(7) < 7);
        }
        assert_eq!(rng.next_int(0), 0);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = DeterministicRng::new(9);
        for _ in 0..200 {
            assert!(!rng.chance(0));
            assert!(rng.chance(100));
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = DeterministicRng::new(0);
        assert_ne!(rng.state(), [0, 0]);
        let _ = rng.next_u64();
        assert_ne!(rng.state(), [0, 0]);
    }
}
