//! State Hashing for Replay Verification
//!
//! Deterministic SHA-256 hashing of world state. Two runs fed the same
//! level, seed and inputs must produce identical hashes every frame.

use sha2::{Sha256, Digest};

use super::fixed::Fixed;
use super::rect::Rect;
use super::vec2::FixedVec2;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for world state.
///
/// Wraps SHA-256 with helpers for the simulation's value types.
/// Order of updates is significant.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for world state.
    pub fn for_world_state() -> Self {
        Self::new(b"PLATFORMER_WORLD_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a Fixed value.
    #[inline]
    pub fn update_fixed(&mut self, value: Fixed) {
        self.update_i32(value);
    }

    /// Update with a FixedVec2.
    #[inline]
    pub fn update_vec2(&mut self, value: FixedVec2) {
        self.update_fixed(value.x);
        self.update_fixed(value.y);
    }

    /// Update with a rectangle.
    #[inline]
    pub fn update_rect(&mut self, value: Rect) {
        self.update_i32(value.x);
        self.update_i32(value.y);
        self.update_i32(value.width);
        self.update_i32(value.height);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for replay verification.
///
/// Called by `World::compute_hash()`; the closure adds entity state.
pub fn compute_state_hash<F>(frame: u64, rng_seed: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_world_state();

    // Always hash frame and seed first
    hasher.update_u64(frame);
    hasher.update_u64(rng_seed);

    add_state(&mut hasher);

    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::to_fixed;

    #[test]
    fn test_state_hasher_determinism() {
        let make_hash = || {
            let mut hasher = StateHasher::for_world_state();
            hasher.update_u32(100);
            hasher.update_fixed(to_fixed(5.5));
            hasher.update_vec2(FixedVec2::new(to_fixed(1.0), to_fixed(2.0)));
            hasher.update_rect(Rect::new(1, 2, 3, 4));
            hasher.update_bool(true);
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_compute_state_hash() {
        let hash = compute_state_hash(100, 12345, |hasher| {
            hasher.update_fixed(to_fixed(5.0));
        });
        let same = compute_state_hash(100, 12345, |hasher| {
            hasher.update_fixed(to_fixed(5.0));
        });
        let next_frame = compute_state_hash(101, 12345, |hasher| {
            hasher.update_fixed(to_fixed(5.0));
        });

        assert_eq!(hash, same);
        assert_ne!(hash, next_frame);
    }
}
