//! Deterministic RNG for finalization jitter
//!
//! This module provides a no_std compatible RNG trait and implementation.
//! Substrate provides the seed from its randomness source; tests pass a fixed seed.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

/// Trait for random number generation during finalization
pub trait GuessRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in the inclusive range [min, max].
    ///
    /// Returns `min` when the range is empty.
    fn bounded(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        let offset = self.next_u32() as u64 % span;
        (min as i64 + offset as i64) as i32
    }
}

/// XorShift32 RNG - simple, fast, deterministic
///
/// The same seed will always produce the same sequence.
#[derive(Debug, Clone, Encode, Decode, TypeInfo)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Create a new RNG from a u64 seed
    ///
    /// The seed is combined into a u32, ensuring state is never 0.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }
}

impl GuessRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xorshift_deterministic() {
        let mut rng1 = XorShiftRng::seed_from_u64(12345);
        let mut rng2 = XorShiftRng::seed_from_u64(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_xorshift_different_seeds() {
        let mut rng1 = XorShiftRng::seed_from_u64(12345);
        let mut rng2 = XorShiftRng::seed_from_u64(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = XorShiftRng::seed_from_u64(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_bounded_stays_in_range() {
        let mut rng = XorShiftRng::seed_from_u64(42);

        for _ in 0..1_000 {
            let val = rng.bounded(-100, 100);
            assert!((-100..=100).contains(&val));
        }
    }

    #[test]
    fn test_bounded_reaches_both_signs() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let draws: Vec<i32> = (0..500).map(|_| rng.bounded(-100, 100)).collect();

        assert!(draws.iter().any(|v| *v < 0));
        assert!(draws.iter().any(|v| *v > 0));
    }

    #[test]
    fn test_bounded_empty_range() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        assert_eq!(rng.bounded(5, 5), 5);
        assert_eq!(rng.bounded(5, -5), 5);
    }
}
