//! Deterministic RNG for pack generation
//!
//! This module provides a no_std compatible RNG trait and implementation.
//! The browser client seeds it from `getrandom`, the simulator from a CLI
//! seed, and tests substitute scripted sequences.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

/// Source of uniform randomness for pack generation
pub trait PackRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in range [0, max)
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Roll a percentage in range [0, 100)
    fn roll_percent(&mut self) -> u32 {
        self.gen_range(100) as u32
    }
}

impl<R: PackRng + ?Sized> PackRng for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// XorShift32 generator. Not cryptographic; one seed always replays the
/// same opening.
#[derive(Debug, Clone, Encode, Decode, TypeInfo)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Fold both halves of the seed into the state. A zero state would
    /// stick at zero, so it is bumped to 1.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }
}

impl PackRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}
