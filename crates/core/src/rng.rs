//! RNG module - seeded randomness for block values, targets and tip rolls
//!
//! A small LCG keeps games reproducible: the same seed always produces the
//! same grid, the same targets and the same tip refresh rolls.

use crate::types::{MAX_BLOCK_VALUE, MIN_BLOCK_VALUE, TARGET_MAX, TARGET_MIN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift reduction: the low bits of an LCG are weak, so the
    /// result is taken from the high half of the product.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Generate random value in range [lo, hi]
    pub fn next_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_range(hi - lo + 1)
    }

    /// Returns true with the given percent probability.
    pub fn chance_percent(&mut self, percent: u32) -> bool {
        self.next_range(100) < percent
    }

    /// Random block value in 1..=9.
    pub fn block_value(&mut self) -> u8 {
        self.next_inclusive(MIN_BLOCK_VALUE as u32, MAX_BLOCK_VALUE as u32) as u8
    }

    /// Random target in 10..=30.
    pub fn target(&mut self) -> u32 {
        self.next_inclusive(TARGET_MIN, TARGET_MAX)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
