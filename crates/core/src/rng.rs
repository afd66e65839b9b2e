//! RNG module - injectable randomness and the deck shuffle
//!
//! Sessions never reach for ambient randomness. Everything that needs a
//! random number takes a [`RandomSource`], so tests can pin a seed and hosts
//! can supply OS entropy.
//!
//! Also provides a simple LCG for deterministic testing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Card;

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Generate random value in range [0, max). `max` is never 0.
    fn next_range(&mut self, max: u32) -> u32;
}

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

    /// Current state, usable as a seed to replay the same sequence.
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// OS-seeded generator for real play.
#[derive(Debug, Clone)]
pub struct EntropyRng {
    inner: StdRng,
}

impl EntropyRng {
    pub fn new() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Seeded variant, mostly for reproducing a reported game.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRng {
    fn next_range(&mut self, max: u32) -> u32 {
        self.inner.random_range(0..max)
    }
}

/// Shuffle a slice in place using Fisher-Yates
pub fn shuffle_in_place<T, R: RandomSource + ?Sized>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_range((i + 1) as u32) as usize;
        slice.swap(i, j);
    }
}

/// Return a shuffled copy of `cards`, leaving the input untouched.
pub fn shuffle<R: RandomSource + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut out = cards.to_vec();
    shuffle_in_place(&mut out, rng);
    out
}
