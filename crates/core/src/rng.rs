//! RNG module - 7-bag random piece generation
//!
//! A bag is one shuffled permutation of all seven kinds. The shuffle is a
//! Fisher-Yates pass driven by a [`RandomSource`] that yields uniform values
//! in `[0, 1)`, so callers decide where randomness comes from:
//!
//! - [`EntropyRng`]: OS-seeded `StdRng`, the default for real games
//! - [`SimpleRng`]: seeded LCG for reproducible games and benchmarks
//! - [`ScriptedRng`]: replays fixed values so tests can force exact bags

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{PieceKind, BAG_SIZE};

/// Uniform random source in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// OS-seeded generator backed by `rand`'s `StdRng`
#[derive(Debug, Clone)]
pub struct EntropyRng {
    rng: StdRng,
}

impl EntropyRng {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant, useful when a host wants replayable seeds
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRng {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
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

    /// Current internal state (feeds a restart with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_unit(&mut self) -> f64 {
        // 2^32 keeps the result strictly below 1.0
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always yields 0.0
    pub fn zeros() -> Self {
        Self::new(vec![0.0])
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        v
    }
}

/// Build one bag: every kind exactly once, shuffled by Fisher-Yates.
///
/// For `i` from 6 down to 1, swaps slot `i` with `floor(r * (i + 1))`.
///
/// # Examples
///
/// ```
/// use blockfall_core::rng::{create_bag, ScriptedRng};
/// use blockfall_core::types::PieceKind;
///
/// // r = 0.999.. keeps every element in place
/// let bag = create_bag(&mut ScriptedRng::new(vec![0.9999]));
/// assert_eq!(bag, PieceKind::ALL);
/// ```
pub fn create_bag(rng: &mut dyn RandomSource) -> [PieceKind; BAG_SIZE] {
    let mut bag = PieceKind::ALL;
    for i in (1..bag.len()).rev() {
        let r = rng.next_unit();
        let j = ((r * (i + 1) as f64).floor().max(0.0) as usize).min(i);
        bag.swap(i, j);
    }
    bag
}

/// Upcoming pieces, consumed from the front and refilled in whole bags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceQueue {
    pieces: VecDeque<PieceKind>,
}

impl PieceQueue {
    /// Create a queue holding one fresh bag
    pub fn new(rng: &mut dyn RandomSource) -> Self {
        let mut queue = Self::default();
        queue.push_bag(rng);
        queue
    }

    /// Build a queue with an exact sequence (test setups, scripted starts)
    pub fn from_pieces(pieces: impl IntoIterator<Item = PieceKind>) -> Self {
        Self {
            pieces: pieces.into_iter().collect(),
        }
    }

    /// Append one shuffled bag
    pub fn push_bag(&mut self, rng: &mut dyn RandomSource) {
        self.pieces.extend(create_bag(rng));
    }

    /// Append whole bags until at least `min_len` pieces are queued
    pub fn ensure(&mut self, min_len: usize, rng: &mut dyn RandomSource) {
        while self.pieces.len() < min_len {
            self.push_bag(rng);
        }
    }

    /// Draw the next piece
    pub fn pop(&mut self) -> Option<PieceKind> {
        self.pieces.pop_front()
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<PieceKind> {
        self.pieces.front().copied()
    }

    /// Up to `count` upcoming pieces in draw order
    pub fn preview(&self, count: usize) -> impl Iterator<Item = PieceKind> + '_ {
        self.pieces.iter().copied().take(count)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.pieces.iter().copied()
    }
}
