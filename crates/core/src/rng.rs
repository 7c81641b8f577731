//! RNG module - injected block selection
//!
//! The game draws kinds through the [`BlockSource`] trait so callers can swap
//! uniform random selection for a scripted sequence in tests.
//!
//! Also provides a simple LCG for deterministic seeding.

use crate::types::BlockKind;

/// Strategy for choosing the next block kind
pub trait BlockSource {
    fn next_kind(&mut self) -> BlockKind;
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

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max
    }
}

/// Uniform random selection over every catalog kind
#[derive(Debug, Clone)]
pub struct RandomBlockSource {
    rng: SimpleRng,
}

impl RandomBlockSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for RandomBlockSource {
    fn default() -> Self {
        Self::new(1)
    }
}

impl BlockSource for RandomBlockSource {
    fn next_kind(&mut self) -> BlockKind {
        let idx = self.rng.next_range(BlockKind::ALL.len() as u32) as usize;
        BlockKind::ALL[idx]
    }
}

/// Scripted selection that cycles through a fixed list
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<BlockKind>,
    index: usize,
}

impl SequenceSource {
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<BlockKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "sequence source needs at least one kind");
        Self { kinds, index: 0 }
    }

    /// A source that always yields `kind`
    pub fn repeat(kind: BlockKind) -> Self {
        Self::new(vec![kind])
    }
}

impl BlockSource for SequenceSource {
    fn next_kind(&mut self) -> BlockKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}
