//! RNG module - uniform random piece generation
//!
//! Every spawn draws uniformly from the whole catalog. There is no bag and no
//! repeat avoidance: the same piece may come up several times in a row.
//!
//! Uses a simple LCG so games are reproducible from a seed.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::pieces::GamePiece;
use crate::types::{PieceKind, PIECE_COUNT};

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
    /// Uses the high bits, which are far better distributed than the low bits
    /// of a power-of-two LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Seed taken from the wall clock, for games that need not be replayable
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: SimpleRng,
    seed: u32,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Draw the next piece kind
    pub fn draw_kind(&mut self) -> PieceKind {
        let index = self.rng.next_range(PIECE_COUNT as u32) as usize;
        // next_range never reaches PIECE_COUNT.
        PieceKind::from_index(index).unwrap_or(PieceKind::Dot)
    }

    /// Draw the next piece in its catalog orientation
    pub fn draw(&mut self) -> GamePiece {
        GamePiece::new(self.draw_kind())
    }

    /// Seed the queue was created with (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Rewind to the start of the seeded sequence
    pub fn reset(&mut self) {
        self.rng = SimpleRng::new(self.seed);
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
