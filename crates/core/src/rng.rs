//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, J, L, O, S, T, Z), shuffled.
//! Draws from the bag until empty, then generates a new bag.
//!
//! Randomness comes from a seeded [`Pcg32`], so a seed fully determines the
//! piece sequence.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::types::PieceKind;

/// Shuffled remainder of the current 7-bag
#[derive(Debug, Clone)]
pub struct Bag {
    rng: Pcg32,
    remaining: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl Bag {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            remaining: ArrayVec::new(),
        }
    }

    /// Draw one piece, refilling and shuffling the bag first if it is empty.
    pub fn draw_next(&mut self) -> PieceKind {
        if self.remaining.is_empty() {
            self.refill();
        }
        let kind = self.remaining.pop();
        debug_assert!(kind.is_some(), "bag empty right after a refill");
        kind.unwrap_or(PieceKind::I)
    }

    fn refill(&mut self) {
        self.remaining.clear();
        self.remaining.extend(PieceKind::ALL);
        self.remaining.shuffle(&mut self.rng);
    }

    /// Pieces still in the current bag (drawn from the back)
    pub fn remaining(&self) -> &[PieceKind] {
        &self.remaining
    }

    /// Derive a fresh seed from the generator (used on restart).
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }
}

/// Fixed-length lookahead queue fed by a [`Bag`]
#[derive(Debug, Clone)]
pub struct PieceQueue {
    bag: Bag,
    upcoming: VecDeque<PieceKind>,
    seed: u64,
}

impl PieceQueue {
    /// Create a queue holding `preview_count` upcoming pieces.
    pub fn new(seed: u64, preview_count: usize) -> Self {
        let mut bag = Bag::new(seed);
        let upcoming = (0..preview_count).map(|_| bag.draw_next()).collect();
        Self {
            bag,
            upcoming,
            seed,
        }
    }

    /// Take the front of the queue and top it back up from the bag.
    pub fn pop(&mut self) -> PieceKind {
        let kind = match self.upcoming.pop_front() {
            Some(kind) => kind,
            None => self.bag.draw_next(),
        };
        self.upcoming.push_back(self.bag.draw_next());
        kind
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<PieceKind> {
        self.upcoming.front().copied()
    }

    /// Upcoming pieces, next first
    pub fn upcoming(&self) -> impl ExactSizeIterator<Item = PieceKind> + '_ {
        self.upcoming.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// Seed this queue was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_seed(&mut self) -> u64 {
        self.bag.next_seed()
    }
}
