//! HalChess - Transposition Table Module
//!
//! A fixed-size, direct-mapped cache of search results keyed by Zobrist hash.
//! Every store overwrites its slot; a probe only answers when the full hash
//! matches, so a slot reused by another position reads as a miss.

use std::mem::size_of;

use crate::board::Move;

/// What the stored score says about the true value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Bound {
    /// Score is exact (a PV node)
    #[default]
    Exact,
    /// True score is at least the stored one (beta cutoff)
    Lower,
    /// True score is at most the stored one (no move raised alpha)
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Entry {
    pub hash: u64,
    pub best_move: Option<Move>,
    pub depth: i32,
    pub score: i32,
    pub bound: Bound,
    pub valid: bool,
}

pub struct TranspositionTable {
    entries: Vec<Entry>,
    used: usize,
    pub hits: u64,
    pub writes: u64,
}

impl TranspositionTable {
    /// Allocate as many entries as fit in `size_bytes`, at least one
    pub fn new(size_bytes: usize) -> Self {
        let capacity = (size_bytes / size_of::<Entry>()).max(1);
        TranspositionTable {
            entries: vec![Entry::default(); capacity],
            used: 0,
            hits: 0,
            writes: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    pub fn probe(&mut self, hash: u64) -> Option<Entry> {
        let entry = self.peek(hash)?;
        self.hits += 1;
        Some(entry)
    }

    /// Like `probe`, without counting a hit
    pub fn peek(&self, hash: u64) -> Option<Entry> {
        let entry = self.entries[self.index(hash)];
        (entry.valid && entry.hash == hash).then_some(entry)
    }

    /// Always replaces whatever occupies the slot
    pub fn store(
        &mut self,
        hash: u64,
        best_move: Option<Move>,
        depth: i32,
        score: i32,
        bound: Bound,
    ) {
        let index = self.index(hash);
        let slot = &mut self.entries[index];
        if !slot.valid {
            self.used += 1;
        }
        *slot = Entry {
            hash,
            best_move,
            depth,
            score,
            bound,
            valid: true,
        };
        self.writes += 1;
    }

    pub fn clear(&mut self) {
        self.entries.fill(Entry::default());
        self.used = 0;
        self.hits = 0;
        self.writes = 0;
    }

    /// Occupied slots in per-mille
    pub fn hashfull(&self) -> usize {
        (self.used * 1000) / self.entries.len()
    }
}
