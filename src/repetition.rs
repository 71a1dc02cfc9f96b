//! HalChess - Repetition Table Module
//!
//! Hashes of the positions reached in the game actually played, kept as a
//! sorted multiset. The search only asks whether a hash is present; the game
//! asks how often it occurred.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepetitionTable {
    hashes: Vec<u64>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        RepetitionTable::default()
    }

    /// Record one occurrence of `hash`
    pub fn add(&mut self, hash: u64) {
        let index = self.hashes.partition_point(|&h| h <= hash);
        self.hashes.insert(index, hash);
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.hashes.binary_search(&hash).is_ok()
    }

    /// Number of recorded occurrences of `hash`
    pub fn count(&self, hash: u64) -> usize {
        let start = self.hashes.partition_point(|&h| h < hash);
        let end = self.hashes.partition_point(|&h| h <= hash);
        end - start
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn clear(&mut self) {
        self.hashes.clear();
    }
}
