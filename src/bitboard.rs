//! HalChess - Bitboard Module
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the
//! board. `SquareSet` wraps one to keep the per-colour occupancy lists, so the
//! move generator and evaluator only visit occupied squares.

use crate::types::Square;

/// Set of squares, iterated in ascending square order (a1, b1, ..., h8)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    #[inline]
    pub fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq.index()) != 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn iter(self) -> SquareIter {
        SquareIter(self.0)
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareIter;

    fn into_iter(self) -> SquareIter {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

/// Pops the least significant bit on every step
pub struct SquareIter(u64);

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Square::from_index(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SquareIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_and_order() {
        let mut set = SquareSet::EMPTY;
        set.insert(Square::H8);
        set.insert(Square::E1);
        set.insert(Square::A1);
        set.insert(Square::E1);
        assert_eq!(set.len(), 3);
        assert!(set.contains(Square::E1));

        let order: Vec<Square> = set.iter().collect();
        assert_eq!(order, vec![Square::A1, Square::E1, Square::H8]);

        set.remove(Square::E1);
        set.remove(Square::G1);
        assert_eq!(set.len(), 2);
        assert!(!set.contains(Square::E1));
    }

    #[test]
    fn collect_from_squares() {
        let set: SquareSet = [Square::C1, Square::C8].into_iter().collect();
        assert_eq!(set.bits(), (1 << 2) | (1 << 58));
        assert!(!set.is_empty());
    }
}
