mod common;

use common::*;
use hal_chess::zobrist::{full_hash, hash_after};
use hal_chess::Board;
use proptest::prelude::*;

fn start_positions() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        hal_chess::STARTING_FEN,
        KIWIPETE,
        POSITION_3,
        POSITION_4,
        POSITION_5,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]

    #[test]
    fn incremental_hash_tracks_full_hash(fen in start_positions(), seed in any::<u64>()) {
        let start = board(fen);
        for (before, mv) in random_playout(&start, seed, 60) {
            let mut after = before.clone();
            after.make_move(&mv);
            prop_assert_eq!(hash_after(before.hash(), &mv, &before), full_hash(&after));
            prop_assert_eq!(after.hash(), full_hash(&after));
        }
    }

    #[test]
    fn unmake_restores_every_field(fen in start_positions(), seed in any::<u64>()) {
        let start = board(fen);
        for (before, mv) in random_playout(&start, seed, 60) {
            let mut played = before.clone();
            played.make_move(&mv);
            played.unmake_move(&before);
            prop_assert_eq!(&played, &before);
            prop_assert_eq!(played.to_fen(), before.to_fen());
        }
    }

    #[test]
    fn fen_round_trip_keeps_the_hash(fen in start_positions(), seed in any::<u64>()) {
        let start = board(fen);
        if let Some((position, _)) = random_playout(&start, seed, 40).pop() {
            let reparsed = Board::from_fen(&position.to_fen()).unwrap();
            prop_assert_eq!(reparsed.hash(), position.hash());
            prop_assert_eq!(reparsed, position);
        }
    }
}

#[test]
fn transpositions_share_a_hash() {
    let mut a = Board::new();
    let mut b = Board::new();
    let sq = |name: &str| hal_chess::types::Square::parse(name).unwrap();

    for (from, to) in [("g1", "f3"), ("g8", "f6"), ("b1", "c3"), ("b8", "c6")] {
        a.make_move(&hal_chess::Move::new(sq(from), sq(to)));
    }
    for (from, to) in [("b1", "c3"), ("b8", "c6"), ("g1", "f3"), ("g8", "f6")] {
        b.make_move(&hal_chess::Move::new(sq(from), sq(to)));
    }

    assert_eq!(a.hash(), b.hash());
    assert_eq!(a, b);
}

#[test]
fn en_passant_right_changes_the_hash() {
    let with_target = board("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1");
    let without = board("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1");
    assert_ne!(with_target.hash(), without.hash());
}
