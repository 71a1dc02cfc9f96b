#![allow(dead_code)]

use hal_chess::move_generator::generate_legal;
use hal_chess::{Board, Move};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
pub const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
pub const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
pub const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

pub fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

/// Play up to `plies` uniformly random legal moves, stopping early at mate or
/// stalemate. Returns every move played together with the board it was played on.
pub fn random_playout(start: &Board, seed: u64, plies: usize) -> Vec<(Board, Move)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = start.clone();
    let mut line = Vec::with_capacity(plies);

    for _ in 0..plies {
        let moves = generate_legal(&board, true);
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        line.push((board.clone(), mv));
        board.make_move(&mv);
    }

    line
}
