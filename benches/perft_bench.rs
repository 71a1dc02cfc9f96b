//! Move generation and search benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hal_chess::perft::perft;
use hal_chess::repetition::RepetitionTable;
use hal_chess::{Board, EngineConfig, SearchEngine};
use std::hint::black_box;
use std::time::Duration;

struct BenchPosition {
    name: &'static str,
    fen: &'static str,
    perft_depth: u32,
    search_depth: i32,
}

const BENCH_POSITIONS: &[BenchPosition] = &[
    BenchPosition {
        name: "startpos",
        fen: hal_chess::STARTING_FEN,
        perft_depth: 4,
        search_depth: 5,
    },
    BenchPosition {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        perft_depth: 3,
        search_depth: 4,
    },
    BenchPosition {
        name: "endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        perft_depth: 4,
        search_depth: 6,
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for pos in BENCH_POSITIONS {
        group.bench_with_input(BenchmarkId::new("depth", pos.name), pos, |b, pos| {
            let board = Board::from_fen(pos.fen).unwrap();
            b.iter(|| {
                let mut board = board.clone();
                black_box(perft(&mut board, pos.perft_depth))
            });
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    let config = EngineConfig::default().with_tt_size_bytes(16 << 20);

    for pos in BENCH_POSITIONS {
        group.bench_with_input(BenchmarkId::new("depth_fixed", pos.name), pos, |b, pos| {
            let board = Board::from_fen(pos.fen).unwrap();
            let mut repetitions = RepetitionTable::new();
            repetitions.add(board.hash());
            b.iter(|| {
                let mut engine = SearchEngine::new(&config);
                black_box(engine.search_depth(&board, &repetitions, pos.search_depth))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_search);
criterion_main!(benches);
