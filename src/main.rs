//! HalChess - command line driver
//!
//! Usage:
//!     hal_chess perft 5 [--fen FEN] [--divide]
//!     hal_chess bestmove --fen FEN --seconds 3
//!     hal_chess selfplay --seconds 1 --max-plies 200
//!
//! Logging goes to stderr; `--debug` or `RUST_LOG` raise the level.

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use hal_chess::perft::{divide, perft};
use hal_chess::repetition::RepetitionTable;
use hal_chess::{Board, EngineConfig, Game, SearchEngine, STARTING_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Transposition table size in megabytes
    #[arg(long, default_value_t = 64, global = true)]
    hash_mb: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count leaf nodes to verify move generation
    Perft {
        depth: u32,
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        /// Print the count below every root move
        #[arg(long)]
        divide: bool,
    },
    /// Search one position and print the chosen move
    Bestmove {
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        #[arg(long, default_value_t = 3.0)]
        seconds: f64,
        /// Search to a fixed depth instead of using the clock
        #[arg(long)]
        depth: Option<i32>,
    },
    /// Let the engine play both sides
    Selfplay {
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        #[arg(long, default_value_t = 1)]
        seconds: u64,
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
    },
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    })
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = EngineConfig::default().with_tt_size_bytes(args.hash_mb * 1_000_000);

    match args.command {
        Command::Perft { depth, fen, divide: split } => run_perft(&fen, depth, split),
        Command::Bestmove { fen, seconds, depth } => run_bestmove(&config, &fen, seconds, depth),
        Command::Selfplay { fen, seconds, max_plies } => {
            run_selfplay(config.with_search_seconds(seconds), &fen, max_plies)
        }
    }
}

fn parse_board(fen: &str) -> Result<Board> {
    Board::from_fen(fen).with_context(|| format!("cannot load position '{fen}'"))
}

fn run_perft(fen: &str, depth: u32, split: bool) -> Result<()> {
    let mut board = parse_board(fen)?;
    let start = Instant::now();

    let nodes = if split {
        let counts = divide(&mut board, depth);
        for (mv, count) in &counts {
            println!("{mv}: {count}");
        }
        counts.iter().map(|(_, count)| count).sum::<u64>()
    } else {
        perft(&mut board, depth)
    };

    let elapsed = start.elapsed().as_secs_f64();
    println!();
    println!("Nodes searched: {nodes}");
    log::info!(
        "perft {} took {:.3}s ({:.0} nps)",
        depth,
        elapsed,
        nodes as f64 / elapsed.max(1e-9)
    );
    Ok(())
}

fn run_bestmove(config: &EngineConfig, fen: &str, seconds: f64, depth: Option<i32>) -> Result<()> {
    let board = parse_board(fen)?;
    let mut repetitions = RepetitionTable::new();
    repetitions.add(board.hash());

    let mut engine = SearchEngine::new(config);
    let result = match depth {
        Some(depth) => engine.search_depth(&board, &repetitions, depth),
        None => engine.iterative_deepen(&board, &repetitions, seconds),
    };

    match result.best_move {
        Some(mv) => println!(
            "bestmove {} score {} depth {} nodes {}",
            mv, result.score, result.depth, result.nodes
        ),
        None => println!("bestmove (none)"),
    }
    Ok(())
}

fn run_selfplay(config: EngineConfig, fen: &str, max_plies: usize) -> Result<()> {
    let mut game = Game::new(config);
    game.load_fen(fen)
        .with_context(|| format!("cannot load position '{fen}'"))?;
    println!("{}", game.board());

    for _ in 0..max_plies {
        if game.status().is_over() {
            break;
        }
        let status = game
            .play_engine_move()
            .context("engine produced no playable move")?;
        if let Some(mv) = game.moves_played().last() {
            println!("{mv}");
        }
        if status.is_over() {
            break;
        }
    }

    println!("{}", game.board());
    println!("{}", game.board().to_fen());
    println!("result: {}", game.status());
    Ok(())
}
