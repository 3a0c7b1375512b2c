use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use ply_chess::engines::engine_iterative::IterativeEngine;
use ply_chess::engines::game_session::GameSession;
use ply_chess::errors::ChessError;
use ply_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use ply_chess::game_state::game_state::GameState;
use ply_chess::move_generation::perft::{perft, perft_divide};
use ply_chess::search::time_management::{SearchLimits, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};
use ply_chess::tables::init_tables;

#[derive(Parser)]
#[command(name = "ply_chess")]
#[command(about = "Bitboard chess engine: search, perft and move listing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search a position for the best move
    Search(SearchArgs),
    /// Count leaf positions to a fixed depth
    Perft(PerftArgs),
    /// List legal moves and game status
    Moves(PositionArgs),
}

#[derive(Args)]
struct PositionArgs {
    /// FEN of the position (default: the standard start position)
    #[arg(short, long, default_value = STARTING_POSITION_FEN)]
    fen: String,

    /// Coordinate moves to play from the FEN before anything else, e.g. "e2e4 e7e5"
    #[arg(short, long, value_delimiter = ' ', num_args = 0..)]
    moves: Vec<String>,
}

#[derive(Args)]
struct SearchArgs {
    #[command(flatten)]
    position: PositionArgs,

    /// Maximum search depth in plies
    #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
    depth: u8,

    /// Wall-clock budget in milliseconds, checked between iterations
    #[arg(long)]
    movetime_ms: Option<u64>,

    /// Node ceiling for one search
    #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
    max_nodes: u64,

    /// Mobility bonus per legal move (0 scores material only)
    #[arg(long, default_value_t = 2)]
    mobility: i32,
}

#[derive(Args)]
struct PerftArgs {
    #[command(flatten)]
    position: PositionArgs,

    #[arg(short, long, default_value_t = 3)]
    depth: u8,

    /// Print the node count under each root move
    #[arg(long)]
    divide: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    init_tables();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Search(args) => run_search(args),
        Command::Perft(args) => run_perft(args),
        Command::Moves(args) => run_moves(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn open_session(position: &PositionArgs, engine: IterativeEngine) -> Result<GameSession, ChessError> {
    let game_state = GameState::from_fen(&position.fen)?;
    let mut session = GameSession::with_engine(game_state, Box::new(engine));
    for text in position.moves.iter().filter(|text| !text.is_empty()) {
        session.apply_move(text)?;
    }
    Ok(session)
}

fn run_search(args: SearchArgs) -> Result<(), ChessError> {
    let engine = if args.mobility == 0 {
        IterativeEngine::material()
    } else {
        IterativeEngine::material_mobility(args.mobility)
    };
    let mut session = open_session(&args.position, engine)?;
    println!("{}", session.render());

    let limits = match args.movetime_ms {
        Some(ms) => SearchLimits {
            max_depth: args.depth,
            ..SearchLimits::movetime(Duration::from_millis(ms))
        },
        None => SearchLimits::depth(args.depth),
    }
    .with_max_nodes(args.max_nodes);

    log::info!("searching with {}", session.engine_name());
    let output = session.search(&limits);
    for line in &output.info_lines {
        println!("{line}");
    }
    if let Some(mv) = output.result.best_move {
        println!("best {}", session.san(mv));
    }
    println!("absolute score {}", output.result.absolute_score());
    Ok(())
}

fn run_perft(args: PerftArgs) -> Result<(), ChessError> {
    let session = open_session(&args.position, IterativeEngine::material())?;
    let mut game_state = session.game_state().clone();
    let started = Instant::now();

    if args.divide {
        let mut total = 0usize;
        for (mv, counts) in perft_divide(&mut game_state, args.depth) {
            println!("{mv}: {}", counts.nodes);
            total += counts.nodes;
        }
        println!("total {total}");
    } else {
        let counts = perft(&mut game_state, args.depth);
        println!("{counts:#?}");
    }

    log::info!("perft depth {} took {}ms", args.depth, started.elapsed().as_millis());
    Ok(())
}

fn run_moves(args: PositionArgs) -> Result<(), ChessError> {
    let mut session = open_session(&args, IterativeEngine::material())?;
    println!("{}", session.render());
    println!("fen {}", session.fen());
    println!("status {:?}", session.status());
    println!("moves {}", session.legal_move_texts().join(" "));
    println!("san {}", session.legal_move_sans().join(" "));
    Ok(())
}
