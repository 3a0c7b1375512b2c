//! Positions and correctness guards shared by the bench targets.
#![allow(dead_code)]

use ply_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use ply_chess::game_state::game_state::GameState;
use ply_chess::move_generation::legal_move_generator::generate_legal_moves;
use ply_chess::move_generation::perft::perft;
use ply_chess::search::iterative_deepening::SearchResult;
use ply_chess::tables::init_tables;

#[derive(Clone, Copy)]
pub struct BenchPosition {
    pub name: &'static str,
    pub fen: &'static str,
}

pub const START: BenchPosition = BenchPosition { name: "start", fen: STARTING_POSITION_FEN };
pub const KIWIPETE: BenchPosition = BenchPosition {
    name: "kiwipete",
    fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
};
pub const ROOK_ENDGAME: BenchPosition = BenchPosition {
    name: "rook_endgame",
    fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
};
pub const PROMOTIONS: BenchPosition = BenchPosition {
    name: "promotions",
    fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
};
pub const MIDDLEGAME: BenchPosition = BenchPosition {
    name: "middlegame",
    fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
};
pub const ITALIAN: BenchPosition = BenchPosition {
    name: "italian",
    fen: "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
};

/// `PLY_BENCH_SUITE=standard` selects the long-running cases.
pub fn suite_is_standard() -> bool {
    matches!(std::env::var("PLY_BENCH_SUITE"), Ok(value) if value.eq_ignore_ascii_case("standard"))
}

pub fn load(position: BenchPosition) -> GameState {
    init_tables();
    GameState::from_fen(position.fen).expect("benchmark FEN should parse")
}

/// Panics unless perft from `game` matches `expected` leaf count.
pub fn check_perft(position: BenchPosition, game: &GameState, depth: u8, expected: u64) {
    let mut scratch = game.clone();
    let nodes = perft(&mut scratch, depth).nodes as u64;
    assert_eq!(nodes, expected, "perft mismatch for {} depth {depth}", position.name);
    assert_eq!(&scratch, game, "perft left {} modified", position.name);
}

/// Panics unless the search restored `before` and chose one of its legal moves.
pub fn check_search(position: BenchPosition, before: &GameState, after: &GameState, result: &SearchResult) {
    assert_eq!(after, before, "search left {} modified", position.name);
    let mut game = before.clone();
    let legal = generate_legal_moves(&mut game);
    let best = result.best_move.expect("benchmark positions are not terminal");
    assert!(legal.contains(&best), "search on {} chose an illegal move", position.name);
}
