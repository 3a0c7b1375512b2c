//! Crate root module declarations for the ply_chess engine.
//!
//! Exposes the bitboard position, legal move generation with reversible
//! make/unmake, the negamax search and the game-session facade so the binary,
//! benches and external tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod game_status;
    pub mod undo_state;
}

pub mod tables {
    pub mod attack_tables;
    pub mod init;
    pub mod zobrist;

    pub use init::init_tables;
}

pub mod moves {
    pub mod chess_move;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
    pub mod time_management;
}

pub mod engines {
    pub mod engine_iterative;
    pub mod engine_trait;
    pub mod game_session;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
    pub mod san;
}
