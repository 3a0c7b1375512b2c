//! Canonical chess-rule constants.
//!
//! Static literals shared by setup, move generation, terminal detection and
//! search: the start position, proven buffer bounds, and draw thresholds.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Upper bound on legal moves in any reachable chess position.
pub const MAX_LEGAL_MOVES: usize = 218;

/// Deepest ply (from the search root) the search will ever visit.
pub const MAX_PLY: u8 = 64;

/// Half-move clock value at which the fifty-move rule draws the game.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one position that make a repetition draw.
pub const REPETITION_DRAW_COUNT: usize = 3;
