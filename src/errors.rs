//! Error types shared across the crate.
//!
//! `FenError` covers every way a board description can be malformed.
//! `ChessError` is what the game-session facade and the CLI report: it wraps
//! FEN failures and adds move-input and history failures.
//!
//! Internal invariant violations (unmaking with an empty history, negative
//! search depth, overflowing the move arena) are not represented here; they
//! panic, because they can only be caused by a bug in this crate.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN is missing the {0} field")]
    MissingField(&'static str),
    #[error("FEN has extra trailing fields")]
    ExtraFields,
    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },
    #[error("invalid piece character '{0}' in board layout")]
    InvalidPiece(char),
    #[error("invalid side-to-move field: {0}")]
    InvalidSideToMove(String),
    #[error("invalid castling rights character: {0}")]
    InvalidCastling(char),
    #[error("invalid square: {0}")]
    InvalidSquare(String),
    #[error("invalid {field}: {value}")]
    InvalidCounter { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("invalid move text: {0}")]
    InvalidMoveText(String),
    #[error("illegal move in this position: {0}")]
    IllegalMove(String),
    #[error("no move to undo")]
    NothingToUndo,
}
