use crate::game_state::chess_types::*;
use crate::moves::chess_move::ChessMove;

/// Single undo record for `make_move` / `unmake_move`.
///
/// One record is pushed per make and popped per unmake; the stack of these
/// records is the position's undo history and must be used strictly LIFO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: ChessMove,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    pub prev_zobrist_key: u64,
}
