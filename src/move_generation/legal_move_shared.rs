//! Buffers and helpers shared by the per-piece generators.

use arrayvec::ArrayVec;

use crate::game_state::chess_rules::MAX_LEGAL_MOVES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::ChessMove;

/// Capacity of the scratch buffer holding moves before the legality filter.
pub const MAX_PSEUDO_LEGAL_MOVES: usize = 256;

/// Fixed-capacity list of legal moves. Pushing past the bound panics.
pub type MoveList = ArrayVec<ChessMove, MAX_LEGAL_MOVES>;

/// Generator output before moves that leave the own king attacked are removed.
pub type PseudoMoveList = ArrayVec<ChessMove, MAX_PSEUDO_LEGAL_MOVES>;

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    game_state.piece_of_color_on(game_state.side_to_move.opposite(), square)
}

/// Emit one move per target square, tagging captures with the victim.
#[inline]
pub fn push_target_moves(
    game_state: &GameState,
    piece: PieceKind,
    from: Square,
    targets: Bitboard,
    out: &mut PseudoMoveList,
) {
    let side = game_state.side_to_move;
    let mut targets = targets & !game_state.occupancy_by_color[side.index()];

    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        let mv = ChessMove::new(side, piece, from, to);
        out.push(match enemy_piece_on(game_state, to) {
            Some(captured) => mv.with_capture(captured),
            None => mv,
        });
        targets &= targets - 1;
    }
}

/// Run `emit` once per set square of `bitboard`, lowest square first.
#[inline]
pub fn for_each_square(mut bitboard: Bitboard, mut emit: impl FnMut(Square)) {
    while bitboard != 0 {
        emit(bitboard.trailing_zeros() as Square);
        bitboard &= bitboard - 1;
    }
}
