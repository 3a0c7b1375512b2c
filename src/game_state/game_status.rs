//! Terminal-state detection from the board alone.
//!
//! Checks run in a fixed order: a missing king, no legal moves (mate or
//! stalemate), the fifty-move rule, insufficient material, and threefold
//! repetition. The first rule that applies decides the status.

use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_DRAW_COUNT};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::chess_move::ChessMove;

/// Status of `game_state`, given the legal moves already generated for it.
pub fn game_status(game_state: &GameState, legal_moves: &[ChessMove]) -> GameStatus {
    let mover = game_state.side_to_move;

    for color in Color::ALL {
        if game_state.king_square(color).is_none() {
            return GameStatus::win_for(color.opposite());
        }
    }

    if legal_moves.is_empty() {
        return if is_king_in_check(game_state, mover) {
            GameStatus::win_for(mover.opposite())
        } else {
            GameStatus::Draw
        };
    }

    if is_draw_by_rule(game_state) {
        return GameStatus::Draw;
    }

    GameStatus::InProgress
}

/// Fifty-move rule, insufficient material, or threefold repetition.
pub fn is_draw_by_rule(game_state: &GameState) -> bool {
    game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES
        || is_insufficient_material(game_state)
        || game_state.repetition_count() >= REPETITION_DRAW_COUNT
}

/// Neither side can force mate: no pawns or major pieces, and either each
/// side has at most one minor piece or one side has two knights against at
/// most one minor piece.
pub fn is_insufficient_material(game_state: &GameState) -> bool {
    let has_hard_material = Color::ALL.into_iter().any(|color| {
        game_state.count(color, PieceKind::Pawn)
            + game_state.count(color, PieceKind::Rook)
            + game_state.count(color, PieceKind::Queen)
            > 0
    });
    if has_hard_material {
        return false;
    }

    let minors = |color: Color| {
        game_state.count(color, PieceKind::Knight) + game_state.count(color, PieceKind::Bishop)
    };
    let light = minors(Color::Light);
    let dark = minors(Color::Dark);

    if light <= 1 && dark <= 1 {
        return true;
    }

    let two_knights = |color: Color| {
        game_state.count(color, PieceKind::Knight) == 2 && game_state.count(color, PieceKind::Bishop) == 0
    };
    (two_knights(Color::Light) && dark <= 1) || (two_knights(Color::Dark) && light <= 1)
}
