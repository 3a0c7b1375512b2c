//! Full legal move generation pipeline.
//!
//! Runs the piece-wise pseudo-legal generators, then plays each candidate on
//! the position itself and keeps it only when the mover's king is not left
//! attacked. The position is restored before returning, so callers see it
//! unchanged.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::{MoveList, PseudoMoveList};
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliders::{
    generate_bishop_moves, generate_queen_moves, generate_rook_moves,
};

/// Moves for the side to move, ignoring whether they expose the own king.
pub fn generate_pseudo_legal_moves(game_state: &GameState) -> PseudoMoveList {
    let mut pseudo = PseudoMoveList::new();

    generate_pawn_moves(game_state, &mut pseudo);
    generate_knight_moves(game_state, &mut pseudo);
    generate_bishop_moves(game_state, &mut pseudo);
    generate_rook_moves(game_state, &mut pseudo);
    generate_queen_moves(game_state, &mut pseudo);
    generate_king_moves(game_state, &mut pseudo);

    pseudo
}

pub fn generate_legal_moves(game_state: &mut GameState) -> MoveList {
    let mover = game_state.side_to_move;
    let mut legal = MoveList::new();

    for mv in generate_pseudo_legal_moves(game_state) {
        make_move(game_state, mv);
        let exposes_king = is_king_in_check(game_state, mover);
        unmake_move(game_state);

        // Illegal if own king is in check after move.
        if !exposes_king {
            legal.push(mv);
        }
    }

    legal
}

/// Narrow a legal move list to captures and promotions.
#[inline]
pub fn retain_unquiet_moves(moves: &mut MoveList) {
    moves.retain(|mv| mv.is_unquiet());
}

#[cfg(test)]
mod tests {
    use super::{generate_legal_moves, retain_unquiet_moves};
    use crate::game_state::game_state::GameState;

    #[test]
    fn start_position_has_twenty_moves_and_is_untouched() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let moves = generate_legal_moves(&mut game);
        assert_eq!(moves.len(), 20);
        assert_eq!(game, before);
        let mut unquiet = moves.clone();
        retain_unquiet_moves(&mut unquiet);
        assert!(unquiet.is_empty());
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        // Knight on e2 is pinned by the rook on e8.
        let mut game = GameState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let moves = generate_legal_moves(&mut game);
        assert!(moves.iter().all(|mv| mv.from != 12));
    }

    #[test]
    fn check_must_be_answered() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/3q4/4K3 w - - 0 1").expect("FEN should parse");
        let moves: Vec<String> = generate_legal_moves(&mut game).iter().map(|mv| mv.to_long_algebraic()).collect();
        assert_eq!(moves, ["e1f1", "e1d2"]);
    }

    #[test]
    fn checkmate_and_stalemate_have_no_moves() {
        let mut mate = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert!(generate_legal_moves(&mut mate).is_empty());

        let mut stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(generate_legal_moves(&mut stalemate).is_empty());
    }

    #[test]
    fn unquiet_moves_are_captures_and_promotions() {
        let mut game = GameState::from_fen("3r2k1/P7/8/8/8/8/8/3RK3 w - - 0 1").expect("FEN should parse");
        let mut moves = generate_legal_moves(&mut game);
        retain_unquiet_moves(&mut moves);
        let unquiet: Vec<String> = moves.iter().map(|mv| mv.to_long_algebraic()).collect();
        assert_eq!(unquiet, ["a7a8q", "a7a8r", "a7a8b", "a7a8n", "d1d8"]);
    }
}
