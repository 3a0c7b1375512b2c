//! Standard algebraic notation (`Nbd7`, `exd8=Q#`, `O-O`) for display.
//!
//! SAN depends on the position: disambiguation needs the other legal moves,
//! and the check suffix needs the position after the move. The move is made
//! and undone on the caller's state, which is left unchanged.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::MoveGuard;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::square_to_algebraic;

/// Render `mv`, a legal move in `game_state`, as SAN.
pub fn move_to_san(game_state: &mut GameState, mv: ChessMove) -> String {
    let mut san = if mv.is_castle() {
        let side = if mv.to % 8 == 6 { "O-O" } else { "O-O-O" };
        side.to_owned()
    } else {
        let legal = generate_legal_moves(game_state);
        san_body(mv, &legal)
    };

    let mut after = MoveGuard::new(game_state, mv);
    let defender = after.side_to_move;
    if is_king_in_check(&after, defender) {
        let mated = generate_legal_moves(&mut after).is_empty();
        san.push(if mated { '#' } else { '+' });
    }
    san
}

fn san_body(mv: ChessMove, legal: &[ChessMove]) -> String {
    let mut out = String::with_capacity(8);

    if mv.piece == PieceKind::Pawn {
        if mv.is_capture() {
            out.push(file_char(mv.from));
            out.push('x');
        }
    } else {
        out.push(mv.piece.to_char().to_ascii_uppercase());

        if rivals(mv, legal).next().is_some() {
            if !rivals(mv, legal).any(|other| other.from % 8 == mv.from % 8) {
                out.push(file_char(mv.from));
            } else if !rivals(mv, legal).any(|other| other.from / 8 == mv.from / 8) {
                out.push(char::from(b'1' + mv.from / 8));
            } else {
                out.push_str(&square_to_algebraic(mv.from));
            }
        }

        if mv.is_capture() {
            out.push('x');
        }
    }

    out.push_str(&square_to_algebraic(mv.to));
    if let Some(promotion) = mv.promotion {
        out.push('=');
        out.push(promotion.to_char().to_ascii_uppercase());
    }
    out
}

/// Other legal moves of the same piece kind landing on the same square.
fn rivals(mv: ChessMove, legal: &[ChessMove]) -> impl Iterator<Item = &ChessMove> {
    legal
        .iter()
        .filter(move |other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
}

#[inline]
fn file_char(square: Square) -> char {
    char::from(b'a' + square % 8)
}
