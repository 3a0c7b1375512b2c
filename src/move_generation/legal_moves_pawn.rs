//! Pawn move generation with whole-board masked shifts.
//!
//! Pushes, double pushes and both capture diagonals are computed for all
//! pawns at once; edge files are masked out before the diagonal shifts so no
//! move wraps from the a-file to the h-file or back.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{enemy_piece_on, for_each_square, PseudoMoveList};
use crate::moves::chess_move::{ChessMove, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

pub fn generate_pawn_moves(game_state: &GameState, out: &mut PseudoMoveList) {
    let side = game_state.side_to_move;
    let pawns = game_state.pieces[side.index()][PieceKind::Pawn.index()];
    if pawns == 0 {
        return;
    }

    let empty = !game_state.occupancy_all;
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let en_passant = game_state.en_passant_square.map_or(0, square_bit);

    // Each target set is paired with the square delta back to its origin.
    let (single, west, east, promotion_rank) = match side {
        Color::Light => {
            let single = (pawns << 8) & empty;
            let double = ((single & RANK_3) << 8) & empty;
            for_each_square(double, |to| {
                out.push(ChessMove::new(side, PieceKind::Pawn, to - 16, to).with_flags(FLAG_DOUBLE_PAWN_PUSH));
            });
            ((single, 8i8), ((pawns & !FILE_A) << 7, 7i8), ((pawns & !FILE_H) << 9, 9i8), RANK_8)
        }
        Color::Dark => {
            let single = (pawns >> 8) & empty;
            let double = ((single & RANK_6) >> 8) & empty;
            for_each_square(double, |to| {
                out.push(ChessMove::new(side, PieceKind::Pawn, to + 16, to).with_flags(FLAG_DOUBLE_PAWN_PUSH));
            });
            ((single, -8i8), ((pawns & !FILE_A) >> 9, -9i8), ((pawns & !FILE_H) >> 7, -7i8), RANK_1)
        }
    };

    let (pushes, push_delta) = single;
    for_each_square(pushes, |to| {
        let from = origin(to, push_delta);
        push_pawn_move(ChessMove::new(side, PieceKind::Pawn, from, to), promotion_rank, out);
    });

    for (targets, delta) in [west, east] {
        for_each_square(targets & enemy_occ, |to| {
            let mut mv = ChessMove::new(side, PieceKind::Pawn, origin(to, delta), to);
            if let Some(captured) = enemy_piece_on(game_state, to) {
                mv = mv.with_capture(captured);
            }
            push_pawn_move(mv, promotion_rank, out);
        });

        for_each_square(targets & en_passant, |to| {
            out.push(
                ChessMove::new(side, PieceKind::Pawn, origin(to, delta), to)
                    .with_capture(PieceKind::Pawn)
                    .with_flags(FLAG_EN_PASSANT),
            );
        });
    }
}

#[inline]
fn origin(to: Square, delta: i8) -> Square {
    (i16::from(to) - i16::from(delta)) as Square
}

/// Push `mv`, expanded into one move per promotion piece on the last rank.
#[inline]
fn push_pawn_move(mv: ChessMove, promotion_rank: Bitboard, out: &mut PseudoMoveList) {
    if square_bit(mv.to) & promotion_rank == 0 {
        out.push(mv);
        return;
    }
    for promotion in PieceKind::PROMOTIONS {
        out.push(mv.with_promotion(promotion));
    }
}
