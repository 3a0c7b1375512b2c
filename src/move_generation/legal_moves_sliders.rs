//! Bishop, rook and queen generation from the ray tables.
//!
//! Each slider's targets are its rays trimmed at the nearest blocker; the
//! blocker square itself stays in the set so captures fall out of the same
//! mask and own-piece blockers are removed by the shared target filter.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{for_each_square, push_target_moves, PseudoMoveList};
use crate::tables::attack_tables::attack_tables;

pub fn generate_bishop_moves(game_state: &GameState, out: &mut PseudoMoveList) {
    generate_slider_moves(game_state, PieceKind::Bishop, out);
}

pub fn generate_rook_moves(game_state: &GameState, out: &mut PseudoMoveList) {
    generate_slider_moves(game_state, PieceKind::Rook, out);
}

pub fn generate_queen_moves(game_state: &GameState, out: &mut PseudoMoveList) {
    generate_slider_moves(game_state, PieceKind::Queen, out);
}

fn generate_slider_moves(game_state: &GameState, piece: PieceKind, out: &mut PseudoMoveList) {
    let tables = attack_tables();
    let occupancy = game_state.occupancy_all;
    let sliders = game_state.pieces[game_state.side_to_move.index()][piece.index()];

    for_each_square(sliders, |from| {
        let targets = match piece {
            PieceKind::Bishop => tables.bishop_attacks(from, occupancy),
            PieceKind::Rook => tables.rook_attacks(from, occupancy),
            _ => tables.queen_attacks(from, occupancy),
        };
        push_target_moves(game_state, piece, from, targets, out);
    });
}
