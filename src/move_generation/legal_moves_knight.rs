use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{for_each_square, push_target_moves, PseudoMoveList};
use crate::tables::attack_tables::attack_tables;

pub fn generate_knight_moves(game_state: &GameState, out: &mut PseudoMoveList) {
    let side = game_state.side_to_move;
    let tables = attack_tables();
    let knights = game_state.pieces[side.index()][PieceKind::Knight.index()];

    for_each_square(knights, |from| {
        push_target_moves(game_state, PieceKind::Knight, from, tables.knight_attacks(from), out);
    });
}
