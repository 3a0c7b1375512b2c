use crate::game_state::{chess_types::*, game_state::GameState};
use crate::tables::attack_tables::attack_tables;

/// `false` when `color` has no king on the board.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = game_state.king_square(color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Whether any `attacker_color` piece attacks `square`, looked up in reverse
/// from the target square.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let tables = attack_tables();
    let attackers = &game_state.pieces[attacker_color.index()];

    // A pawn of the attacker hits `square` iff a defender pawn on `square`
    // would hit the pawn.
    if tables.pawn_attacks(attacker_color.opposite(), square) & attackers[PieceKind::Pawn.index()] != 0 {
        return true;
    }

    if tables.knight_attacks(square) & attackers[PieceKind::Knight.index()] != 0 {
        return true;
    }

    if tables.king_attacks(square) & attackers[PieceKind::King.index()] != 0 {
        return true;
    }

    let queens = attackers[PieceKind::Queen.index()];

    let bishops_queens = attackers[PieceKind::Bishop.index()] | queens;
    if bishops_queens != 0 && tables.bishop_attacks(square, game_state.occupancy_all) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = attackers[PieceKind::Rook.index()] | queens;
    rooks_queens != 0 && tables.rook_attacks(square, game_state.occupancy_all) & rooks_queens != 0
}
