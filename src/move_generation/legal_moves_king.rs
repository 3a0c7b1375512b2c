use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{push_target_moves, PseudoMoveList};
use crate::moves::chess_move::{ChessMove, FLAG_CASTLING};
use crate::tables::attack_tables::attack_tables;

/// One castling option: required right, king route, and the squares that
/// must be empty (`path`) or unattacked (`transit`).
struct CastleRoute {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    path: Bitboard,
    transit: [Square; 2],
}

const LIGHT_ROUTES: [CastleRoute; 2] = [
    CastleRoute {
        right: CASTLE_LIGHT_KINGSIDE,
        king_from: 4,
        king_to: 6,
        path: (1 << 5) | (1 << 6),
        transit: [5, 6],
    },
    CastleRoute {
        right: CASTLE_LIGHT_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        path: (1 << 1) | (1 << 2) | (1 << 3),
        transit: [3, 2],
    },
];

const DARK_ROUTES: [CastleRoute; 2] = [
    CastleRoute {
        right: CASTLE_DARK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        path: (1 << 61) | (1 << 62),
        transit: [61, 62],
    },
    CastleRoute {
        right: CASTLE_DARK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        path: (1 << 57) | (1 << 58) | (1 << 59),
        transit: [59, 58],
    },
];

pub fn generate_king_moves(game_state: &GameState, out: &mut PseudoMoveList) {
    let side = game_state.side_to_move;
    let Some(from) = game_state.king_square(side) else {
        return;
    };

    push_target_moves(game_state, PieceKind::King, from, attack_tables().king_attacks(from), out);
    generate_castling_moves(game_state, from, out);
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut PseudoMoveList) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let routes = match side {
        Color::Light => &LIGHT_ROUTES,
        Color::Dark => &DARK_ROUTES,
    };

    if game_state.castling_rights & routes.iter().fold(0, |acc, r| acc | r.right) == 0 {
        return;
    }

    // Cannot castle out of check.
    if is_square_attacked(game_state, king_from, enemy) {
        return;
    }

    let rooks = game_state.pieces[side.index()][PieceKind::Rook.index()];

    for route in routes {
        if king_from != route.king_from
            || game_state.castling_rights & route.right == 0
            || rooks & square_bit(rook_home(route.king_to)) == 0
            || game_state.occupancy_all & route.path != 0
            || route.transit.iter().any(|&sq| is_square_attacked(game_state, sq, enemy))
        {
            continue;
        }

        out.push(ChessMove::new(side, PieceKind::King, route.king_from, route.king_to).with_flags(FLAG_CASTLING));
    }
}

/// Rook origin for a castle landing the king on `king_to`.
#[inline]
pub fn rook_home(king_to: Square) -> Square {
    if king_to % 8 == 6 {
        king_to + 1
    } else {
        king_to - 2
    }
}

/// Rook destination for a castle landing the king on `king_to`.
#[inline]
pub fn rook_castled(king_to: Square) -> Square {
    if king_to % 8 == 6 {
        king_to - 1
    } else {
        king_to + 1
    }
}
