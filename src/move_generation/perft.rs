//! Perft: exhaustive move-path counting for generator validation.
//!
//! Walks every legal line to a fixed depth with in-place make/unmake and
//! tallies leaf statistics, so counts can be compared with published values.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::MoveGuard;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }

    for mv in generate_legal_moves(game_state) {
        perft_recurse(game_state, mv, depth - 1, &mut total);
    }

    total
}

/// Per-root-move breakdown, in generator order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(ChessMove, PerftCounts)> {
    if depth == 0 {
        return Vec::new();
    }

    generate_legal_moves(game_state)
        .into_iter()
        .map(|mv| {
            let mut counts = PerftCounts::default();
            perft_recurse(game_state, mv, depth - 1, &mut counts);
            (mv, counts)
        })
        .collect()
}

fn perft_recurse(game_state: &mut GameState, mv: ChessMove, remaining: u8, counts: &mut PerftCounts) {
    let mut child = MoveGuard::new(game_state, mv);

    if remaining > 0 {
        let mut subtotal = PerftCounts::default();
        for reply in generate_legal_moves(&mut child) {
            perft_recurse(&mut child, reply, remaining - 1, &mut subtotal);
        }
        counts.merge(subtotal);
        return;
    }

    counts.nodes += 1;
    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant() {
        counts.en_passant += 1;
    }
    if mv.is_castle() {
        counts.castles += 1;
    }
    if mv.is_promotion() {
        counts.promotions += 1;
    }

    let defender = child.side_to_move;
    if is_king_in_check(&child, defender) {
        counts.checks += 1;
        if generate_legal_moves(&mut child).is_empty() {
            counts.checkmates += 1;
        }
    }
}
