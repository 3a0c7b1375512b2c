//! Move ordering for alpha-beta.
//!
//! The ordering cache maps a position hash to the scores its moves earned
//! during the previous iterative-deepening iteration. Entries are advisory:
//! a stale or colliding entry only changes the order moves are tried in,
//! never the value the search returns.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::game_state::chess_types::PieceKind;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::MaterialScorer;

type ScoresByMove = HashMap<ChessMove, i32>;

/// Two-generation ordering cache: reads come from the last completed
/// iteration, writes go to the one in progress.
#[derive(Debug, Default)]
pub struct MoveOrderingCache {
    previous: HashMap<u64, ScoresByMove>,
    current: HashMap<u64, ScoresByMove>,
}

impl MoveOrderingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate generations at the start of a new depth iteration.
    pub fn start_iteration(&mut self) {
        self.previous = std::mem::take(&mut self.current);
    }

    pub fn clear(&mut self) {
        self.previous.clear();
        self.current.clear();
    }

    #[inline]
    pub fn record(&mut self, key: u64, mv: ChessMove, score: i32) {
        self.current.entry(key).or_default().insert(mv, score);
    }

    #[inline]
    pub fn lookup(&self, key: u64, mv: &ChessMove) -> Option<i32> {
        self.previous.get(&key)?.get(mv).copied()
    }

    /// Positions with at least one score available for ordering.
    pub fn positions(&self) -> usize {
        self.previous.len()
    }

    /// Sort `moves` by cached score, best first. Uncached moves go last and
    /// keep generator order among themselves.
    pub fn order_moves(&self, key: u64, moves: &mut [ChessMove]) {
        let Some(scores) = self.previous.get(&key) else {
            return;
        };
        moves.sort_by_key(|mv| match scores.get(mv) {
            Some(&score) => (false, Reverse(score)),
            None => (true, Reverse(0)),
        });
    }
}

/// Most valuable victim first, then least valuable attacker. Promotions
/// count their material gain as part of the victim.
#[inline]
pub fn mvv_lva_key(mv: &ChessMove) -> i32 {
    let victim = mv.captured.map_or(0, MaterialScorer::piece_value);
    let promotion_gain = mv.promotion.map_or(0, |piece| {
        MaterialScorer::piece_value(piece) - MaterialScorer::piece_value(PieceKind::Pawn)
    });
    (victim + promotion_gain) * 8 - mv.piece.index() as i32
}

/// Stable descending MVV-LVA sort.
pub fn order_by_mvv_lva(moves: &mut [ChessMove]) {
    moves.sort_by_key(|mv| Reverse(mvv_lva_key(mv)));
}
