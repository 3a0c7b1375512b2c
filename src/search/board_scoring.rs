//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.
//! Every scorer is relative: positive means good for the side to move.

use crate::game_state::{chess_types::*, game_state::GameState};

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move. `mobility` is the
    /// number of legal moves available to that side.
    fn score(&self, game_state: &GameState, mobility: usize) -> i32;
}

impl<T: BoardScorer + ?Sized> BoardScorer for Box<T> {
    fn score(&self, game_state: &GameState, mobility: usize) -> i32 {
        (**self).score(game_state, mobility)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    /// Non-negative material sum for one color; kings are not counted.
    #[inline]
    pub fn material_for(game_state: &GameState, color: Color) -> i32 {
        PieceKind::ALL
            .into_iter()
            .map(|piece| Self::piece_value(piece) * game_state.count(color, piece) as i32)
            .sum()
    }

    #[inline]
    pub fn material_balance(game_state: &GameState) -> i32 {
        let mover = game_state.side_to_move;
        Self::material_for(game_state, mover) - Self::material_for(game_state, mover.opposite())
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState, _mobility: usize) -> i32 {
        Self::material_balance(game_state)
    }
}

/// Material plus a flat bonus per legal move of the side to move.
#[derive(Debug, Clone, Copy)]
pub struct MaterialMobilityScorer {
    pub per_move: i32,
}

impl Default for MaterialMobilityScorer {
    fn default() -> Self {
        Self { per_move: 2 }
    }
}

impl BoardScorer for MaterialMobilityScorer {
    fn score(&self, game_state: &GameState, mobility: usize) -> i32 {
        let mobility = i32::try_from(mobility).unwrap_or(i32::MAX / 1024);
        MaterialScorer::material_balance(game_state) + self.per_move * mobility
    }
}

/// Convert a score for the side to move into a light-positive score.
#[inline]
pub fn absolute_score(relative: i32, side_to_move: Color) -> i32 {
    match side_to_move {
        Color::Light => relative,
        Color::Dark => -relative,
    }
}

#[cfg(test)]
mod tests {
    use super::{absolute_score, BoardScorer, MaterialMobilityScorer, MaterialScorer};
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;

    #[test]
    fn material_scorer_reflects_side_to_move_perspective() {
        let white_to_move =
            GameState::from_fen("4k3/8/8/8/8/8/8/4KQ2 w - - 0 1").expect("FEN should parse");
        let black_to_move =
            GameState::from_fen("4k3/8/8/8/8/8/8/4KQ2 b - - 0 1").expect("FEN should parse");

        let scorer = MaterialScorer;
        assert_eq!(scorer.score(&white_to_move, 0), 900);
        assert_eq!(scorer.score(&black_to_move, 0), -900);
    }

    #[test]
    fn material_sums_ignore_kings_and_stay_non_negative() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/6rn/4KBQ1 w - - 0 1").expect("FEN should parse");
        assert_eq!(MaterialScorer::material_for(&game, Color::Light), 1230);
        assert_eq!(MaterialScorer::material_for(&game, Color::Dark), 820);
        assert_eq!(MaterialScorer.score(&game, 0), 410);

        let bare = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(MaterialScorer.score(&bare, 0), 0);
    }

    #[test]
    fn mobility_scorer_adds_per_move_bonus() {
        let game = GameState::new_game();
        assert_eq!(MaterialMobilityScorer::default().score(&game, 20), 40);
        assert_eq!(MaterialMobilityScorer { per_move: 5 }.score(&game, 20), 100);
    }

    #[test]
    fn absolute_score_flips_for_dark() {
        assert_eq!(absolute_score(150, Color::Light), 150);
        assert_eq!(absolute_score(150, Color::Dark), -150);
    }
}
