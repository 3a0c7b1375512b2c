//! Core incremental board state representation.
//!
//! `GameState` is the central model for the engine. It stores piece bitboards,
//! occupancy caches, turn/state flags, clocks, the incrementally maintained
//! Zobrist key, and the history stacks used by make/unmake. During search a
//! single `GameState` is mutated in place and restored by unmake; it is never
//! cloned on the hot path.

use crate::errors::FenError;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::tables::zobrist::{compute_zobrist_key, piece_square_key};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // [color][piece_kind]
    pub pieces: [[Bitboard; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [Bitboard; 2],
    pub occupancy_all: Bitboard,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub has_castled: [bool; 2],

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub zobrist_key: u64,

    /// Keys of every position reached, current position last.
    pub repetition_history: Vec<u64>,
    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            has_castled: [false; 2],

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,

            repetition_history: Vec::new(),
            undo_stack: Vec::new(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_of_color_on(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_bit(square);
        if self.occupancy_by_color[color.index()] & mask == 0 {
            return None;
        }
        PieceKind::ALL
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()] & mask != 0)
    }

    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        Color::ALL
            .into_iter()
            .find_map(|color| self.piece_of_color_on(color, square).map(|piece| (color, piece)))
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces[color.index()][PieceKind::King.index()];
        (kings != 0).then(|| kings.trailing_zeros() as Square)
    }

    #[inline]
    pub fn count(&self, color: Color, piece: PieceKind) -> u32 {
        self.pieces[color.index()][piece.index()].count_ones()
    }

    /// Flip one piece in or out of its bitboard, the occupancy caches and the
    /// hash. Calling it twice with the same arguments is a no-op.
    #[inline]
    pub(crate) fn toggle_piece(&mut self, color: Color, piece: PieceKind, square: Square) {
        let mask = square_bit(square);
        self.pieces[color.index()][piece.index()] ^= mask;
        self.occupancy_by_color[color.index()] ^= mask;
        self.occupancy_all ^= mask;
        self.zobrist_key ^= piece_square_key(color, piece, square);
    }

    /// Number of times the current position occurred since the last
    /// irreversible move, the current occurrence included.
    pub fn repetition_count(&self) -> usize {
        let window = usize::from(self.halfmove_clock) + 1;
        self.repetition_history
            .iter()
            .rev()
            .take(window)
            .filter(|&&key| key == self.zobrist_key)
            .count()
    }

    /// Rebuild occupancy caches, the hash, and the history seed from the
    /// bitboards and flags. Used after setup, never during search.
    pub(crate) fn refresh_derived_state(&mut self) {
        for color in Color::ALL {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::Light.index()]
            | self.occupancy_by_color[Color::Dark.index()];
        self.zobrist_key = compute_zobrist_key(self);
        self.repetition_history.clear();
        self.repetition_history.push(self.zobrist_key);
        self.undo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn start_position_has_both_kings_and_full_occupancy() {
        let game = GameState::new_game();
        assert_eq!(game.king_square(Color::Light), Some(4));
        assert_eq!(game.king_square(Color::Dark), Some(60));
        assert_eq!(game.occupancy_all.count_ones(), 32);
        assert_eq!(game.piece_on(3), Some((Color::Light, PieceKind::Queen)));
        assert_eq!(game.piece_on(28), None);
        assert_eq!(game.repetition_count(), 1);
    }

    #[test]
    fn toggle_piece_twice_restores_everything() {
        let mut game = GameState::new_game();
        let before = game.clone();
        game.toggle_piece(Color::Light, PieceKind::Knight, 28);
        assert_ne!(game.zobrist_key, before.zobrist_key);
        game.toggle_piece(Color::Light, PieceKind::Knight, 28);
        assert_eq!(game, before);
    }

    #[test]
    fn missing_king_is_reported_as_none() {
        let game = GameState::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(game.king_square(Color::Dark), None);
    }
}
