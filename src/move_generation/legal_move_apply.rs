//! In-place make/unmake and the scoped guard that pairs them.
//!
//! `make_move` mutates the position and pushes one `UndoState`; `unmake_move`
//! pops it and restores every bitboard, flag, clock and the hash bit-for-bit.
//! The hash is updated incrementally on make and restored from the saved key
//! on unmake. Search code goes through `MoveGuard` so every exit path,
//! including early returns on cutoffs, undoes the move it made.

use std::ops::{Deref, DerefMut};

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_moves_king::{rook_castled, rook_home};
use crate::moves::chess_move::ChessMove;
use crate::tables::zobrist::{castling_key, en_passant_key, side_to_move_key};

pub fn make_move(game_state: &mut GameState, mv: ChessMove) {
    debug_assert_eq!(mv.color, game_state.side_to_move, "move replayed for the wrong side");

    game_state.undo_stack.push(UndoState {
        mv,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_zobrist_key: game_state.zobrist_key,
    });

    let mover = mv.color;
    let enemy = mover.opposite();

    game_state.side_to_move = enemy;
    game_state.zobrist_key ^= side_to_move_key();

    // Remove the mover and any victim before placing, so the occupancy
    // caches never see two pieces on one square.
    game_state.toggle_piece(mover, mv.piece, mv.from);
    if let Some(captured) = mv.captured {
        game_state.toggle_piece(enemy, captured, mv.capture_square());
    }
    game_state.toggle_piece(mover, mv.placed_piece(), mv.to);

    if mv.is_castle() {
        game_state.toggle_piece(mover, PieceKind::Rook, rook_home(mv.to));
        game_state.toggle_piece(mover, PieceKind::Rook, rook_castled(mv.to));
        game_state.has_castled[mover.index()] = true;
    }

    if mv.piece == PieceKind::Pawn || mv.is_capture() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    let new_rights = game_state.castling_rights & mv.castle_mask;
    if new_rights != game_state.castling_rights {
        game_state.zobrist_key ^= castling_key(game_state.castling_rights) ^ castling_key(new_rights);
        game_state.castling_rights = new_rights;
    }

    let new_en_passant = mv.is_double_pawn_push().then(|| (mv.from + mv.to) / 2);
    game_state.zobrist_key ^= en_passant_key(game_state.en_passant_square) ^ en_passant_key(new_en_passant);
    game_state.en_passant_square = new_en_passant;

    game_state.repetition_history.push(game_state.zobrist_key);
}

/// Undo the most recent `make_move` and return the move it applied.
///
/// # Panics
///
/// Panics when the undo history is empty.
pub fn unmake_move(game_state: &mut GameState) -> ChessMove {
    let Some(undo) = game_state.undo_stack.pop() else {
        panic!("unmake_move called with an empty undo history");
    };
    game_state.repetition_history.pop();

    let mv = undo.mv;
    let mover = mv.color;

    if mv.is_castle() {
        game_state.toggle_piece(mover, PieceKind::Rook, rook_castled(mv.to));
        game_state.toggle_piece(mover, PieceKind::Rook, rook_home(mv.to));
        game_state.has_castled[mover.index()] = false;
    }

    game_state.toggle_piece(mover, mv.placed_piece(), mv.to);
    if let Some(captured) = mv.captured {
        game_state.toggle_piece(mover.opposite(), captured, mv.capture_square());
    }
    game_state.toggle_piece(mover, mv.piece, mv.from);

    game_state.side_to_move = mover;
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;
    game_state.zobrist_key = undo.prev_zobrist_key;

    mv
}

/// Scoped make/unmake: the move is made on construction and undone on drop.
pub struct MoveGuard<'a> {
    game_state: &'a mut GameState,
}

impl<'a> MoveGuard<'a> {
    #[inline]
    pub fn new(game_state: &'a mut GameState, mv: ChessMove) -> Self {
        make_move(game_state, mv);
        Self { game_state }
    }
}

impl Deref for MoveGuard<'_> {
    type Target = GameState;

    #[inline]
    fn deref(&self) -> &GameState {
        self.game_state
    }
}

impl DerefMut for MoveGuard<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut GameState {
        self.game_state
    }
}

impl Drop for MoveGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        unmake_move(self.game_state);
    }
}
