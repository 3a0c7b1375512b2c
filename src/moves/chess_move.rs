//! The move value type produced by generation and consumed by make/unmake.
//!
//! A `ChessMove` carries everything make/unmake needs so neither has to look
//! at the board to interpret it: the moving piece and color, the captured
//! piece, the promotion, special-move flags, and the castling rights that
//! survive the move. A move is only meaningful against the position that
//! generated it.

use std::fmt;

use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

pub const FLAG_CAPTURE: u8 = 1 << 0;
pub const FLAG_DOUBLE_PAWN_PUSH: u8 = 1 << 1;
pub const FLAG_EN_PASSANT: u8 = 1 << 2;
pub const FLAG_CASTLING: u8 = 1 << 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub color: Color,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub flags: u8,
    /// Castling rights still available after this move (intersected on make).
    pub castle_mask: CastlingRights,
}

impl ChessMove {
    #[inline]
    pub fn new(color: Color, piece: PieceKind, from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            piece,
            color,
            captured: None,
            promotion: None,
            flags: 0,
            castle_mask: castle_mask_for_square(from) & castle_mask_for_square(to),
        }
    }

    #[inline]
    pub fn with_capture(mut self, captured: PieceKind) -> Self {
        self.captured = Some(captured);
        self.flags |= FLAG_CAPTURE;
        self
    }

    #[inline]
    pub fn with_promotion(mut self, promotion: PieceKind) -> Self {
        self.promotion = Some(promotion);
        self
    }

    #[inline]
    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.flags & FLAG_CASTLING != 0
    }

    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.flags & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Captures and promotions; the only moves quiescence search explores.
    #[inline]
    pub fn is_unquiet(&self) -> bool {
        self.is_capture() || self.is_promotion()
    }

    /// Square the captured piece stands on; differs from `to` for en passant.
    #[inline]
    pub fn capture_square(&self) -> Square {
        if self.is_en_passant() {
            match self.color {
                Color::Light => self.to - 8,
                Color::Dark => self.to + 8,
            }
        } else {
            self.to
        }
    }

    /// Piece standing on `to` once the move is made.
    #[inline]
    pub fn placed_piece(&self) -> PieceKind {
        self.promotion.unwrap_or(self.piece)
    }

    /// Coordinate notation: origin, destination, optional promotion letter.
    pub fn to_long_algebraic(&self) -> String {
        let mut out = String::with_capacity(5);
        out.push_str(&square_to_algebraic(self.from));
        out.push_str(&square_to_algebraic(self.to));
        if let Some(promotion) = self.promotion {
            out.push(promotion.to_char());
        }
        out
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_long_algebraic())
    }
}

/// Rights that survive any move touching `square` (as origin or target).
#[inline]
pub const fn castle_mask_for_square(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_ALL & !CASTLE_LIGHT_QUEENSIDE,
        4 => CASTLE_ALL & !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE),
        7 => CASTLE_ALL & !CASTLE_LIGHT_KINGSIDE,
        56 => CASTLE_ALL & !CASTLE_DARK_QUEENSIDE,
        60 => CASTLE_ALL & !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE),
        63 => CASTLE_ALL & !CASTLE_DARK_KINGSIDE,
        _ => CASTLE_ALL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_move_drops_both_rights_for_that_side() {
        let mv = ChessMove::new(Color::Light, PieceKind::King, 4, 12);
        assert_eq!(mv.castle_mask, CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
    }

    #[test]
    fn capturing_on_a_corner_drops_the_victims_right() {
        let mv = ChessMove::new(Color::Light, PieceKind::Bishop, 54, 63).with_capture(PieceKind::Rook);
        assert_eq!(mv.castle_mask, CASTLE_ALL & !CASTLE_DARK_KINGSIDE);
        assert!(mv.is_capture());
        assert!(mv.is_unquiet());
    }

    #[test]
    fn en_passant_capture_square_is_behind_target() {
        let light = ChessMove::new(Color::Light, PieceKind::Pawn, 36, 43)
            .with_capture(PieceKind::Pawn)
            .with_flags(FLAG_EN_PASSANT);
        assert_eq!(light.capture_square(), 35);

        let dark = ChessMove::new(Color::Dark, PieceKind::Pawn, 27, 18)
            .with_capture(PieceKind::Pawn)
            .with_flags(FLAG_EN_PASSANT);
        assert_eq!(dark.capture_square(), 26);
    }

    #[test]
    fn long_algebraic_includes_promotion_letter() {
        let mv = ChessMove::new(Color::Light, PieceKind::Pawn, 48, 56).with_promotion(PieceKind::Queen);
        assert_eq!(mv.to_string(), "a7a8q");
        assert_eq!(mv.placed_piece(), PieceKind::Queen);
        let quiet = ChessMove::new(Color::Light, PieceKind::Pawn, 12, 28);
        assert_eq!(quiet.to_long_algebraic(), "e2e4");
    }
}
