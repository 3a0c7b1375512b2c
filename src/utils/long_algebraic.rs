//! Coordinate-notation move text (`e2e4`, `e7e8q`).
//!
//! External move text is never turned into a move on its own: it is parsed
//! into squares plus an optional promotion and then matched against the
//! legal moves of the current position, so a successfully resolved move is
//! always one the generator produced.

use crate::errors::ChessError;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::algebraic_to_square;

/// Parsed but unresolved move text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveText {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

pub fn parse_long_algebraic(text: &str) -> Result<MoveText, ChessError> {
    let invalid = || ChessError::InvalidMoveText(text.to_owned());
    let text_trimmed = text.trim();

    if !text_trimmed.is_ascii() || !(4..=5).contains(&text_trimmed.len()) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&text_trimmed[0..2]).ok_or_else(invalid)?;
    let to = algebraic_to_square(&text_trimmed[2..4]).ok_or_else(invalid)?;

    let promotion = match text_trimmed[4..].chars().next() {
        None => None,
        Some(ch) => match PieceKind::from_char(ch) {
            Some(piece) if PieceKind::PROMOTIONS.contains(&piece) => Some(piece),
            _ => return Err(invalid()),
        },
    };

    Ok(MoveText { from, to, promotion })
}

/// Find the legal move named by `text`. A promoting move without a letter
/// resolves to the queen promotion.
pub fn resolve_long_algebraic(text: &str, legal_moves: &[ChessMove]) -> Result<ChessMove, ChessError> {
    let parsed = parse_long_algebraic(text)?;
    let wanted_promotion = parsed.promotion.or_else(|| {
        legal_moves
            .iter()
            .any(|mv| mv.from == parsed.from && mv.to == parsed.to && mv.is_promotion())
            .then_some(PieceKind::Queen)
    });

    legal_moves
        .iter()
        .copied()
        .find(|mv| mv.from == parsed.from && mv.to == parsed.to && mv.promotion == wanted_promotion)
        .ok_or_else(|| ChessError::IllegalMove(text.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::{parse_long_algebraic, resolve_long_algebraic};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::PieceKind;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn parses_plain_and_promotion_text() {
        let plain = parse_long_algebraic("e2e4").expect("move text should parse");
        assert_eq!((plain.from, plain.to, plain.promotion), (12, 28, None));

        let promo = parse_long_algebraic("a7a8n").expect("move text should parse");
        assert_eq!(promo.promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "e2", "e2e9", "e2e4k", "e2e4qq", "z1a1"] {
            assert!(
                matches!(parse_long_algebraic(text), Err(ChessError::InvalidMoveText(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn resolves_against_legal_moves() {
        let mut game_state = parse_fen("r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1").expect("FEN should parse");
        let legal = generate_legal_moves(&mut game_state);

        let castle = resolve_long_algebraic("e1g1", &legal).expect("castle should resolve");
        assert!(castle.is_castle());

        let ep = resolve_long_algebraic("e5d6", &legal).expect("en passant should resolve");
        assert!(ep.is_en_passant());

        assert_eq!(
            resolve_long_algebraic("e1e3", &legal),
            Err(ChessError::IllegalMove("e1e3".to_owned()))
        );
    }

    #[test]
    fn missing_promotion_letter_defaults_to_queen() {
        let mut game_state = parse_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let legal = generate_legal_moves(&mut game_state);

        let queen = resolve_long_algebraic("a7a8", &legal).expect("promotion should resolve");
        assert_eq!(queen.promotion, Some(PieceKind::Queen));

        let rook = resolve_long_algebraic("a7a8r", &legal).expect("promotion should resolve");
        assert_eq!(rook.promotion, Some(PieceKind::Rook));
    }
}
