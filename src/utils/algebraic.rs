//! Square conversions for coordinate notation.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices, for FEN fields and move text.

use crate::game_state::chess_types::Square;

/// Convert a coordinate (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Option<Square> {
    let &[file, rank] = square.as_bytes() else {
        return None;
    };

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }

    Some((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to a coordinate (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    debug_assert!(square < 64, "square index out of bounds: {square}");
    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + (square / 8) % 8);
    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1"), Some(0));
        assert_eq!(algebraic_to_square("e4"), Some(28));
        assert_eq!(algebraic_to_square("h8"), Some(63));
        assert_eq!(square_to_algebraic(0), "a1");
        assert_eq!(square_to_algebraic(63), "h8");
    }

    #[test]
    fn rejects_malformed_coordinates() {
        assert_eq!(algebraic_to_square("i1"), None);
        assert_eq!(algebraic_to_square("a9"), None);
        assert_eq!(algebraic_to_square("e"), None);
        assert_eq!(algebraic_to_square("e44"), None);
    }
}
