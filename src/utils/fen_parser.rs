//! FEN-to-GameState parser.
//!
//! Builds fully-populated incremental state from a Forsyth-Edwards Notation
//! string, including piece bitboards, rights, clocks, occupancies, the hash
//! and the repetition history seed.

use crate::errors::FenError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side-to-move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    let halfmove_part = parts.next().ok_or(FenError::MissingField("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or(FenError::MissingField("fullmove number"))?;

    if parts.next().is_some() {
        return Err(FenError::ExtraFields);
    }

    let mut game_state = GameState::default();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part, &game_state)?;
    game_state.halfmove_clock = parse_counter("halfmove clock", halfmove_part)?;
    game_state.fullmove_number = parse_counter("fullmove number", fullmove_part)?;

    game_state.refresh_derived_state();

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::RankWidth { rank: board_rank + 1 });
                }
                file += empty_count as usize;
                continue;
            }

            let (color, piece) = piece_from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;

            if file >= 8 {
                return Err(FenError::RankWidth { rank: board_rank + 1 });
            }

            let sq = (board_rank * 8 + file) as Square;
            game_state.pieces[color.index()][piece.index()] |= square_bit(sq);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::RankWidth { rank: board_rank + 1 });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FenError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(FenError::InvalidCastling(ch)),
        }
    }

    Ok(rights)
}

/// The target must be empty, sit on the rank the side to move captures
/// onto, and have an enemy pawn standing just behind it.
fn parse_en_passant_square(en_passant_part: &str, game_state: &GameState) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let invalid = || FenError::InvalidSquare(en_passant_part.to_owned());
    let sq = algebraic_to_square(en_passant_part).ok_or_else(invalid)?;

    let mover = game_state.side_to_move;
    let (target_rank, pushed_pawn) = match mover {
        Color::Light => (RANK_6, sq.checked_sub(8)),
        Color::Dark => (RANK_3, sq.checked_add(8)),
    };
    // Occupancy caches are not built yet, so read the piece bitboards.
    let occupied = game_state.pieces.iter().flatten().any(|bb| bb & square_bit(sq) != 0);
    let enemy_pawns = game_state.pieces[mover.opposite().index()][PieceKind::Pawn.index()];

    match pushed_pawn {
        Some(behind)
            if square_bit(sq) & target_rank != 0
                && !occupied
                && enemy_pawns & square_bit(behind) != 0 =>
        {
            Ok(Some(sq))
        }
        _ => Err(invalid()),
    }
}

fn parse_counter(field: &'static str, value: &str) -> Result<u16, FenError> {
    value.parse::<u16>().map_err(|_| FenError::InvalidCounter {
        field,
        value: value.to_owned(),
    })
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    Some((color, PieceKind::from_char(ch)?))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::FenError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::tables::zobrist::compute_zobrist_key;
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_game_state(&game_state));

        assert_eq!(game_state.side_to_move, Color::Light);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.castling_rights, CASTLE_ALL);
        assert_eq!(game_state.en_passant_square, None);
        assert_eq!(game_state.pieces[Color::Light.index()][PieceKind::Pawn.index()], RANK_1 << 8);
        assert_eq!(game_state.zobrist_key, compute_zobrist_key(&game_state));
    }

    #[test]
    fn parse_en_passant_and_clocks() {
        let game_state =
            parse_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2")
                .expect("FEN should parse");
        assert_eq!(game_state.en_passant_square, Some(44));
        assert_eq!(game_state.fullmove_number, 2);
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Err(FenError::MissingField("halfmove clock"))
        );
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra"),
            Err(FenError::ExtraFields)
        );
    }

    #[test]
    fn wrong_rank_shape_is_rejected() {
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::RankCount(7))
        );
        assert_eq!(
            parse_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::RankWidth { rank: 7 })
        );
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::RankWidth { rank: 6 })
        );
    }

    #[test]
    fn invalid_fields_are_rejected() {
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1"),
            Err(FenError::InvalidPiece('X'))
        );
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::InvalidSideToMove(_))
        ));
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w KZ - 0 1"),
            Err(FenError::InvalidCastling('Z'))
        );
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - e4 0 1"),
            Err(FenError::InvalidSquare(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            Err(FenError::InvalidCounter { field: "halfmove clock", .. })
        ));
    }

    #[test]
    fn en_passant_target_must_match_side_and_pushed_pawn() {
        let rejected = [
            // No dark pawn behind e3, and e3 is on the wrong rank for white.
            "4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1",
            // A knight, not a pawn, stands behind d6.
            "4k3/8/8/3nP3/8/8/8/4K3 w - d6 0 1",
            // Right pawn, wrong side to move.
            "4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1",
            // Target square is occupied.
            "4k3/8/3n4/3pP3/8/8/8/4K3 w - d6 0 1",
        ];
        for fen in rejected {
            assert!(
                matches!(parse_fen(fen), Err(FenError::InvalidSquare(_))),
                "{fen} should be rejected"
            );
        }

        let game_state = parse_fen("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").expect("FEN should parse");
        assert_eq!(game_state.en_passant_square, Some(19));
    }
}
