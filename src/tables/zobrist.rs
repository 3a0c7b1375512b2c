//! Zobrist hashing support for fast position identity and repetition tracking.
//!
//! The keys come from a fixed-seed generator so hashes are deterministic
//! across runs, which keeps search output reproducible and tests stable.
//! `GameState` maintains its key incrementally; `compute_zobrist_key` is the
//! from-scratch reference used by setup and by consistency checks.

use std::sync::OnceLock;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::game_state::{chess_types::*, game_state::GameState};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

/// Force table construction; later calls are no-ops.
pub(crate) fn ensure_initialized() {
    let _ = tables();
}

fn build_tables() -> ZobristTables {
    log::trace!("building zobrist tables");
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for key in piece {
                *key = rng.random();
            }
        }
    }

    let side_to_move = rng.random();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Return the Zobrist key for a `(color, piece, square)` occupancy term.
#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square as usize]
}

/// Return the Zobrist key contribution for castling rights mask (`0..=15`).
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & CASTLE_ALL) as usize]
}

/// Return the Zobrist key contribution for an en-passant target square.
#[inline]
pub fn en_passant_key(en_passant_square: Option<Square>) -> u64 {
    match en_passant_square {
        Some(square) => tables().en_passant_file[(square % 8) as usize],
        None => 0,
    }
}

/// Return the side-to-move toggle key (xor in when dark to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Compute the full position Zobrist key from the complete game state.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = 0u64;

    for color in Color::ALL {
        for piece in PieceKind::ALL {
            let mut bb = game_state.pieces[color.index()][piece.index()];
            while bb != 0 {
                let sq = bb.trailing_zeros() as Square;
                key ^= piece_square_key(color, piece, sq);
                bb &= bb - 1;
            }
        }
    }

    if game_state.side_to_move == Color::Dark {
        key ^= side_to_move_key();
    }

    key ^= castling_key(game_state.castling_rights);
    key ^= en_passant_key(game_state.en_passant_square);

    key
}
