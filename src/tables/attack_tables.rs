//! Precomputed attack geometry.
//!
//! Holds per-square sliding rays in eight directions, and the leaper tables
//! for knights, kings and pawns. The tables are built once on first use (or
//! by [`crate::tables::init::init_tables`]) and are read-only afterwards.
//!
//! Each direction keeps a 65th ray entry that is always empty. Sliding
//! attacks look up the ray beyond the nearest blocker, and "no blocker" maps
//! to index [`NO_BLOCKER`], so trimming needs no special case.

use std::sync::OnceLock;

use crate::game_state::chess_types::*;

/// Ray index meaning "no blocker on this ray".
pub const NO_BLOCKER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    NorthEast,
    NorthWest,
    South,
    West,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::South,
        Direction::West,
        Direction::SouthEast,
        Direction::SouthWest,
    ];
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::NorthEast => 2,
            Direction::NorthWest => 3,
            Direction::South => 4,
            Direction::West => 5,
            Direction::SouthEast => 6,
            Direction::SouthWest => 7,
        }
    }

    /// `(file_step, rank_step)` for one square along this direction.
    #[inline]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    /// Whether square indices increase along this direction.
    #[inline]
    pub const fn is_increasing(self) -> bool {
        self.index() < 4
    }
}

#[derive(Debug)]
pub struct AttackTables {
    rays: [[Bitboard; 65]; 8],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
}

static ATTACK_TABLES: OnceLock<AttackTables> = OnceLock::new();

#[inline]
pub fn attack_tables() -> &'static AttackTables {
    ATTACK_TABLES.get_or_init(build_attack_tables)
}

impl AttackTables {
    /// All squares strictly beyond `square` along `direction`, up to the edge.
    #[inline]
    pub fn ray(&self, direction: Direction, square: usize) -> Bitboard {
        self.rays[direction.index()][square]
    }

    #[inline]
    pub fn knight_attacks(&self, square: Square) -> Bitboard {
        self.knight[square as usize]
    }

    #[inline]
    pub fn king_attacks(&self, square: Square) -> Bitboard {
        self.king[square as usize]
    }

    /// Squares a pawn of `color` on `square` attacks.
    #[inline]
    pub fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard {
        self.pawn[color.index()][square as usize]
    }

    /// Ray along `direction` up to and including the first occupied square.
    #[inline]
    pub fn sliding_attacks(&self, direction: Direction, square: Square, occupancy: Bitboard) -> Bitboard {
        let rays = &self.rays[direction.index()];
        let ray = rays[square as usize];
        let blockers = ray & occupancy;
        let nearest = if direction.is_increasing() {
            // trailing_zeros(0) == 64 == NO_BLOCKER
            blockers.trailing_zeros() as usize
        } else {
            blockers
                .checked_ilog2()
                .map_or(NO_BLOCKER, |bit| bit as usize)
        };
        ray & !rays[nearest]
    }

    #[inline]
    pub fn rook_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        Direction::ORTHOGONAL
            .iter()
            .fold(0, |acc, &dir| acc | self.sliding_attacks(dir, square, occupancy))
    }

    #[inline]
    pub fn bishop_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        Direction::DIAGONAL
            .iter()
            .fold(0, |acc, &dir| acc | self.sliding_attacks(dir, square, occupancy))
    }

    #[inline]
    pub fn queen_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.rook_attacks(square, occupancy) | self.bishop_attacks(square, occupancy)
    }
}

fn build_attack_tables() -> AttackTables {
    log::trace!("building attack tables");

    let mut rays = [[0u64; 65]; 8];
    for direction in Direction::ALL {
        let (file_step, rank_step) = direction.step();
        for sq in 0..64 {
            rays[direction.index()][sq] = trace_ray(sq as i32, file_step, rank_step);
        }
        // rays[_][NO_BLOCKER] stays empty.
    }

    let mut knight = [0u64; 64];
    let mut king = [0u64; 64];
    let mut pawn = [[0u64; 64]; 2];

    for sq in 0..64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;

        for (df, dr) in [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)] {
            knight[sq] |= bit_if_on_board(file + df, rank + dr);
        }
        for (df, dr) in [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)] {
            king[sq] |= bit_if_on_board(file + df, rank + dr);
        }

        pawn[Color::Light.index()][sq] =
            bit_if_on_board(file - 1, rank + 1) | bit_if_on_board(file + 1, rank + 1);
        pawn[Color::Dark.index()][sq] =
            bit_if_on_board(file - 1, rank - 1) | bit_if_on_board(file + 1, rank - 1);
    }

    AttackTables {
        rays,
        knight,
        king,
        pawn,
    }
}

fn trace_ray(square: i32, file_step: i32, rank_step: i32) -> Bitboard {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut ray = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        ray |= 1u64 << (rank * 8 + file);
        file += file_step;
        rank += rank_step;
    }

    ray
}

fn bit_if_on_board(file: i32, rank: i32) -> Bitboard {
    if !(0..8).contains(&file) || !(0..8).contains(&rank) {
        return 0;
    }
    1u64 << (rank * 8 + file)
}

#[cfg(test)]
mod tests {
    use super::{attack_tables, Direction, NO_BLOCKER};
    use crate::game_state::chess_types::Color;

    const A1: u8 = 0;
    const E2: u8 = 12;
    const D4: u8 = 27;
    const E7: u8 = 52;

    #[test]
    fn sentinel_rays_are_empty() {
        let tables = attack_tables();
        for dir in Direction::ALL {
            assert_eq!(tables.ray(dir, NO_BLOCKER), 0);
        }
    }

    #[test]
    fn rays_from_d4_cover_rook_and_bishop_lines() {
        let tables = attack_tables();
        let orthogonal: u32 = Direction::ORTHOGONAL
            .iter()
            .map(|&d| tables.ray(d, D4 as usize).count_ones())
            .sum();
        let diagonal: u32 = Direction::DIAGONAL
            .iter()
            .map(|&d| tables.ray(d, D4 as usize).count_ones())
            .sum();
        assert_eq!(orthogonal, 14);
        assert_eq!(diagonal, 13);
    }

    #[test]
    fn rook_blocker_stops_ray_in_both_scan_orders() {
        let tables = attack_tables();
        let blocker_on_a4 = 1u64 << 24;
        let attacks = tables.rook_attacks(A1, blocker_on_a4);
        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
        assert_eq!(attacks.count_ones(), 3 + 7);

        // From h8 scanning toward lower indices, blocker on h5.
        let h8 = 63u8;
        let blocker_on_h5 = 1u64 << 39;
        let attacks = tables.rook_attacks(h8, blocker_on_h5);
        assert_ne!(attacks & blocker_on_h5, 0);
        assert_eq!(attacks & (1u64 << 31), 0);
        assert_eq!(attacks.count_ones(), 3 + 7);
    }

    #[test]
    fn bishop_attacks_from_d4_on_empty_board() {
        let tables = attack_tables();
        assert_eq!(tables.bishop_attacks(D4, 0).count_ones(), 13);
        assert_eq!(tables.queen_attacks(D4, 0).count_ones(), 27);
    }

    #[test]
    fn leaper_tables_respect_board_edges() {
        let tables = attack_tables();
        assert_eq!(tables.knight_attacks(D4).count_ones(), 8);
        assert_eq!(tables.knight_attacks(A1).count_ones(), 2);
        assert_eq!(tables.king_attacks(A1).count_ones(), 3);
        assert_eq!(tables.king_attacks(D4).count_ones(), 8);
    }

    #[test]
    fn pawn_attacks_by_color() {
        let tables = attack_tables();
        assert_eq!(tables.pawn_attacks(Color::Light, E2), (1u64 << 19) | (1u64 << 21));
        assert_eq!(tables.pawn_attacks(Color::Dark, E7), (1u64 << 43) | (1u64 << 45));
        assert_eq!(tables.pawn_attacks(Color::Light, 8).count_ones(), 1);
    }
}
