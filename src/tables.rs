//! Precomputed attack geometry, built at compile time.

use crate::bitboard::{shift_value, Bitboard, Direction, FILE_A};
use crate::square::Square;

/// Knight reach per source square.
pub static KNIGHT_ATTACKS: [Bitboard; 64] = build_leaper_attacks(KNIGHT_JUMPS);

/// King reach per source square.
pub static KING_ATTACKS: [Bitboard; 64] = build_leaper_attacks(KING_STEPS);

/// Full rank and file of each square, the source square included.
pub static STRAIGHT_ATTACKS: [Bitboard; 64] = build_straight_attacks();

/// The four diagonal rays of each square, walked to the board edge; the
/// source square is not included.
pub static DIAGONAL_ATTACKS: [Bitboard; 64] = build_diagonal_attacks();

static CONNECTIONS: [u64; 64 * 64] = build_connections();

/// Squares strictly between two collinear squares (straight or diagonal
/// line). For any other pair the result is the all-ones sentinel, which can
/// never be a subset of the empty-square set on a board with kings.
#[inline]
pub fn connection(from: Square, to: Square) -> Bitboard {
    Bitboard::new(CONNECTIONS[from.index() * 64 + to.index()])
}

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const fn build_leaper_attacks(steps: [(i32, i32); 8]) -> [Bitboard; 64] {
    let mut table = [Bitboard::NONE; 64];
    let mut square = 0;
    while square < 64 {
        let file = (square % 8) as i32;
        let rank = (square / 8) as i32;
        let mut value = 0u64;
        let mut step = 0;
        while step < steps.len() {
            let (file_offset, rank_offset) = steps[step];
            let f = file + file_offset;
            let r = rank + rank_offset;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                value |= 1u64 << (r * 8 + f);
            }
            step += 1;
        }
        table[square] = Bitboard::new(value);
        square += 1;
    }
    table
}

const fn build_straight_attacks() -> [Bitboard; 64] {
    let mut table = [Bitboard::NONE; 64];
    let mut square = 0;
    while square < 64 {
        let file = square % 8;
        let rank = square / 8;
        table[square] = Bitboard::new((0xFFu64 << (rank * 8)) | (FILE_A.value() << file));
        square += 1;
    }
    table
}

const fn build_diagonal_attacks() -> [Bitboard; 64] {
    let mut table = [Bitboard::NONE; 64];
    let mut square = 0;
    while square < 64 {
        let mut value = 0u64;
        let mut d = 0;
        while d < Direction::DIAGONAL.len() {
            let direction = Direction::DIAGONAL[d];
            let mut current = 1u64 << square;
            loop {
                current = shift_value(current, direction);
                if current == 0 {
                    break;
                }
                value |= current;
            }
            d += 1;
        }
        table[square] = Bitboard::new(value);
        square += 1;
    }
    table
}

const fn build_connections() -> [u64; 64 * 64] {
    let mut table = [u64::MAX; 64 * 64];
    let mut square = 0;
    while square < 64 {
        let mut d = 0;
        while d < Direction::ALL.len() {
            let direction = Direction::ALL[d];
            let mut current = 1u64 << square;
            let mut connection = 0u64;
            loop {
                current = shift_value(current, direction);
                if current == 0 {
                    break;
                }
                let other = current.trailing_zeros() as usize;
                table[square * 64 + other] = connection;
                table[other * 64 + square] = connection;
                connection |= current;
            }
            d += 1;
        }
        square += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::Bitboard;

    fn sq(notation: &str) -> Square {
        Square::from_algebraic(notation).unwrap()
    }

    #[test]
    fn knight_reach_counts() {
        assert_eq!(KNIGHT_ATTACKS[sq("a1").index()].count(), 2);
        assert_eq!(KNIGHT_ATTACKS[sq("h8").index()].count(), 2);
        assert_eq!(KNIGHT_ATTACKS[sq("b1").index()].count(), 3);
        assert_eq!(KNIGHT_ATTACKS[sq("e4").index()].count(), 8);
        assert!(KNIGHT_ATTACKS[sq("e4").index()].contains(sq("f6")));
        assert!(!KNIGHT_ATTACKS[sq("e4").index()].contains(sq("e5")));
    }

    #[test]
    fn king_reach_counts() {
        assert_eq!(KING_ATTACKS[sq("a1").index()].count(), 3);
        assert_eq!(KING_ATTACKS[sq("a4").index()].count(), 5);
        assert_eq!(KING_ATTACKS[sq("e4").index()].count(), 8);
        assert!(KING_ATTACKS[sq("e1").index()].contains(sq("d2")));
    }

    #[test]
    fn straight_reach_is_rank_and_file() {
        let reach = STRAIGHT_ATTACKS[sq("e4").index()];
        assert_eq!(reach.count(), 15);
        assert!(reach.contains(sq("e4")));
        assert!(reach.contains(sq("e8")));
        assert!(reach.contains(sq("a4")));
        assert!(!reach.contains(sq("d5")));
    }

    #[test]
    fn diagonal_reach_excludes_source() {
        let reach = DIAGONAL_ATTACKS[sq("e4").index()];
        assert_eq!(reach.count(), 13);
        assert!(!reach.contains(sq("e4")));
        assert!(reach.contains(sq("h1")));
        assert!(reach.contains(sq("a8")));
        assert!(!reach.contains(sq("e5")));
    }

    #[test]
    fn connections_between_collinear_squares() {
        let file = connection(sq("e1"), sq("e8"));
        assert_eq!(file.count(), 6);
        assert!(file.contains(sq("e4")));
        assert!(!file.contains(sq("e1")));
        assert!(!file.contains(sq("e8")));

        let diagonal = connection(sq("a1"), sq("h8"));
        assert_eq!(diagonal.count(), 6);
        assert!(diagonal.contains(sq("d4")));

        assert_eq!(connection(sq("e4"), sq("e5")), Bitboard::NONE);
        assert_eq!(connection(sq("e4"), sq("f5")), Bitboard::NONE);
    }

    #[test]
    fn connections_are_symmetric() {
        for a in 0..64 {
            for b in 0..64 {
                let a = Square::from_index(a).unwrap();
                let b = Square::from_index(b).unwrap();
                assert_eq!(connection(a, b), connection(b, a));
            }
        }
    }

    #[test]
    fn non_collinear_pairs_use_the_sentinel() {
        assert_eq!(connection(sq("e4"), sq("f6")), Bitboard::EVERYTHING);
        assert_eq!(connection(sq("a1"), sq("b3")), Bitboard::EVERYTHING);
    }
}
