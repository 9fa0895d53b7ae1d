use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::square::Square;

pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);
pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
pub const RANK_3: Bitboard = Bitboard(0x0000_0000_00FF_0000);
pub const RANK_6: Bitboard = Bitboard(0x0000_FF00_0000_0000);
pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

/// Index returned by the bit-scan operations when the set is empty.
pub const NO_SQUARE_INDEX: i32 = -1;

const DEBRUIJN64: u64 = 0x03F7_9D71_B4CB_0A89;

const INDEX64: [i32; 64] = [
    0, 1, 48, 2, 57, 49, 28, 3, 61, 58, 50, 42, 38, 29, 17, 4, 62, 55, 59, 36,
    53, 51, 43, 22, 45, 39, 33, 30, 24, 18, 12, 5, 63, 47, 56, 27, 60, 41, 37,
    16, 54, 35, 52, 21, 44, 32, 23, 11, 46, 26, 40, 15, 34, 20, 31, 10, 25,
    14, 19, 9, 13, 8, 7, 6,
];

/// A compass direction on the board, from White's point of view.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const STRAIGHT: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Signed square-index delta of a one-step shift in this direction.
    pub const fn offset(self) -> i8 {
        match self {
            Direction::North => 8,
            Direction::NorthEast => 9,
            Direction::East => 1,
            Direction::SouthEast => -7,
            Direction::South => -8,
            Direction::SouthWest => -9,
            Direction::West => -1,
            Direction::NorthWest => 7,
        }
    }
}

/// A set of squares packed into a `u64`, bit `i` standing for square index
/// `i` (a1 = 0, h8 = 63).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const NONE: Bitboard = Bitboard(0);
    pub const EVERYTHING: Bitboard = Bitboard(u64::MAX);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Bitboard(value)
    }

    pub fn from_squares<I>(squares: I) -> Self
    where
        I: IntoIterator<Item = Square>,
    {
        squares
            .into_iter()
            .fold(Bitboard::NONE, |acc, square| acc | square.bitboard())
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_any(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1u64 << square.index()) != 0
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Keeps only the least significant set bit.
    #[inline]
    pub const fn isolate_first_square(self) -> Bitboard {
        Bitboard(isolate_first(self.0))
    }

    /// True for sets holding exactly one square; false for the empty set.
    #[inline]
    pub const fn is_exactly_one_square(self) -> bool {
        self.0 != 0 && self.0 & (self.0 - 1) == 0
    }

    /// Index of the least significant set bit via the De Bruijn multiply,
    /// or [`NO_SQUARE_INDEX`] for the empty set.
    #[inline]
    pub const fn find_first_square_index(self) -> i32 {
        if self.0 == 0 {
            NO_SQUARE_INDEX
        } else {
            INDEX64[(isolate_first(self.0).wrapping_mul(DEBRUIJN64) >> 58) as usize]
        }
    }

    #[inline]
    pub fn first_square(self) -> Option<Square> {
        let index = self.find_first_square_index();
        (index != NO_SQUARE_INDEX).then(|| Square::from_index_unchecked(index as u8))
    }

    /// Removes the least significant set bit and returns its index, or
    /// [`NO_SQUARE_INDEX`] when the set was empty.
    #[inline]
    pub fn pop_first_square_index(&mut self) -> i32 {
        let index = self.find_first_square_index();
        self.0 &= self.0.wrapping_sub(1);
        index
    }

    #[inline]
    pub fn pop_first_square(&mut self) -> Option<Square> {
        let result = self.first_square();
        self.0 &= self.0.wrapping_sub(1);
        result
    }

    /// Removes the least significant set bit and returns it as a one-square
    /// set (the empty set when there was none).
    #[inline]
    pub fn pop_first_square_bitboard(&mut self) -> Bitboard {
        let result = self.isolate_first_square();
        self.0 &= self.0.wrapping_sub(1);
        result
    }

    /// One-step shift; squares that would slide off the board edge vanish.
    #[inline]
    pub const fn shift(self, direction: Direction) -> Bitboard {
        Bitboard(shift_value(self.0, direction))
    }

    pub fn squares(self) -> Squares {
        Squares(self)
    }
}

#[inline]
const fn isolate_first(value: u64) -> u64 {
    value & value.wrapping_neg()
}

pub(crate) const fn shift_value(value: u64, direction: Direction) -> u64 {
    match direction {
        Direction::North => (value & !RANK_8.0) << 8,
        Direction::NorthEast => (value & !RANK_8.0 & !FILE_H.0) << 9,
        Direction::East => (value & !FILE_H.0) << 1,
        Direction::SouthEast => (value & !RANK_1.0 & !FILE_H.0) >> 7,
        Direction::South => (value & !RANK_1.0) >> 8,
        Direction::SouthWest => (value & !RANK_1.0 & !FILE_A.0) >> 9,
        Direction::West => (value & !FILE_A.0) >> 1,
        Direction::NorthWest => (value & !RANK_8.0 & !FILE_A.0) << 7,
    }
}

impl Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#018x})", self.0)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for square in self.squares() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{square}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

/// Iterator over the squares of a bitboard in ascending index order.
pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.0.pop_first_square()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for Squares {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(notation: &str) -> Square {
        Square::from_algebraic(notation).unwrap()
    }

    #[test]
    fn find_first_square_index_matches_trailing_zeros() {
        assert_eq!(Bitboard::NONE.find_first_square_index(), NO_SQUARE_INDEX);
        for index in 0..64u32 {
            let single = Bitboard::new(1u64 << index);
            assert_eq!(single.find_first_square_index(), index as i32);

            // Adding higher bits must not change the answer.
            let noisy = Bitboard::new((1u64 << index) | (u64::MAX << index << 1));
            assert_eq!(noisy.find_first_square_index(), index as i32);
        }
    }

    #[test]
    fn pop_first_square_drains_in_ascending_order() {
        let mut board = Bitboard::from_squares([sq("h8"), sq("a1"), sq("e4")]);
        assert_eq!(board.pop_first_square(), Some(sq("a1")));
        assert_eq!(board.pop_first_square(), Some(sq("e4")));
        assert_eq!(board.pop_first_square(), Some(sq("h8")));
        assert_eq!(board.pop_first_square(), None);
        assert_eq!(board.pop_first_square_index(), NO_SQUARE_INDEX);
    }

    #[test]
    fn isolate_and_exactly_one() {
        assert!(!Bitboard::NONE.is_exactly_one_square());
        assert!(sq("c3").bitboard().is_exactly_one_square());

        let two = sq("c3").bitboard() | sq("d5").bitboard();
        assert!(!two.is_exactly_one_square());
        assert_eq!(two.isolate_first_square(), sq("c3").bitboard());
    }

    #[test]
    fn shifts_drop_squares_at_the_edges() {
        assert_eq!(RANK_8.shift(Direction::North), Bitboard::NONE);
        assert_eq!(RANK_1.shift(Direction::South), Bitboard::NONE);
        assert_eq!(FILE_A.shift(Direction::West), Bitboard::NONE);
        assert_eq!(FILE_H.shift(Direction::East), Bitboard::NONE);

        assert_eq!(
            sq("e4").bitboard().shift(Direction::NorthEast),
            sq("f5").bitboard()
        );

        let a1 = sq("a1").bitboard();
        assert_eq!(a1.shift(Direction::North), sq("a2").bitboard());
        for direction in [
            Direction::South,
            Direction::SouthEast,
            Direction::SouthWest,
            Direction::West,
        ] {
            assert_eq!(a1.shift(direction), Bitboard::NONE, "{direction:?}");
        }
        assert_eq!(
            sq("h4").bitboard().shift(Direction::NorthEast),
            Bitboard::NONE
        );
    }

    #[test]
    fn shift_offsets_agree_with_direction_offset() {
        let from = sq("d4");
        for direction in Direction::ALL {
            let shifted = from.bitboard().shift(direction);
            let expected = from.index() as i32 + direction.offset() as i32;
            assert_eq!(shifted.find_first_square_index(), expected, "{direction:?}");
        }
    }

    #[test]
    fn operators_behave_like_set_operations() {
        let a = Bitboard::from_squares([sq("a1"), sq("b2")]);
        let b = Bitboard::from_squares([sq("b2"), sq("c3")]);

        assert_eq!(a & b, sq("b2").bitboard());
        assert_eq!((a | b).count(), 3);
        assert_eq!(a ^ b, Bitboard::from_squares([sq("a1"), sq("c3")]));
        assert_eq!(!Bitboard::NONE, Bitboard::EVERYTHING);

        let mut acc = a;
        acc |= b;
        acc &= !sq("b2").bitboard();
        assert_eq!(acc, Bitboard::from_squares([sq("a1"), sq("c3")]));
    }

    #[test]
    fn squares_iterator_yields_every_bit() {
        let board = RANK_3 | FILE_A;
        let collected: Vec<Square> = board.squares().collect();
        assert_eq!(collected.len(), board.count() as usize);
        assert_eq!(Bitboard::from_squares(collected), board);
    }
}
