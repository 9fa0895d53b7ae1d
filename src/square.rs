use std::fmt;

use crate::bitboard::Bitboard;
use crate::error::ChessError;

pub const FILE_COUNT: u8 = 8;
pub const RANK_COUNT: u8 = 8;
pub const SQUARE_COUNT: usize = (FILE_COUNT * RANK_COUNT) as usize;

/// A board square, stored as an index in `0..64` (a1 = 0, h8 = 63).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub fn from_index(index: i32) -> Result<Self, ChessError> {
        if index & !0x3F != 0 {
            return Err(ChessError::InvalidSquareIndex(index));
        }
        Ok(Square(index as u8))
    }

    pub fn from_file_rank(file: i32, rank: i32) -> Result<Self, ChessError> {
        if file & !0x07 != 0 || rank & !0x07 != 0 {
            return Err(ChessError::InvalidFileRank { file, rank });
        }
        Ok(Square(((rank << 3) | file) as u8))
    }

    /// Parses algebraic notation such as `e4`. The file letter may be in
    /// either case.
    pub fn from_algebraic(notation: &str) -> Result<Self, ChessError> {
        let bytes = notation.as_bytes();
        if bytes.len() == 2 {
            let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
            let rank = bytes[1].wrapping_sub(b'1');
            if file < FILE_COUNT && rank < RANK_COUNT {
                return Ok(Square::make(file, rank));
            }
        }
        Err(ChessError::InvalidSquare(notation.to_string()))
    }

    pub(crate) const fn make(file: u8, rank: u8) -> Self {
        Square((rank << 3) | file)
    }

    pub(crate) const fn from_index_unchecked(index: u8) -> Self {
        Square(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 & 0x07
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        (self.0 >> 3) & 0x07
    }

    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard::new(1u64 << self.0)
    }

    /// Applies a file/rank offset, returning `None` when the result leaves
    /// the board.
    pub fn shifted(self, shift: SquareShift) -> Option<Square> {
        let file = self.file() as i8 + shift.file_offset;
        let rank = self.rank() as i8 + shift.rank_offset;
        Square::from_file_rank(file as i32, rank as i32).ok()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A relative file/rank displacement applied to a `Square`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SquareShift {
    pub file_offset: i8,
    pub rank_offset: i8,
}

impl SquareShift {
    pub const fn new(file_offset: i8, rank_offset: i8) -> Self {
        SquareShift {
            file_offset,
            rank_offset,
        }
    }
}
