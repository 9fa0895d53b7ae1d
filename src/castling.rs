use std::fmt;

use crate::bitboard::Bitboard;
use crate::moves::GameMove;
use crate::piece::Side;
use crate::square::Square;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CastlingType {
    WhiteKingSide,
    WhiteQueenSide,
    BlackKingSide,
    BlackQueenSide,
}

impl CastlingType {
    pub const ALL: [CastlingType; 4] = [
        CastlingType::WhiteKingSide,
        CastlingType::WhiteQueenSide,
        CastlingType::BlackKingSide,
        CastlingType::BlackQueenSide,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            CastlingType::WhiteKingSide => 0,
            CastlingType::WhiteQueenSide => 1,
            CastlingType::BlackKingSide => 2,
            CastlingType::BlackQueenSide => 3,
        }
    }

    pub const fn side(self) -> Side {
        match self {
            CastlingType::WhiteKingSide | CastlingType::WhiteQueenSide => Side::White,
            CastlingType::BlackKingSide | CastlingType::BlackQueenSide => Side::Black,
        }
    }

    pub const fn castling_side(self) -> CastlingSide {
        match self {
            CastlingType::WhiteKingSide | CastlingType::BlackKingSide => CastlingSide::KingSide,
            CastlingType::WhiteQueenSide | CastlingType::BlackQueenSide => CastlingSide::QueenSide,
        }
    }

    #[inline]
    pub const fn right(self) -> CastlingRights {
        CastlingRights(1 << self.index())
    }

    pub const fn fen_char(self) -> char {
        match self {
            CastlingType::WhiteKingSide => 'K',
            CastlingType::WhiteQueenSide => 'Q',
            CastlingType::BlackKingSide => 'k',
            CastlingType::BlackQueenSide => 'q',
        }
    }
}

/// The set of castling permissions still available, one bit per
/// [`CastlingType`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);
    pub const WHITE: CastlingRights = CastlingRights(0b0011);
    pub const BLACK: CastlingRights = CastlingRights(0b1100);

    pub const fn for_side(side: Side) -> CastlingRights {
        match side {
            Side::White => Self::WHITE,
            Side::Black => Self::BLACK,
        }
    }

    #[inline]
    pub const fn contains(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn insert(&mut self, other: CastlingRights) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: CastlingRights) {
        self.0 &= !other.0;
    }

    /// Dense index in `0..16`, used by the Zobrist castling table.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Parses the FEN castling field: `-` or any non-empty combination of
    /// `K`, `Q`, `k`, `q` (repeats tolerated).
    pub fn from_fen(snippet: &str) -> Option<CastlingRights> {
        if snippet == "-" {
            return Some(Self::NONE);
        }
        if snippet.is_empty() {
            return None;
        }

        let mut rights = Self::NONE;
        for c in snippet.chars() {
            let castling_type = CastlingType::ALL
                .into_iter()
                .find(|t| t.fen_char() == c)?;
            rights.insert(castling_type.right());
        }
        Some(rights)
    }
}

impl fmt::Display for CastlingRights {
    /// The FEN castling field, always in `KQkq` order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }
        for castling_type in CastlingType::ALL {
            if self.contains(castling_type.right()) {
                write!(f, "{}", castling_type.fen_char())?;
            }
        }
        Ok(())
    }
}

/// Static description of one castling maneuver: both sub-moves, the squares
/// that must be empty, and the square the king passes through.
#[derive(Clone, Copy, Debug)]
pub struct CastlingInfo {
    pub castling_type: CastlingType,
    pub king_move: GameMove,
    pub rook_move: GameMove,
    pub empty_squares: Bitboard,
    pub passed_square: Square,
}

impl CastlingInfo {
    #[inline]
    pub const fn side(&self) -> Side {
        self.castling_type.side()
    }

    #[inline]
    pub const fn right(&self) -> CastlingRights {
        self.castling_type.right()
    }

    pub fn for_type(castling_type: CastlingType) -> &'static CastlingInfo {
        &CASTLING_CATALOG[castling_type.index()]
    }

    /// Finds the maneuver whose king sub-move matches the given endpoints.
    pub fn for_king_move(mv: &GameMove) -> Option<&'static CastlingInfo> {
        CASTLING_CATALOG
            .iter()
            .find(|info| info.king_move.from == mv.from && info.king_move.to == mv.to)
    }
}

const fn squares2(a: Square, b: Square) -> Bitboard {
    Bitboard::new((1u64 << a.index()) | (1u64 << b.index()))
}

const fn squares3(a: Square, b: Square, c: Square) -> Bitboard {
    Bitboard::new((1u64 << a.index()) | (1u64 << b.index()) | (1u64 << c.index()))
}

pub static CASTLING_CATALOG: [CastlingInfo; 4] = {
    const A1: Square = Square::make(0, 0);
    const B1: Square = Square::make(1, 0);
    const C1: Square = Square::make(2, 0);
    const D1: Square = Square::make(3, 0);
    const E1: Square = Square::make(4, 0);
    const F1: Square = Square::make(5, 0);
    const G1: Square = Square::make(6, 0);
    const H1: Square = Square::make(7, 0);
    const A8: Square = Square::make(0, 7);
    const B8: Square = Square::make(1, 7);
    const C8: Square = Square::make(2, 7);
    const D8: Square = Square::make(3, 7);
    const E8: Square = Square::make(4, 7);
    const F8: Square = Square::make(5, 7);
    const G8: Square = Square::make(6, 7);
    const H8: Square = Square::make(7, 7);

    [
        CastlingInfo {
            castling_type: CastlingType::WhiteKingSide,
            king_move: GameMove::new(E1, G1),
            rook_move: GameMove::new(H1, F1),
            empty_squares: squares2(F1, G1),
            passed_square: F1,
        },
        CastlingInfo {
            castling_type: CastlingType::WhiteQueenSide,
            king_move: GameMove::new(E1, C1),
            rook_move: GameMove::new(A1, D1),
            empty_squares: squares3(B1, C1, D1),
            passed_square: D1,
        },
        CastlingInfo {
            castling_type: CastlingType::BlackKingSide,
            king_move: GameMove::new(E8, G8),
            rook_move: GameMove::new(H8, F8),
            empty_squares: squares2(F8, G8),
            passed_square: F8,
        },
        CastlingInfo {
            castling_type: CastlingType::BlackQueenSide,
            king_move: GameMove::new(E8, C8),
            rook_move: GameMove::new(A8, D8),
            empty_squares: squares3(B8, C8, D8),
            passed_square: D8,
        },
    ]
};
