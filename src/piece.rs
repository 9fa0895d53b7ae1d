use std::fmt;

use crate::bitboard::Direction;

/// The two players.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::White, Side::Black];

    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    pub const fn fen_char(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    /// The direction this side's pawns advance.
    #[inline]
    pub const fn pawn_direction(self) -> Direction {
        match self {
            Side::White => Direction::North,
            Side::Black => Direction::South,
        }
    }

    pub const fn promotion_rank(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    pub const fn double_push_info(self) -> DoublePushInfo {
        match self {
            Side::White => DoublePushInfo {
                start_rank: 1,
                end_rank: 3,
                capture_target_rank: 2,
            },
            Side::Black => DoublePushInfo {
                start_rank: 6,
                end_rank: 4,
                capture_target_rank: 5,
            },
        }
    }
}

/// Rank geometry of a pawn double push (ranks are zero-based).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DoublePushInfo {
    pub start_rank: u8,
    pub end_rank: u8,
    pub capture_target_rank: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const VALID_PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// The uppercase FEN letter of this kind.
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub const fn from_fen_char(c: char) -> Option<PieceKind> {
        match c {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn is_valid_promotion(self) -> bool {
        VALID_PROMOTIONS.contains(&self)
    }
}

/// A concrete piece: a kind belonging to a side. Empty squares are
/// `Option::<Piece>::None` throughout the crate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Piece { side, kind }
    }

    /// Dense index in `0..12`, used by the piece bitboard and Zobrist
    /// tables.
    #[inline]
    pub const fn index(self) -> usize {
        self.side.index() * 6 + self.kind.index()
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        match self.side {
            Side::White => self.kind.fen_char(),
            Side::Black => self.kind.fen_char().to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        PieceKind::from_fen_char(c.to_ascii_uppercase()).map(|kind| Piece::new(side, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.side, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_indices_are_dense_and_distinct() {
        let mut seen = [false; 12];
        for side in Side::BOTH {
            for kind in PieceKind::ALL {
                let index = Piece::new(side, kind).index();
                assert!(!seen[index]);
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|&v| v));
    }

    #[test]
    fn fen_chars_round_trip() {
        for side in Side::BOTH {
            for kind in PieceKind::ALL {
                let piece = Piece::new(side, kind);
                assert_eq!(Piece::from_fen_char(piece.fen_char()), Some(piece));
            }
        }
        assert_eq!(
            Piece::from_fen_char('k'),
            Some(Piece::new(Side::Black, PieceKind::King))
        );
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(PieceKind::from_fen_char('p'), None);
    }

    #[test]
    fn double_push_geometry() {
        let white = Side::White.double_push_info();
        assert_eq!((white.start_rank, white.end_rank), (1, 3));
        assert_eq!(white.capture_target_rank, 2);

        let black = Side::Black.double_push_info();
        assert_eq!((black.start_rank, black.end_rank), (6, 4));
        assert_eq!(black.capture_target_rank, 5);
    }

    #[test]
    fn promotions_exclude_pawn_and_king() {
        assert!(PieceKind::Queen.is_valid_promotion());
        assert!(PieceKind::Knight.is_valid_promotion());
        assert!(!PieceKind::Pawn.is_valid_promotion());
        assert!(!PieceKind::King.is_valid_promotion());
    }
}
