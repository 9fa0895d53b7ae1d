use std::fmt;

use log::debug;

use crate::bitboard::Bitboard;
use crate::error::ChessError;
use crate::piece::{Piece, Side};
use crate::square::Square;
use crate::zobrist::ZOBRIST;

/// Placement of pieces on the board, kept in three redundant forms: a
/// per-square mailbox, one bitboard per piece, and side/empty aggregates.
/// A running Zobrist key over the placement is maintained incrementally.
#[derive(Clone)]
pub struct PiecePosition {
    board: [Option<Piece>; 64],
    piece_bitboards: [Bitboard; 12],
    side_bitboards: [Bitboard; 2],
    empty_squares: Bitboard,
    zobrist: u64,
}

impl PiecePosition {
    pub fn new() -> Self {
        PiecePosition {
            board: [None; 64],
            piece_bitboards: [Bitboard::NONE; 12],
            side_bitboards: [Bitboard::NONE; 2],
            empty_squares: Bitboard::EVERYTHING,
            zobrist: 0,
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    #[inline]
    pub fn piece_bitboard(&self, piece: Piece) -> Bitboard {
        self.piece_bitboards[piece.index()]
    }

    #[inline]
    pub fn side_bitboard(&self, side: Side) -> Bitboard {
        self.side_bitboards[side.index()]
    }

    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        self.empty_squares
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        !self.empty_squares
    }

    /// Zobrist key over the piece placement alone.
    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist
    }

    /// Puts `piece` on `square` (or clears it with `None`) and returns what
    /// was there before. The single mutation primitive: every bitboard and
    /// the hash are updated here and nowhere else.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        let bit = square.bitboard();
        let old = self.board[square.index()];
        self.board[square.index()] = piece;

        match old {
            Some(old_piece) => {
                self.piece_bitboards[old_piece.index()] &= !bit;
                self.side_bitboards[old_piece.side.index()] &= !bit;
            }
            None => self.empty_squares &= !bit,
        }
        match piece {
            Some(new_piece) => {
                self.piece_bitboards[new_piece.index()] |= bit;
                self.side_bitboards[new_piece.side.index()] |= bit;
            }
            None => self.empty_squares |= bit,
        }

        self.zobrist ^= ZOBRIST.piece(square, old) ^ ZOBRIST.piece(square, piece);
        old
    }

    /// Places a piece on a square that must currently be empty.
    pub fn setup_new_piece(&mut self, square: Square, piece: Piece) -> Result<(), ChessError> {
        if let Some(existing) = self.piece_at(square) {
            return Err(ChessError::SquareOccupied {
                square: square.to_string(),
                piece: existing.to_string(),
            });
        }
        self.set_piece(square, Some(piece));
        Ok(())
    }

    /// Same piece placement (the other game-state fields are not part of
    /// this type).
    pub fn is_same_position(&self, other: &PiecePosition) -> bool {
        self.piece_bitboards == other.piece_bitboards
    }

    /// Verifies that the mailbox, the piece bitboards, and the aggregates
    /// agree. Any failure means a bug in this type.
    pub fn validate_consistency(&self) -> Result<(), ChessError> {
        for index in 0..64u8 {
            let square = Square::from_index_unchecked(index);
            let expected = self.piece_at(square);
            for side in Side::BOTH {
                for kind in crate::piece::PieceKind::ALL {
                    let piece = Piece::new(side, kind);
                    let in_bitboard = self.piece_bitboard(piece).contains(square);
                    if in_bitboard != (expected == Some(piece)) {
                        return Err(ChessError::InconsistentPosition(format!(
                            "square {square}: mailbox {expected:?} vs {piece} bitboard"
                        )));
                    }
                }
            }
            if self.empty_squares.contains(square) != expected.is_none() {
                return Err(ChessError::InconsistentPosition(format!(
                    "square {square}: mailbox {expected:?} vs empty-square set"
                )));
            }
        }

        let mut union = self.empty_squares;
        for bitboard in self.piece_bitboards {
            if (union & bitboard).is_any() {
                return Err(ChessError::InconsistentPosition(
                    "overlapping piece bitboards".to_string(),
                ));
            }
            union |= bitboard;
        }
        if union != Bitboard::EVERYTHING {
            return Err(ChessError::InconsistentPosition(
                "piece bitboards do not cover the board".to_string(),
            ));
        }

        let white = self.side_bitboards[Side::White.index()];
        let black = self.side_bitboards[Side::Black.index()];
        if (white & black).is_any() || (white | black) != self.occupied() {
            return Err(ChessError::InconsistentPosition(
                "side bitboards disagree with occupancy".to_string(),
            ));
        }

        Ok(())
    }

    /// Parses the piece-placement field of a FEN string (ranks 8 down to 1,
    /// `/`-separated, digits for empty runs).
    pub fn try_from_fen_snippet(snippet: &str) -> Result<Self, String> {
        Self::parse_fen_snippet(snippet).map_err(|details| {
            debug!("rejected piece placement '{snippet}': {details}");
            details
        })
    }

    fn parse_fen_snippet(snippet: &str) -> Result<Self, String> {
        let mut position = PiecePosition::new();
        let mut file: u32 = 0;
        let mut rank: i32 = 7;

        for c in snippet.chars() {
            if c == '/' {
                if file != 8 {
                    return Err(format!("rank {} holds {} files, expected 8", rank + 1, file));
                }
                file = 0;
                rank -= 1;
                if rank < 0 {
                    return Err("more than 8 ranks".to_string());
                }
                continue;
            }

            if let Some(piece) = Piece::from_fen_char(c) {
                if file >= 8 {
                    return Err(format!("rank {} overflows 8 files", rank + 1));
                }
                let square = Square::make(file as u8, rank as u8);
                position
                    .setup_new_piece(square, piece)
                    .map_err(|e| e.to_string())?;
                file += 1;
            } else if let Some(count) = c.to_digit(10).filter(|&d| (1..=8).contains(&d)) {
                file += count;
                if file > 8 {
                    return Err(format!("rank {} overflows 8 files", rank + 1));
                }
            } else {
                return Err(format!("unexpected character '{c}'"));
            }
        }

        if file != 8 || rank != 0 {
            return Err("incomplete piece placement".to_string());
        }

        debug_assert!(position.validate_consistency().is_ok());
        Ok(position)
    }

    /// The piece-placement field of a FEN string.
    pub fn fen_snippet(&self) -> String {
        let mut result = String::with_capacity(71);
        for rank in (0..8u8).rev() {
            if rank != 7 {
                result.push('/');
            }
            let mut empty_run = 0u8;
            for file in 0..8u8 {
                match self.board[Square::make(file, rank).index()] {
                    Some(piece) => {
                        if empty_run > 0 {
                            result.push((b'0' + empty_run) as char);
                            empty_run = 0;
                        }
                        result.push(piece.fen_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                result.push((b'0' + empty_run) as char);
            }
        }
        result
    }
}

impl Default for PiecePosition {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PiecePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_snippet())
    }
}

impl fmt::Debug for PiecePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PiecePosition({})", self.fen_snippet())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    const INITIAL_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    fn sq(notation: &str) -> Square {
        Square::from_algebraic(notation).unwrap()
    }

    #[test]
    fn empty_position_hashes_to_zero() {
        let position = PiecePosition::new();
        assert_eq!(position.zobrist_key(), 0);
        assert_eq!(position.empty_squares(), Bitboard::EVERYTHING);
        assert!(position.validate_consistency().is_ok());
    }

    #[test]
    fn set_piece_round_trip_restores_the_hash() {
        let mut position = PiecePosition::new();
        let knight = Piece::new(Side::White, PieceKind::Knight);

        assert_eq!(position.set_piece(sq("g1"), Some(knight)), None);
        let with_knight = position.zobrist_key();
        assert_ne!(with_knight, 0);
        assert!(position.occupied().contains(sq("g1")));

        assert_eq!(position.set_piece(sq("g1"), None), Some(knight));
        assert_eq!(position.zobrist_key(), 0);
        assert!(position.validate_consistency().is_ok());
    }

    #[test]
    fn set_piece_replaces_and_reports_the_old_piece() {
        let mut position = PiecePosition::new();
        let pawn = Piece::new(Side::White, PieceKind::Pawn);
        let queen = Piece::new(Side::Black, PieceKind::Queen);

        position.set_piece(sq("d5"), Some(pawn));
        assert_eq!(position.set_piece(sq("d5"), Some(queen)), Some(pawn));
        assert_eq!(position.piece_at(sq("d5")), Some(queen));
        assert!(position.piece_bitboard(pawn).is_none());
        assert_eq!(position.side_bitboard(Side::White), Bitboard::NONE);
        assert!(position.validate_consistency().is_ok());
    }

    #[test]
    fn setup_new_piece_rejects_occupied_squares() {
        let mut position = PiecePosition::new();
        let rook = Piece::new(Side::Black, PieceKind::Rook);
        position.setup_new_piece(sq("a8"), rook).unwrap();

        let error = position
            .setup_new_piece(sq("a8"), Piece::new(Side::White, PieceKind::King))
            .unwrap_err();
        assert!(matches!(error, ChessError::SquareOccupied { .. }));
    }

    #[test]
    fn fen_snippet_round_trip() {
        let position = PiecePosition::try_from_fen_snippet(INITIAL_PLACEMENT).unwrap();
        assert_eq!(position.fen_snippet(), INITIAL_PLACEMENT);
        assert_eq!(position.occupied().count(), 32);
        assert!(position.validate_consistency().is_ok());

        let sparse = "8/8/8/3k4/8/2K5/8/8";
        let position = PiecePosition::try_from_fen_snippet(sparse).unwrap();
        assert_eq!(position.fen_snippet(), sparse);
        assert_eq!(
            position.piece_at(sq("d5")),
            Some(Piece::new(Side::Black, PieceKind::King))
        );
    }

    #[test]
    fn malformed_snippets_rejected() {
        for snippet in [
            "",
            "8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/8/8",
            "9/8/8/8/8/8/8/8",
            "ppppppppp/8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/7",
            "8/8/8/8/x7/8/8/8",
            "08/8/8/8/8/8/8/8",
        ] {
            assert!(
                PiecePosition::try_from_fen_snippet(snippet).is_err(),
                "{snippet}"
            );
        }
    }

    #[test]
    fn same_position_ignores_nothing_but_placement() {
        let a = PiecePosition::try_from_fen_snippet(INITIAL_PLACEMENT).unwrap();
        let b = PiecePosition::try_from_fen_snippet(INITIAL_PLACEMENT).unwrap();
        assert!(a.is_same_position(&b));
        assert_eq!(a.zobrist_key(), b.zobrist_key());

        let mut c = b.clone();
        c.set_piece(sq("e2"), None);
        assert!(!a.is_same_position(&c));
        assert_ne!(a.zobrist_key(), c.zobrist_key());
    }
}
