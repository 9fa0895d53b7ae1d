use std::fmt;

use log::trace;

use crate::attack;
use crate::bitboard::Bitboard;
use crate::castling::{CastlingInfo, CastlingRights, CASTLING_CATALOG};
use crate::error::ChessError;
use crate::fen;
use crate::moves::{GameMove, MoveFlags, MoveKinds, MoveList};
use crate::movegen::MoveGenerator;
use crate::piece::{Piece, PieceKind, Side};
use crate::position::PiecePosition;
use crate::square::Square;
use crate::zobrist::ZOBRIST;

/// An available en-passant capture: the square the capturing pawn moves to
/// and the square of the pawn being captured.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EnPassantCaptureInfo {
    pub capture_square: Square,
    pub target_piece_square: Square,
}

/// Read access to a game state plus move application. Attack queries are
/// provided against the underlying piece placement.
pub trait GamePosition: Clone {
    fn piece_position(&self) -> &PiecePosition;

    fn active_side(&self) -> Side;

    /// One-based full move counter.
    fn full_move_index(&self) -> u32;

    /// Hash over placement, castling rights, en-passant file, and turn.
    fn position_hash(&self) -> u64;

    fn make_move(&self, mv: &GameMove) -> Result<Self, ChessError>;

    fn attackers(&self, target: Square, attacking_side: Side) -> Bitboard {
        attack::get_attackers(self.piece_position(), target, attacking_side)
    }

    fn is_under_attack(&self, target: Square, attacking_side: Side) -> bool {
        attack::is_under_attack(self.piece_position(), target, attacking_side)
    }
}

/// A standard-chess game state: placement plus castling rights, en-passant
/// availability, the half-move clock, and the full move counter. Values are
/// immutable; `make_move` returns the successor.
#[derive(Clone)]
pub struct StandardGamePosition {
    pieces: PiecePosition,
    active_side: Side,
    castling_rights: CastlingRights,
    en_passant: Option<EnPassantCaptureInfo>,
    halfmove_clock: u32,
    full_move_index: u32,
    zobrist: u64,
}

impl StandardGamePosition {
    pub(crate) fn from_parts(
        pieces: PiecePosition,
        active_side: Side,
        castling_rights: CastlingRights,
        en_passant: Option<EnPassantCaptureInfo>,
        halfmove_clock: u32,
        full_move_index: u32,
    ) -> Self {
        debug_assert!(full_move_index > 0);

        let zobrist = pieces.zobrist_key()
            ^ ZOBRIST.castling(castling_rights)
            ^ ZOBRIST.en_passant(en_passant.map(|info| info.capture_square))
            ^ ZOBRIST.turn(active_side);

        StandardGamePosition {
            pieces,
            active_side,
            castling_rights,
            en_passant,
            halfmove_clock,
            full_move_index,
            zobrist,
        }
    }

    /// The standard starting position.
    pub fn initial() -> Self {
        fen::parse(fen::DEFAULT_INITIAL_FEN).expect("the default initial FEN is valid")
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        fen::parse(fen)
    }

    pub fn to_fen(&self) -> String {
        fen::format(self)
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant(&self) -> Option<EnPassantCaptureInfo> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Pseudo-legal moves of the active side: castling is filtered for
    /// structure only and king safety is not examined.
    pub fn pseudo_legal_moves(&self, kinds: MoveKinds, target: Bitboard) -> MoveList {
        let en_passant_target = self
            .en_passant
            .map(|info| info.capture_square.bitboard())
            .unwrap_or(Bitboard::NONE);

        let mut result = MoveList::new();
        MoveGenerator::new(&self.pieces).all_moves(
            self.active_side,
            kinds,
            target,
            en_passant_target,
            self.castling_rights,
            &mut result,
        );
        result
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        let king = self.pieces.piece_bitboard(Piece::new(side, PieceKind::King));
        match king.first_square() {
            Some(square) => attack::is_under_attack(&self.pieces, square, side.opposite()),
            None => false,
        }
    }

    /// Same game state for repetition purposes: placement, rights, side to
    /// move, and en-passant availability.
    pub fn is_same_position(&self, other: &StandardGamePosition) -> bool {
        self.zobrist == other.zobrist
            && self.castling_rights == other.castling_rights
            && self.active_side == other.active_side
            && self.en_passant == other.en_passant
            && self.pieces.is_same_position(&other.pieces)
    }

    fn illegal(mv: &GameMove) -> ChessError {
        ChessError::IllegalMove(mv.to_string())
    }
}

impl GamePosition for StandardGamePosition {
    fn piece_position(&self) -> &PiecePosition {
        &self.pieces
    }

    fn active_side(&self) -> Side {
        self.active_side
    }

    fn full_move_index(&self) -> u32 {
        self.full_move_index
    }

    fn position_hash(&self) -> u64 {
        self.zobrist
    }

    /// Applies a move and returns the successor position. The move must be
    /// pseudo-legal for the active side, must not leave the mover's king
    /// attacked, and castling must not pass through or out of check.
    fn make_move(&self, mv: &GameMove) -> Result<Self, ChessError> {
        let side = self.active_side;
        let record = self
            .pseudo_legal_moves(MoveKinds::ALL, Bitboard::EVERYTHING)
            .iter()
            .find(|record| record.mv == *mv)
            .copied()
            .ok_or_else(|| Self::illegal(mv))?;

        if record.flags.contains(MoveFlags::KING_CASTLING) {
            let info = CastlingInfo::for_king_move(mv).ok_or_else(|| Self::illegal(mv))?;
            if self.is_under_attack(mv.from, side.opposite())
                || self.is_under_attack(info.passed_square, side.opposite())
            {
                return Err(Self::illegal(mv));
            }
        }

        let mut pieces = self.pieces.clone();
        let moving = pieces.piece_at(mv.from).ok_or_else(|| Self::illegal(mv))?;

        let placed = match mv.promotion {
            Some(kind) => Piece::new(side, kind),
            None => moving,
        };
        pieces.set_piece(mv.from, None);
        let mut captured = pieces.set_piece(mv.to, Some(placed));

        if record.flags.contains(MoveFlags::EN_PASSANT_CAPTURE) {
            if let Some(info) = self.en_passant {
                captured = pieces.set_piece(info.target_piece_square, None);
            }
        }

        if record.flags.contains(MoveFlags::KING_CASTLING) {
            if let Some(info) = CastlingInfo::for_king_move(mv) {
                pieces.set_piece(info.rook_move.from, None);
                pieces.set_piece(info.rook_move.to, Some(Piece::new(side, PieceKind::Rook)));
            }
        }

        let king = pieces.piece_bitboard(Piece::new(side, PieceKind::King));
        if let Some(king_square) = king.first_square() {
            if attack::is_under_attack(&pieces, king_square, side.opposite()) {
                return Err(Self::illegal(mv));
            }
        }

        let mut castling_rights = self.castling_rights;
        if moving.kind == PieceKind::King {
            castling_rights.remove(CastlingRights::for_side(side));
        }
        if moving.kind == PieceKind::Rook {
            for info in &CASTLING_CATALOG {
                if info.side() == side && info.rook_move.from == mv.from {
                    castling_rights.remove(info.right());
                }
            }
        }
        if let Some(captured_piece) = captured {
            if captured_piece.kind == PieceKind::Rook {
                for info in &CASTLING_CATALOG {
                    if info.side() == captured_piece.side && info.rook_move.from == mv.to {
                        castling_rights.remove(info.right());
                    }
                }
            }
        }

        let en_passant = if moving.kind == PieceKind::Pawn {
            let push = side.double_push_info();
            let is_double_push = mv.from.file() == mv.to.file()
                && mv.from.rank() == push.start_rank
                && mv.to.rank() == push.end_rank;
            is_double_push.then(|| EnPassantCaptureInfo {
                capture_square: Square::make(mv.to.file(), push.capture_target_rank),
                target_piece_square: mv.to,
            })
        } else {
            None
        };

        let halfmove_clock = if moving.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };
        let full_move_index = match side {
            Side::White => self.full_move_index,
            Side::Black => self.full_move_index + 1,
        };

        trace!("{side:?} played {mv}");
        Ok(Self::from_parts(
            pieces,
            side.opposite(),
            castling_rights,
            en_passant,
            halfmove_clock,
            full_move_index,
        ))
    }
}

impl fmt::Display for StandardGamePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for StandardGamePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StandardGamePosition({})", self.to_fen())
    }
}
