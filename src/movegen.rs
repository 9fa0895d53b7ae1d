//! Pseudo-legal move generation. Moves are generated against the piece
//! placement alone; king safety is the caller's concern.

use crate::bitboard::{Bitboard, Direction, RANK_1, RANK_3, RANK_6, RANK_8};
use crate::castling::{CastlingRights, CASTLING_CATALOG};
use crate::moves::{GameMove, MoveFlags, MoveKinds, MoveList, MoveRecord};
use crate::piece::{Piece, PieceKind, Side};
use crate::position::PiecePosition;
use crate::square::Square;
use crate::tables::{KING_ATTACKS, KNIGHT_ATTACKS};

/// Generates pseudo-legal moves for a borrowed piece placement, appending
/// to a caller-owned list. Each generator takes the side to move, a
/// [`MoveKinds`] filter, and a destination mask.
pub struct MoveGenerator<'a> {
    position: &'a PiecePosition,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(position: &'a PiecePosition) -> Self {
        MoveGenerator { position }
    }

    /// All piece types at once. `en_passant_target` is the capture square
    /// of an available en-passant, or the empty set.
    pub fn all_moves(
        &self,
        side: Side,
        kinds: MoveKinds,
        target: Bitboard,
        en_passant_target: Bitboard,
        allowed_castling: CastlingRights,
        out: &mut MoveList,
    ) {
        self.pawn_moves(side, kinds, target, en_passant_target, out);
        self.knight_moves(side, kinds, target, out);
        self.bishop_moves(side, kinds, target, out);
        self.rook_moves(side, kinds, target, out);
        self.queen_moves(side, kinds, target, out);
        self.king_moves(side, kinds, target, allowed_castling, out);
    }

    /// Pawn moves in batches: the whole pawn set is shifted at once and
    /// each destination's origin is recovered from the shift offset.
    pub fn pawn_moves(
        &self,
        side: Side,
        kinds: MoveKinds,
        target: Bitboard,
        en_passant_target: Bitboard,
        out: &mut MoveList,
    ) {
        let pawns = self.position.piece_bitboard(Piece::new(side, PieceKind::Pawn));
        if pawns.is_none() {
            return;
        }

        let promotion_rank = match side {
            Side::White => RANK_8,
            Side::Black => RANK_1,
        };
        let forward = side.pawn_direction();

        if kinds.includes(MoveKinds::QUIET) {
            let empty = self.position.empty_squares();
            let pushes = pawns.shift(forward) & empty;
            let targeted = pushes & target;
            if targeted.is_any() {
                push_pawn_destinations(
                    out,
                    targeted & !promotion_rank,
                    forward.offset(),
                    MoveFlags::NONE,
                );
                push_pawn_destinations(
                    out,
                    targeted & promotion_rank,
                    forward.offset(),
                    MoveFlags::PAWN_PROMOTION,
                );
            }
            if pushes.is_any() {
                // Only pushes that landed on the third rank (from the
                // mover's point of view) may push again.
                let double_push_rank = match side {
                    Side::White => RANK_3,
                    Side::Black => RANK_6,
                };
                let double_pushes = (pushes & double_push_rank).shift(forward) & empty & target;
                push_pawn_destinations(out, double_pushes, forward.offset() * 2, MoveFlags::NONE);
            }
        }

        if kinds.includes(MoveKinds::CAPTURE) {
            let enemies = self.position.side_bitboard(side.opposite());
            let enemy_targets = enemies & target;
            let capture_directions = match side {
                Side::White => [Direction::NorthWest, Direction::NorthEast],
                Side::Black => [Direction::SouthWest, Direction::SouthEast],
            };
            for direction in capture_directions {
                let reach = pawns.shift(direction);
                push_pawn_destinations(
                    out,
                    reach & en_passant_target,
                    direction.offset(),
                    MoveFlags::EN_PASSANT_CAPTURE,
                );
                let captures = reach & enemy_targets;
                if captures.is_none() {
                    continue;
                }
                push_pawn_destinations(
                    out,
                    captures & !promotion_rank,
                    direction.offset(),
                    MoveFlags::REGULAR_CAPTURE,
                );
                push_pawn_destinations(
                    out,
                    captures & promotion_rank,
                    direction.offset(),
                    MoveFlags::REGULAR_CAPTURE | MoveFlags::PAWN_PROMOTION,
                );
            }
        }
    }

    pub fn knight_moves(&self, side: Side, kinds: MoveKinds, target: Bitboard, out: &mut MoveList) {
        self.leaper_moves(side, kinds, target, PieceKind::Knight, &KNIGHT_ATTACKS, out);
    }

    /// King steps plus castling. Castling checks are structural only: the
    /// right is held, the king stands on the castling source square, the
    /// between-squares are empty, and the destination is in the target
    /// mask. Attack safety is not examined here.
    pub fn king_moves(
        &self,
        side: Side,
        kinds: MoveKinds,
        target: Bitboard,
        allowed_castling: CastlingRights,
        out: &mut MoveList,
    ) {
        self.leaper_moves(side, kinds, target, PieceKind::King, &KING_ATTACKS, out);

        if !kinds.includes(MoveKinds::QUIET) {
            return;
        }

        let occupied = self.position.occupied();
        let kings = self.position.piece_bitboard(Piece::new(side, PieceKind::King));
        for info in &CASTLING_CATALOG {
            if info.side() != side || !allowed_castling.contains(info.right()) {
                continue;
            }
            // A stale right means nothing unless the king still stands on
            // the castling source square.
            if !kings.contains(info.king_move.from) {
                continue;
            }
            if !target.contains(info.king_move.to) {
                continue;
            }
            let required_empty = info.empty_squares | info.passed_square.bitboard();
            if (required_empty & occupied).is_any() {
                continue;
            }
            out.push(MoveRecord::new(info.king_move, MoveFlags::KING_CASTLING));
        }
    }

    pub fn bishop_moves(&self, side: Side, kinds: MoveKinds, target: Bitboard, out: &mut MoveList) {
        self.sliding_moves(side, kinds, target, PieceKind::Bishop, &Direction::DIAGONAL, out);
    }

    pub fn rook_moves(&self, side: Side, kinds: MoveKinds, target: Bitboard, out: &mut MoveList) {
        self.sliding_moves(side, kinds, target, PieceKind::Rook, &Direction::STRAIGHT, out);
    }

    pub fn queen_moves(&self, side: Side, kinds: MoveKinds, target: Bitboard, out: &mut MoveList) {
        self.sliding_moves(side, kinds, target, PieceKind::Queen, &Direction::ALL, out);
    }

    fn leaper_moves(
        &self,
        side: Side,
        kinds: MoveKinds,
        target: Bitboard,
        kind: PieceKind,
        reach: &[Bitboard; 64],
        out: &mut MoveList,
    ) {
        let mut pieces = self.position.piece_bitboard(Piece::new(side, kind));
        if pieces.is_none() {
            return;
        }

        let empty = self.position.empty_squares();
        let enemies = self.position.side_bitboard(side.opposite());

        while let Some(from) = pieces.pop_first_square() {
            let moves = reach[from.index()] & target;
            if moves.is_none() {
                continue;
            }
            if kinds.includes(MoveKinds::CAPTURE) {
                for to in (moves & enemies).squares() {
                    out.push(MoveRecord::new(
                        GameMove::new(from, to),
                        MoveFlags::REGULAR_CAPTURE,
                    ));
                }
            }
            if kinds.includes(MoveKinds::QUIET) {
                for to in (moves & empty).squares() {
                    out.push(MoveRecord::new(GameMove::new(from, to), MoveFlags::NONE));
                }
            }
        }
    }

    /// Walks each ray one step at a time: empty squares yield quiet moves,
    /// the first enemy yields a capture, anything else stops the ray.
    fn sliding_moves(
        &self,
        side: Side,
        kinds: MoveKinds,
        target: Bitboard,
        kind: PieceKind,
        directions: &[Direction],
        out: &mut MoveList,
    ) {
        let mut pieces = self.position.piece_bitboard(Piece::new(side, kind));
        if pieces.is_none() {
            return;
        }

        let empty = self.position.empty_squares();
        let enemies = self.position.side_bitboard(side.opposite());

        while let Some(from) = pieces.pop_first_square() {
            for &direction in directions {
                let mut current = from.bitboard().shift(direction);
                while current.is_any() {
                    if (current & empty).is_any() {
                        if kinds.includes(MoveKinds::QUIET) && (current & target).is_any() {
                            if let Some(to) = current.first_square() {
                                out.push(MoveRecord::new(GameMove::new(from, to), MoveFlags::NONE));
                            }
                        }
                        current = current.shift(direction);
                        continue;
                    }
                    if (current & enemies).is_any()
                        && kinds.includes(MoveKinds::CAPTURE)
                        && (current & target).is_any()
                    {
                        if let Some(to) = current.first_square() {
                            out.push(MoveRecord::new(
                                GameMove::new(from, to),
                                MoveFlags::REGULAR_CAPTURE,
                            ));
                        }
                    }
                    break;
                }
            }
        }
    }
}

fn push_pawn_destinations(out: &mut MoveList, mut destinations: Bitboard, offset: i8, flags: MoveFlags) {
    let promote = flags.contains(MoveFlags::PAWN_PROMOTION);
    while let Some(to) = destinations.pop_first_square() {
        let from = Square::from_index_unchecked((to.index() as i8 - offset) as u8);
        let mv = GameMove::new(from, to);
        if promote {
            for promotion in mv.all_promotions() {
                out.push(MoveRecord::new(promotion, flags));
            }
        } else {
            out.push(MoveRecord::new(mv, flags));
        }
    }
}
