//! Attacker detection against a single square.

use crate::bitboard::{Bitboard, Direction};
use crate::piece::{Piece, PieceKind, Side};
use crate::position::PiecePosition;
use crate::square::Square;
use crate::tables::{self, DIAGONAL_ATTACKS, KING_ATTACKS, KNIGHT_ATTACKS, STRAIGHT_ATTACKS};

/// All pieces of `attacking_side` that attack `target`.
pub fn get_attackers(position: &PiecePosition, target: Square, attacking_side: Side) -> Bitboard {
    attackers_internal(position, target, attacking_side, false)
}

/// The first attacker found in category order, if any.
pub fn first_attacker(
    position: &PiecePosition,
    target: Square,
    attacking_side: Side,
) -> Option<Square> {
    attackers_internal(position, target, attacking_side, true).first_square()
}

/// Whether any piece of `attacking_side` attacks `target`. Stops at the
/// first attacker found.
pub fn is_under_attack(position: &PiecePosition, target: Square, attacking_side: Side) -> bool {
    attackers_internal(position, target, attacking_side, true).is_any()
}

/// Probes the piece categories in a fixed order: pawns, knights, kings,
/// straight sliders, diagonal sliders. With `first_only` the scan stops as
/// soon as the result is non-empty.
fn attackers_internal(
    position: &PiecePosition,
    target: Square,
    attacking_side: Side,
    first_only: bool,
) -> Bitboard {
    let mut result = Bitboard::NONE;
    let target_bitboard = target.bitboard();

    let pawns = position.piece_bitboard(Piece::new(attacking_side, PieceKind::Pawn));
    if pawns.is_any() {
        // A pawn attacks the target iff the target, shifted back toward the
        // pawns, lands on one.
        let (left, right) = match attacking_side {
            Side::White => (Direction::SouthEast, Direction::SouthWest),
            Side::Black => (Direction::NorthWest, Direction::NorthEast),
        };
        result |= (target_bitboard.shift(left) | target_bitboard.shift(right)) & pawns;
        if first_only && result.is_any() {
            return result;
        }
    }

    let knights = position.piece_bitboard(Piece::new(attacking_side, PieceKind::Knight));
    result |= KNIGHT_ATTACKS[target.index()] & knights;
    if first_only && result.is_any() {
        return result;
    }

    let kings = position.piece_bitboard(Piece::new(attacking_side, PieceKind::King));
    result |= KING_ATTACKS[target.index()] & kings;
    if first_only && result.is_any() {
        return result;
    }

    let empty = position.empty_squares();
    let queens = position.piece_bitboard(Piece::new(attacking_side, PieceKind::Queen));

    let rooks = position.piece_bitboard(Piece::new(attacking_side, PieceKind::Rook));
    result |= sliding_attackers(target, queens | rooks, &STRAIGHT_ATTACKS, empty, first_only);
    if first_only && result.is_any() {
        return result;
    }

    let bishops = position.piece_bitboard(Piece::new(attacking_side, PieceKind::Bishop));
    result |= sliding_attackers(target, queens | bishops, &DIAGONAL_ATTACKS, empty, first_only);

    result
}

/// Candidates on the target's reach lines whose connection to the target is
/// fully empty. The all-ones connection of non-collinear pairs can never be
/// a subset of the empty set here, so such candidates drop out.
fn sliding_attackers(
    target: Square,
    candidates: Bitboard,
    reach: &[Bitboard; 64],
    empty: Bitboard,
    first_only: bool,
) -> Bitboard {
    let mut result = Bitboard::NONE;
    let mut current = reach[target.index()] & candidates;
    while let Some(attacker) = current.pop_first_square() {
        let connection = tables::connection(target, attacker);
        if (empty & connection) != connection {
            continue;
        }
        result |= attacker.bitboard();
        if first_only {
            break;
        }
    }
    result
}
