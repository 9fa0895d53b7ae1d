//! Forsyth-Edwards notation for complete game states.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::castling::CastlingRights;
use crate::error::ChessError;
use crate::game::{EnPassantCaptureInfo, GamePosition, StandardGamePosition};
use crate::piece::Side;
use crate::position::PiecePosition;
use crate::square::Square;

pub const DEFAULT_INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const FIELD_COUNT: usize = 6;

static VALID_FEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^ \s*
        [1-8KkQqRrBbNnPp]{1,8} (?: / [1-8KkQqRrBbNnPp]{1,8} ){7}
        \s+ (?: w | b )
        \s+ (?: [KkQq]+ | - )
        \s+ (?: [a-h][1-8] | - )
        \s+ \d+
        \s+ \d+
        \s* $",
    )
    .expect("valid FEN pattern")
});

/// Structural pre-check only; a passing string can still fail semantic
/// validation in [`try_parse`].
pub fn is_valid_format(fen: &str) -> bool {
    VALID_FEN.is_match(fen)
}

/// Parses a 6-field FEN string, reporting failures as a plain diagnostic.
pub fn try_parse(fen: &str) -> Result<StandardGamePosition, String> {
    if fen.trim().is_empty() {
        return Err("the FEN cannot be empty".to_string());
    }
    if !is_valid_format(fen) {
        return Err("malformed FEN structure".to_string());
    }

    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != FIELD_COUNT {
        return Err(format!("expected {FIELD_COUNT} fields, got {}", fields.len()));
    }

    let pieces = PiecePosition::try_from_fen_snippet(fields[0])
        .map_err(|details| format!("invalid position of pieces: {details}"))?;

    let active_side = match fields[1] {
        "w" => Side::White,
        "b" => Side::Black,
        other => return Err(format!("invalid active side '{other}'")),
    };

    let castling_rights = CastlingRights::from_fen(fields[2])
        .ok_or_else(|| format!("invalid castling availability '{}'", fields[2]))?;

    let en_passant = if fields[3] == "-" {
        None
    } else {
        let capture_square = Square::from_algebraic(fields[3])
            .map_err(|_| format!("invalid en-passant square '{}'", fields[3]))?;
        let push = Side::BOTH
            .into_iter()
            .map(Side::double_push_info)
            .find(|info| info.capture_target_rank == capture_square.rank())
            .ok_or_else(|| format!("invalid en-passant rank '{}'", fields[3]))?;
        Some(EnPassantCaptureInfo {
            capture_square,
            target_piece_square: Square::make(capture_square.file(), push.end_rank),
        })
    };

    let halfmove_clock: u32 = fields[4]
        .parse()
        .map_err(|_| format!("invalid half-move clock '{}'", fields[4]))?;

    let full_move_index: u32 = fields[5]
        .parse()
        .ok()
        .filter(|&index| index > 0)
        .ok_or_else(|| format!("invalid full-move index '{}'", fields[5]))?;

    Ok(StandardGamePosition::from_parts(
        pieces,
        active_side,
        castling_rights,
        en_passant,
        halfmove_clock,
        full_move_index,
    ))
}

/// Parses a FEN string, wrapping failures into [`ChessError::InvalidFen`].
pub fn parse(fen: &str) -> Result<StandardGamePosition, ChessError> {
    try_parse(fen).map_err(|details| {
        debug!("rejected FEN '{fen}': {details}");
        ChessError::InvalidFen(format!("'{fen}': {details}"))
    })
}

/// Serializes all six FEN fields.
pub fn format(position: &StandardGamePosition) -> String {
    let en_passant = match position.en_passant() {
        Some(info) => info.capture_square.to_string(),
        None => "-".to_string(),
    };
    std::format!(
        "{} {} {} {} {} {}",
        position.piece_position().fen_snippet(),
        position.active_side().fen_char(),
        position.castling_rights(),
        en_passant,
        position.halfmove_clock(),
        position.full_move_index(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_fen_round_trips_exactly() {
        let position = parse(DEFAULT_INITIAL_FEN).unwrap();
        assert_eq!(format(&position), DEFAULT_INITIAL_FEN);
        assert_eq!(position.active_side(), Side::White);
        assert_eq!(position.castling_rights(), CastlingRights::ALL);
        assert_eq!(position.en_passant(), None);
        assert_eq!(position.halfmove_clock(), 0);
        assert_eq!(position.full_move_index(), 1);
    }

    #[test]
    fn en_passant_field_builds_the_capture_info() {
        let position =
            parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        let info = position.en_passant().unwrap();
        assert_eq!(info.capture_square.to_string(), "e3");
        assert_eq!(info.target_piece_square.to_string(), "e4");
        assert_eq!(format(&position).split(' ').nth(3), Some("e3"));

        let position = parse("4k3/8/8/4pP2/8/8/8/4K3 w - e6 0 10").unwrap();
        let info = position.en_passant().unwrap();
        assert_eq!(info.capture_square.to_string(), "e6");
        assert_eq!(info.target_piece_square.to_string(), "e5");
    }

    #[test]
    fn en_passant_rank_must_match_a_double_push() {
        for fen in [
            "4k3/8/8/8/8/8/8/4K3 w - e4 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - e5 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - e1 0 1",
        ] {
            assert!(parse(fen).is_err(), "{fen}");
        }
    }

    #[test]
    fn structural_rejections() {
        for fen in [
            "",
            "   ",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR w KQkq - 0 1",
        ] {
            assert!(!is_valid_format(fen), "{fen}");
            assert!(matches!(parse(fen), Err(ChessError::InvalidFen(_))), "{fen}");
        }
    }

    #[test]
    fn semantic_rejections_pass_the_regex() {
        // Eight files per rank and a positive move index are semantic rules.
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPP2P/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/45/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0",
        ] {
            assert!(parse(fen).is_err(), "{fen}");
        }
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let position = parse("  4k3/8/8/8/8/8/8/4K3 w - - 0 1  ").unwrap();
        assert_eq!(format(&position), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }
}
