use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

use crate::error::ChessError;
use crate::piece::{PieceKind, VALID_PROMOTIONS};
use crate::square::Square;

static LONG_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-h][1-8])(?:-|x)([a-h][1-8])(?:=([qrbn]))?$")
        .expect("valid move notation pattern")
});

static UCI_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-h][1-8])([a-h][1-8])([qrbn])?$").expect("valid move notation pattern")
});

/// A move given by its endpoints plus an optional promotion result. Two
/// moves are equal exactly when all three parts are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GameMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl GameMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        GameMove {
            from,
            to,
            promotion: None,
        }
    }

    /// Copies the move with the given promotion result; only queen, rook,
    /// bishop and knight are accepted.
    pub fn make_promotion(self, kind: PieceKind) -> Result<GameMove, ChessError> {
        if !kind.is_valid_promotion() {
            return Err(ChessError::InvalidPromotion(format!("{kind:?}")));
        }
        Ok(GameMove {
            promotion: Some(kind),
            ..self
        })
    }

    /// The four promotion variants of this move, in queen-first order.
    pub fn all_promotions(self) -> [GameMove; 4] {
        VALID_PROMOTIONS.map(|kind| GameMove {
            promotion: Some(kind),
            ..self
        })
    }

    /// Parses either the long form (`e2-e4`, `e7xd8=Q`) or the UCI form
    /// (`e2e4`, `e7d8q`), in either letter case.
    pub fn from_notation(notation: &str) -> Result<GameMove, ChessError> {
        for pattern in [&LONG_FORM, &UCI_FORM] {
            let Some(captures) = pattern.captures(notation) else {
                continue;
            };

            let from = Square::from_algebraic(&captures[1])?;
            let to = Square::from_algebraic(&captures[2])?;
            let promotion = match captures.get(3) {
                Some(group) => {
                    let c = group
                        .as_str()
                        .chars()
                        .next()
                        .map(|c| c.to_ascii_uppercase());
                    c.and_then(PieceKind::from_fen_char)
                }
                None => None,
            };

            return Ok(GameMove {
                from,
                to,
                promotion,
            });
        }

        Err(ChessError::InvalidMoveNotation(notation.to_string()))
    }
}

impl fmt::Display for GameMove {
    /// Always the UCI form, promotion letter lowercase.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Properties attached to a generated move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);
    pub const PAWN_PROMOTION: MoveFlags = MoveFlags(1 << 0);
    pub const REGULAR_CAPTURE: MoveFlags = MoveFlags(1 << 1);
    pub const EN_PASSANT_CAPTURE: MoveFlags = MoveFlags(1 << 2);
    pub const KING_CASTLING: MoveFlags = MoveFlags(1 << 3);

    #[inline]
    pub const fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_any_capture(self) -> bool {
        self.0 & (Self::REGULAR_CAPTURE.0 | Self::EN_PASSANT_CAPTURE.0) != 0
    }
}

impl BitOr for MoveFlags {
    type Output = MoveFlags;

    #[inline]
    fn bitor(self, rhs: MoveFlags) -> MoveFlags {
        MoveFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for MoveFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: MoveFlags) {
        self.0 |= rhs.0;
    }
}

/// Filter for move generation: which categories of moves to produce.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveKinds(u8);

impl MoveKinds {
    pub const QUIET: MoveKinds = MoveKinds(1 << 0);
    pub const CAPTURE: MoveKinds = MoveKinds(1 << 1);
    pub const ALL: MoveKinds = MoveKinds(Self::QUIET.0 | Self::CAPTURE.0);

    #[inline]
    pub const fn includes(self, other: MoveKinds) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for MoveKinds {
    type Output = MoveKinds;

    #[inline]
    fn bitor(self, rhs: MoveKinds) -> MoveKinds {
        MoveKinds(self.0 | rhs.0)
    }
}

/// A generated move together with its flags.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveRecord {
    pub mv: GameMove,
    pub flags: MoveFlags,
}

impl MoveRecord {
    #[inline]
    pub const fn new(mv: GameMove, flags: MoveFlags) -> Self {
        MoveRecord { mv, flags }
    }
}

pub type MoveList = SmallVec<[MoveRecord; 64]>;
