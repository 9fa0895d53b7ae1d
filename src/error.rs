use thiserror::Error;

/// Errors produced by the position core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("square index out of range: {0}")]
    InvalidSquareIndex(i32),

    #[error("file/rank out of range: file {file}, rank {rank}")]
    InvalidFileRank { file: i32, rank: i32 },

    #[error("invalid algebraic square notation: '{0}'")]
    InvalidSquare(String),

    #[error("invalid FEN {0}")]
    InvalidFen(String),

    #[error("invalid string notation of a move: '{0}'")]
    InvalidMoveNotation(String),

    #[error("must be a valid promotion piece: {0}")]
    InvalidPromotion(String),

    #[error("square {square} is already occupied by {piece}")]
    SquareOccupied { square: String, piece: String },

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("inconsistent position data: {0}")]
    InconsistentPosition(String),
}
