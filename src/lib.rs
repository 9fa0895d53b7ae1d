//! Bitboard-based chess position core: board geometry, attack tables,
//! piece placement with incremental Zobrist hashing, pseudo-legal move
//! generation, move application, and a FEN codec.

pub mod attack;
pub mod bitboard;
pub mod castling;
pub mod error;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod square;
pub mod tables;
pub mod zobrist;

pub use bitboard::{Bitboard, Direction};
pub use castling::{CastlingInfo, CastlingRights, CastlingSide, CastlingType};
pub use error::ChessError;
pub use game::{EnPassantCaptureInfo, GamePosition, StandardGamePosition};
pub use movegen::MoveGenerator;
pub use moves::{GameMove, MoveFlags, MoveKinds, MoveList, MoveRecord};
pub use piece::{Piece, PieceKind, Side};
pub use position::PiecePosition;
pub use square::{Square, SquareShift};
