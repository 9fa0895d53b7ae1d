use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::castling::CastlingRights;
use crate::piece::{Piece, Side};
use crate::square::{Square, FILE_COUNT, SQUARE_COUNT};

const SEED: u64 = 0x7ABD_3E1F_94C0_55A6;

/// Deterministic Zobrist hash constants. Empty squares contribute 0, so the
/// empty board hashes to 0 and piece placement is maintained by XOR alone.
pub struct ZobristTable {
    piece_square: [[u64; SQUARE_COUNT]; 12],
    castling: [u64; 16],
    en_passant_file: [u64; FILE_COUNT as usize],
    black_to_move: u64,
}

impl ZobristTable {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(SEED);

        let mut piece_square = [[0u64; SQUARE_COUNT]; 12];
        for square_keys in piece_square.iter_mut() {
            for key in square_keys.iter_mut() {
                *key = rng.next_u64();
            }
        }

        let mut castling = [0u64; 16];
        for key in castling.iter_mut() {
            *key = rng.next_u64();
        }

        let mut en_passant_file = [0u64; FILE_COUNT as usize];
        for key in en_passant_file.iter_mut() {
            *key = rng.next_u64();
        }

        ZobristTable {
            piece_square,
            castling,
            en_passant_file,
            black_to_move: rng.next_u64(),
        }
    }

    #[inline]
    pub fn piece(&self, square: Square, piece: Option<Piece>) -> u64 {
        match piece {
            Some(piece) => self.piece_square[piece.index()][square.index()],
            None => 0,
        }
    }

    #[inline]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling[rights.bits() as usize]
    }

    #[inline]
    pub fn en_passant(&self, capture_square: Option<Square>) -> u64 {
        match capture_square {
            Some(square) => self.en_passant_file[square.file() as usize],
            None => 0,
        }
    }

    #[inline]
    pub fn turn(&self, side: Side) -> u64 {
        match side {
            Side::White => 0,
            Side::Black => self.black_to_move,
        }
    }
}

pub static ZOBRIST: Lazy<ZobristTable> = Lazy::new(ZobristTable::new);
