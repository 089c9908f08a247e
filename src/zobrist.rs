//! Zobrist hashing for chess positions.
//!
//! The hash covers placement, side to move, castling rights and the
//! en-passant file, which is exactly the identity used for repetition
//! detection.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Color, Piece, Square};

const SEED: u64 = 1234567890;

pub(crate) struct ZobristKeys {
    // piece_keys[color][piece][square]
    piece_keys: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    // One key per 4-bit rights mask so a rights change is a single xor pair
    castling_keys: [u64; 16],
    en_passant_files: [u64; 8],
}

impl ZobristKeys {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(SEED);
        let mut piece_keys = [[[0u64; 64]; 6]; 2];
        for key in piece_keys.iter_mut().flatten().flatten() {
            *key = rng.gen();
        }
        let black_to_move = rng.gen();
        let mut castling_keys = [0u64; 16];
        // The empty mask hashes to zero so a position without rights needs no key
        for key in castling_keys.iter_mut().skip(1) {
            *key = rng.gen();
        }
        let mut en_passant_files = [0u64; 8];
        for key in &mut en_passant_files {
            *key = rng.gen();
        }
        ZobristKeys {
            piece_keys,
            black_to_move,
            castling_keys,
            en_passant_files,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[color.index()][piece.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn side(&self) -> u64 {
        self.black_to_move
    }

    #[inline]
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling_keys[rights.as_u8() as usize]
    }

    #[inline]
    pub(crate) fn en_passant(&self, target: Option<Square>) -> u64 {
        target.map_or(0, |sq| self.en_passant_files[sq.file()])
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let mut seen = HashSet::new();
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for idx in 0..64 {
                    assert!(seen.insert(ZOBRIST.piece(color, piece, Square::from_index(idx))));
                }
            }
        }
        assert!(seen.insert(ZOBRIST.side()));
        assert_eq!(ZOBRIST.castling(CastlingRights::none()), 0);
        assert_ne!(ZOBRIST.castling(CastlingRights::all()), 0);
        assert_eq!(ZOBRIST.en_passant(None), 0);
    }

    #[test]
    fn test_keys_are_reproducible() {
        let again = ZobristKeys::generate();
        assert_eq!(again.side(), ZOBRIST.side());
        assert_eq!(
            again.piece(Color::Black, Piece::Queen, Square(7, 3)),
            ZOBRIST.piece(Color::Black, Piece::Queen, Square(7, 3))
        );
    }
}
