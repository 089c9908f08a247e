//! Bitboard type and operations.

use super::square::Square;

/// A 64-bit bitboard representing piece positions or attack squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const FILE_A: Bitboard = Bitboard(0x0101010101010101);

    pub const EMPTY: Bitboard = Bitboard(0);

    /// Light squares (b1, d1, f1, h1, a2, ...)
    pub const LIGHT_SQUARES: Bitboard = Bitboard(0x55AA55AA55AA55AA);
    /// Dark squares (a1, c1, e1, g1, b2, ...)
    pub const DARK_SQUARES: Bitboard = Bitboard(0xAA55AA55AA55AA55);
}

impl Bitboard {
    /// Returns an iterator over the squares set in this bitboard
    #[inline]
    #[must_use]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }

    /// Returns true if the bitboard is empty
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of set bits (population count)
    #[inline]
    #[must_use]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the given square is set
    #[inline]
    #[must_use]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1 << (sq.0 * 8 + sq.1))) != 0
    }
}

#[inline]
pub(crate) const fn bit_for_square(sq: Square) -> u64 {
    1u64 << sq.index()
}

#[inline]
pub(crate) fn pop_lsb(bb: &mut u64) -> usize {
    let idx = bb.trailing_zeros() as usize;
    *bb &= *bb - 1;
    idx
}

/// Iterator over set bits in a Bitboard, lowest square first
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            Some(Square::from_index(pop_lsb(&mut self.0 .0)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_yields_squares_in_index_order() {
        let bb = Bitboard(bit_for_square(Square(0, 1)) | bit_for_square(Square(7, 0)));
        let squares: Vec<Square> = bb.iter().collect();
        assert_eq!(squares, vec![Square(0, 1), Square(7, 0)]);
        assert_eq!(bb.popcount(), 2);
        assert!(bb.contains(Square(7, 0)));
    }

    #[test]
    fn test_square_colors_partition_board() {
        assert_eq!(Bitboard::LIGHT_SQUARES.0 & Bitboard::DARK_SQUARES.0, 0);
        assert_eq!(Bitboard::LIGHT_SQUARES.0 | Bitboard::DARK_SQUARES.0, u64::MAX);
        assert!(Bitboard::DARK_SQUARES.contains(Square(0, 0)));
    }
}
