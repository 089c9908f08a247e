//! Attack tables for move generation.
//!
//! Leapers come from fixed per-square tables. Sliders walk precomputed rays:
//! the first blocker on a ray is found with a bit scan, and everything past it
//! is masked off using that blocker's own ray in the same direction.

mod tables;

pub(crate) use tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};

use once_cell::sync::Lazy;

/// Ray directions as (rank delta, file delta). The first four increase the
/// square index, the last four decrease it.
const DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (0, 1),
    (1, 1),
    (1, -1),
    (-1, 0),
    (0, -1),
    (-1, -1),
    (-1, 1),
];

const NORTH: usize = 0;
const EAST: usize = 1;
const NORTH_EAST: usize = 2;
const NORTH_WEST: usize = 3;
const SOUTH: usize = 4;
const WEST: usize = 5;
const SOUTH_WEST: usize = 6;
const SOUTH_EAST: usize = 7;

/// `RAYS[dir][sq]`: every square strictly beyond `sq` in direction `dir`.
static RAYS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    for (dir, &(dr, df)) in DIRECTIONS.iter().enumerate() {
        for sq in 0..64 {
            let mut r = (sq / 8) as isize + dr;
            let mut f = (sq % 8) as isize + df;
            let mut mask = 0u64;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                mask |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
            rays[dir][sq] = mask;
        }
    }
    rays
});

#[inline]
fn ray_attacks(dir: usize, square: usize, occupancy: u64) -> u64 {
    let ray = RAYS[dir][square];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }
    let first = if dir < SOUTH {
        blockers.trailing_zeros() as usize
    } else {
        63 - blockers.leading_zeros() as usize
    };
    ray ^ RAYS[dir][first]
}

#[inline]
pub(crate) fn bishop_attacks(square: usize, occupancy: u64) -> u64 {
    ray_attacks(NORTH_EAST, square, occupancy)
        | ray_attacks(NORTH_WEST, square, occupancy)
        | ray_attacks(SOUTH_WEST, square, occupancy)
        | ray_attacks(SOUTH_EAST, square, occupancy)
}

#[inline]
pub(crate) fn rook_attacks(square: usize, occupancy: u64) -> u64 {
    ray_attacks(NORTH, square, occupancy)
        | ray_attacks(EAST, square, occupancy)
        | ray_attacks(SOUTH, square, occupancy)
        | ray_attacks(WEST, square, occupancy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_A: u64 = 0x0101010101010101;

    #[test]
    fn test_rook_attacks_empty_board() {
        // e4 sees the whole 4th rank and e-file
        let attacks = rook_attacks(28, 0);
        let expected = ((0xFFu64 << 24) | (FILE_A << 4)) & !(1u64 << 28);
        assert_eq!(attacks, expected);
    }

    #[test]
    fn test_bishop_attacks_reach_corners() {
        let attacks = bishop_attacks(28, 0);
        for sq in [1, 55, 7, 56] {
            assert_ne!(attacks & (1u64 << sq), 0, "square {sq}");
        }
        assert_eq!(attacks & (1u64 << 28), 0);
        assert_eq!(attacks.count_ones(), 13);
    }

    #[test]
    fn test_blockers_are_included_and_stop_the_ray() {
        // e6 and c4 block a rook on e4
        let rook = rook_attacks(28, (1u64 << 44) | (1u64 << 26));
        assert_ne!(rook & (1u64 << 44), 0);
        assert_eq!(rook & (1u64 << 52), 0);
        assert_ne!(rook & (1u64 << 26), 0);
        assert_eq!(rook & (1u64 << 25), 0);

        // c2 blocks a bishop on e4 heading south-west
        let bishop = bishop_attacks(28, 1u64 << 10);
        assert_ne!(bishop & (1u64 << 10), 0);
        assert_eq!(bishop & (1u64 << 1), 0);
    }
}
