//! Precomputed attack tables for leaper pieces (knights, kings, pawns).

use once_cell::sync::Lazy;

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Union of the on-board targets reached from `sq` by each (rank, file) delta.
fn leaper_mask(sq: usize, deltas: &[(isize, isize)]) -> u64 {
    let r = (sq / 8) as isize;
    let f = (sq % 8) as isize;
    deltas
        .iter()
        .map(|&(dr, df)| (r + dr, f + df))
        .filter(|&(nr, nf)| (0..8).contains(&nr) && (0..8).contains(&nf))
        .fold(0u64, |mask, (nr, nf)| mask | 1u64 << (nr * 8 + nf))
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut attacks = [0u64; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        *slot = leaper_mask(sq, &KNIGHT_DELTAS);
    }
    attacks
});

pub(crate) static KING_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut attacks = [0u64; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        *slot = leaper_mask(sq, &KING_DELTAS);
    }
    attacks
});

/// Squares a pawn of each color attacks, indexed `[color][square]`.
pub(crate) static PAWN_ATTACKS: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut attacks = [[0u64; 64]; 2];
    for sq in 0..64 {
        attacks[0][sq] = leaper_mask(sq, &[(1, -1), (1, 1)]);
        attacks[1][sq] = leaper_mask(sq, &[(-1, -1), (-1, 1)]);
    }
    attacks
});
