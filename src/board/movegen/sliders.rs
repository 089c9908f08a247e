use super::super::attack_tables::{bishop_attacks, rook_attacks};
use super::super::{Board, MoveList, Piece, Square};

impl Board {
    /// Bishop, rook or queen moves, stopping at the first blocker on each ray.
    pub(super) fn push_slider_moves(&self, from: Square, piece: Piece, moves: &mut MoveList) {
        let occ = self.all_occupied.0;
        let idx = from.index();
        let mut targets = 0u64;
        if piece.attacks_diagonally() {
            targets |= bishop_attacks(idx, occ);
        }
        if piece.attacks_straight() {
            targets |= rook_attacks(idx, occ);
        }
        self.push_targets(from, targets, moves);
    }
}
