use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::{Board, MoveList, Square};

impl Board {
    pub(super) fn push_knight_moves(&self, from: Square, moves: &mut MoveList) {
        self.push_targets(from, KNIGHT_ATTACKS[from.index()], moves);
    }
}
