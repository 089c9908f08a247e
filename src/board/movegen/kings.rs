use super::super::attack_tables::KING_ATTACKS;
use super::super::{Board, Move, MoveList, Piece, Square};

impl Board {
    /// King steps plus castling. Castling here only needs the right, the rook
    /// on its corner and an empty path; attacked squares are left to the
    /// legality filter.
    pub(super) fn push_king_moves(&self, from: Square, moves: &mut MoveList) {
        self.push_targets(from, KING_ATTACKS[from.index()], moves);

        let color = self.side_to_move;
        let back = color.back_rank();
        if from != Square(back, 4) {
            return;
        }
        let rooks = self.pieces(color, Piece::Rook);
        let clear = |files: &[usize]| files.iter().all(|&f| self.is_empty(Square(back, f)));

        if self.castling_rights.has(color, true) && rooks.contains(Square(back, 7)) && clear(&[5, 6])
        {
            moves.push(Move::castle_kingside(from, Square(back, 6)));
        }
        if self.castling_rights.has(color, false)
            && rooks.contains(Square(back, 0))
            && clear(&[1, 2, 3])
        {
            moves.push(Move::castle_queenside(from, Square(back, 2)));
        }
    }
}
