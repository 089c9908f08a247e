use super::super::attack_tables::PAWN_ATTACKS;
use super::super::{bit_for_square, Bitboard, Board, Move, MoveList, Piece, Square, PROMOTION_PIECES};

impl Board {
    pub(super) fn push_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.side_to_move;
        let dir = color.pawn_direction();
        let promotes = |sq: Square| sq.rank() == color.pawn_promotion_rank();

        if let Some(one) = from.offset(dir, 0).filter(|&sq| self.is_empty(sq)) {
            if promotes(one) {
                for piece in PROMOTION_PIECES {
                    moves.push(Move::new_promotion(from, one, piece));
                }
            } else {
                moves.push(Move::quiet(from, one));
                if from.rank() == color.pawn_start_rank() {
                    if let Some(two) = one.offset(dir, 0).filter(|&sq| self.is_empty(sq)) {
                        moves.push(Move::double_pawn_push(from, two));
                    }
                }
            }
        }

        let attacks = PAWN_ATTACKS[color.index()][from.index()];
        let enemies = self.occupied[color.opponent().index()].0;
        for to in Bitboard(attacks & enemies).iter() {
            if promotes(to) {
                for piece in PROMOTION_PIECES {
                    moves.push(Move::new_promotion_capture(from, to, piece));
                }
            } else {
                moves.push(Move::capture(from, to));
            }
        }

        if let Some(target) = self.en_passant_target {
            let victim = Square(from.rank(), target.file());
            if attacks & bit_for_square(target) != 0
                && self.piece_at(victim) == Some((color.opponent(), Piece::Pawn))
            {
                moves.push(Move::en_passant(from, target));
            }
        }
    }
}
