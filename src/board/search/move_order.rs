//! Move ordering: MVV-LVA captures, then promotions, then checks, then the
//! rest in generation order.

use super::constants::{CAPTURE_SCORE, CHECK_SCORE, PROMOTION_SCORE};
use crate::board::{Board, Move, MoveList, Piece, ScoredMoveList};

/// Victim/attacker rank for MVV-LVA; the king attacks last.
#[inline]
fn rank(piece: Piece) -> i32 {
    piece.index() as i32 + 1
}

fn score_move(board: &mut Board, mv: Move) -> i32 {
    let attacker = board.piece_at(mv.from()).map_or(Piece::Pawn, |(_, piece)| piece);
    let promotion_bonus = mv.promotion().map_or(0, rank);

    if mv.is_capture() {
        let victim = if mv.is_en_passant() {
            Piece::Pawn
        } else {
            board.piece_at(mv.to()).map_or(Piece::Pawn, |(_, piece)| piece)
        };
        return CAPTURE_SCORE + 10 * rank(victim) - rank(attacker) + promotion_bonus;
    }
    if mv.is_promotion() {
        return PROMOTION_SCORE + promotion_bonus;
    }

    let mover = board.side_to_move();
    let info = board.make_move(mv);
    let gives_check = board.is_in_check(mover.opponent());
    board.unmake_move(mv, info);
    if gives_check {
        CHECK_SCORE
    } else {
        0
    }
}

/// Score and stably sort `moves`; equal scores keep generation order.
pub(crate) fn order_moves(board: &mut Board, moves: &MoveList) -> ScoredMoveList {
    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        let score = score_move(board, mv);
        scored.push(mv, score);
    }
    scored.sort_by_score_desc();
    scored
}
