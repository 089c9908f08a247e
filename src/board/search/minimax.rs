//! Unpruned reference search.
//!
//! Same move order, leaf rule, draw rules and tie-break as the alpha-beta
//! search, without any cutoffs. It exists to check that pruning never changes
//! the chosen move or its score.

use super::alphabeta::{Abort, RootLine, SearchContext};
use super::constants::INFINITY;
use super::move_order::order_moves;
use crate::board::eval::Evaluator;
use crate::board::ScoredMoveList;

impl<E: Evaluator> SearchContext<'_, E> {
    pub(crate) fn minimax_root(
        &mut self,
        depth: u32,
        root_moves: &ScoredMoveList,
    ) -> Result<Option<RootLine>, Abort<E::Error>> {
        let mut best: Option<RootLine> = None;
        for scored in root_moves.iter() {
            self.check_stop()?;
            let mv = scored.mv;
            let score = -self.with_move(mv, |ctx| ctx.minimax_node(depth - 1, 1))?;
            if best.as_ref().map_or(true, |line| score > line.score) {
                best = Some(RootLine {
                    best_move: mv,
                    score,
                    pv: vec![mv],
                });
            }
        }
        Ok(best)
    }

    fn minimax_node(&mut self, depth: u32, ply: usize) -> Result<i32, Abort<E::Error>> {
        if let Some(score) = self.rule_draw_score(ply) {
            return Ok(score);
        }
        if depth == 0 {
            return self.minimax_quiesce(self.quiescence_depth);
        }
        let moves = self.board.generate_moves();
        if moves.is_empty() {
            return Ok(self.terminal_score(ply));
        }
        let ordered = order_moves(&mut self.board, &moves);

        let mut best = -INFINITY;
        for scored in ordered.iter() {
            self.check_stop()?;
            let score = -self.with_move(scored.mv, |ctx| ctx.minimax_node(depth - 1, ply + 1))?;
            best = best.max(score);
        }
        Ok(best)
    }

    fn minimax_quiesce(&mut self, qdepth: u32) -> Result<i32, Abort<E::Error>> {
        let stand_pat = self.evaluate()?;
        if qdepth == 0 {
            return Ok(stand_pat);
        }
        let moves = self.board.generate_tactical_moves();
        let mut best = stand_pat;
        for &mv in &moves {
            self.check_stop()?;
            let score = -self.with_move(mv, |ctx| ctx.minimax_quiesce(qdepth - 1))?;
            best = best.max(score);
        }
        Ok(best)
    }
}
