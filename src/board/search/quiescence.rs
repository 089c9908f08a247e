use super::alphabeta::{Abort, SearchContext};
use super::move_order::order_moves;
use crate::board::eval::Evaluator;

impl<E: Evaluator> SearchContext<'_, E> {
    /// Captures and promotions only, with stand-pat. At `qdepth == 0` the
    /// static score is returned as is.
    pub(crate) fn quiesce(
        &mut self,
        mut alpha: i32,
        beta: i32,
        qdepth: u32,
        ply: usize,
    ) -> Result<i32, Abort<E::Error>> {
        self.clear_pv(ply);
        let stand_pat = self.evaluate()?;
        if qdepth == 0 || stand_pat >= beta {
            return Ok(stand_pat);
        }
        alpha = alpha.max(stand_pat);

        let moves = self.board.generate_tactical_moves();
        let ordered = order_moves(&mut self.board, &moves);

        let mut best = stand_pat;
        for scored in ordered.iter() {
            self.check_stop()?;
            let mv = scored.mv;
            let score =
                -self.with_move(mv, |ctx| ctx.quiesce(-beta, -alpha, qdepth - 1, ply + 1))?;
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        Ok(best)
    }
}
