//! Negamax alpha-beta over the legal move tree.

use log::trace;

use super::constants::{INFINITY, MATE_SCORE, MAX_EVAL};
use super::move_order::order_moves;
use super::SearchParams;
use crate::board::eval::Evaluator;
use crate::board::{Board, Move, ScoredMoveList};
use crate::sync::Cancellation;

/// Why a subtree was abandoned.
pub(crate) enum Abort<E> {
    Stopped,
    Evaluation(E),
}

/// Best root move of one completed pass.
#[derive(Clone, Debug)]
pub(crate) struct RootLine {
    pub(crate) best_move: Move,
    pub(crate) score: i32,
    pub(crate) pv: Vec<Move>,
}

/// Per-search state: a private copy of the board plus counters.
pub(crate) struct SearchContext<'a, E: Evaluator> {
    pub(crate) board: Board,
    evaluator: &'a E,
    pub(crate) quiescence_depth: u32,
    cancel: Cancellation,
    pub(crate) nodes: u64,
    pv: Vec<Vec<Move>>,
}

impl<'a, E: Evaluator> SearchContext<'a, E> {
    pub(crate) fn new(
        board: Board,
        evaluator: &'a E,
        params: &SearchParams,
        cancel: Cancellation,
    ) -> Self {
        let plies = (params.clamped_depth() + params.clamped_quiescence_depth()) as usize + 2;
        SearchContext {
            board,
            evaluator,
            quiescence_depth: params.clamped_quiescence_depth(),
            cancel,
            nodes: 0,
            pv: vec![Vec::new(); plies],
        }
    }

    #[inline]
    pub(crate) fn check_stop(&self) -> Result<(), Abort<E::Error>> {
        if self.cancel.is_cancelled() {
            Err(Abort::Stopped)
        } else {
            Ok(())
        }
    }

    /// Static score from the side to move's point of view.
    pub(crate) fn evaluate(&self) -> Result<i32, Abort<E::Error>> {
        let white = self
            .evaluator
            .evaluate(&self.board)
            .map_err(Abort::Evaluation)?;
        Ok(white.clamp(-MAX_EVAL, MAX_EVAL) * self.board.side_to_move().sign())
    }

    /// Score of a node with no legal moves.
    #[inline]
    pub(crate) fn terminal_score(&self, ply: usize) -> i32 {
        if self.board.is_in_check(self.board.side_to_move()) {
            -(MATE_SCORE - ply as i32)
        } else {
            0
        }
    }

    /// Score of a node drawn by rule, or `None` when play goes on. A mate
    /// delivered on the move that triggers the rule still counts as mate.
    pub(crate) fn rule_draw_score(&self, ply: usize) -> Option<i32> {
        self.board.draw_by_rule()?;
        if self.board.generate_moves().is_empty() {
            Some(self.terminal_score(ply))
        } else {
            Some(0)
        }
    }

    /// Make `mv`, score the child with `child`, and unmake, even when the
    /// child search fails.
    #[inline]
    pub(crate) fn with_move<T>(
        &mut self,
        mv: Move,
        child: impl FnOnce(&mut Self) -> Result<T, Abort<E::Error>>,
    ) -> Result<T, Abort<E::Error>> {
        self.nodes += 1;
        let info = self.board.make_move(mv);
        let result = child(self);
        self.board.unmake_move(mv, info);
        result
    }

    fn set_pv(&mut self, ply: usize, mv: Move) {
        let (head, tail) = self.pv.split_at_mut(ply + 1);
        let line = &mut head[ply];
        line.clear();
        line.push(mv);
        if let Some(child) = tail.first() {
            line.extend_from_slice(child);
        }
    }

    pub(crate) fn clear_pv(&mut self, ply: usize) {
        if let Some(line) = self.pv.get_mut(ply) {
            line.clear();
        }
    }

    pub(crate) fn root_moves(&mut self) -> ScoredMoveList {
        let moves = self.board.generate_moves();
        order_moves(&mut self.board, &moves)
    }

    /// Search every root move at `depth`, keeping the first strictly best.
    pub(crate) fn search_root(
        &mut self,
        depth: u32,
        root_moves: &ScoredMoveList,
    ) -> Result<Option<RootLine>, Abort<E::Error>> {
        let mut best: Option<RootLine> = None;
        let mut alpha = -INFINITY;
        self.clear_pv(0);

        for scored in root_moves.iter() {
            self.check_stop()?;
            let mv = scored.mv;
            let score = -self.with_move(mv, |ctx| ctx.alphabeta(depth - 1, -INFINITY, -alpha, 1))?;
            trace!("depth {depth} root move {mv} scored {score}");
            if score > alpha {
                alpha = score;
                self.set_pv(0, mv);
                best = Some(RootLine {
                    best_move: mv,
                    score,
                    pv: self.pv[0].clone(),
                });
            }
        }
        Ok(best)
    }

    /// Exact score of a single root move, searched with a full window.
    pub(crate) fn search_root_move(
        &mut self,
        depth: u32,
        mv: Move,
    ) -> Result<RootLine, Abort<E::Error>> {
        self.check_stop()?;
        let score = -self.with_move(mv, |ctx| ctx.alphabeta(depth - 1, -INFINITY, INFINITY, 1))?;
        self.set_pv(0, mv);
        Ok(RootLine {
            best_move: mv,
            score,
            pv: self.pv[0].clone(),
        })
    }

    /// Fail-soft negamax. Below the root, checkmate outranks the draw rules,
    /// which outrank everything else; the horizon hands over to quiescence.
    pub(crate) fn alphabeta(
        &mut self,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        ply: usize,
    ) -> Result<i32, Abort<E::Error>> {
        self.clear_pv(ply);
        if let Some(score) = self.rule_draw_score(ply) {
            return Ok(score);
        }
        if depth == 0 {
            return self.quiesce(alpha, beta, self.quiescence_depth, ply);
        }

        let moves = self.board.generate_moves();
        if moves.is_empty() {
            return Ok(self.terminal_score(ply));
        }
        let ordered = order_moves(&mut self.board, &moves);

        let mut best = -INFINITY;
        for scored in ordered.iter() {
            self.check_stop()?;
            let mv = scored.mv;
            let score = -self.with_move(mv, |ctx| ctx.alphabeta(depth - 1, -beta, -alpha, ply + 1))?;
            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
                self.set_pv(ply, mv);
            }
            if alpha >= beta {
                break;
            }
        }
        Ok(best)
    }
}
