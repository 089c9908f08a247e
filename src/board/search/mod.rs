//! Depth-bounded alpha-beta search over a pluggable evaluator.
//!
//! Features:
//! - Fail-soft negamax alpha-beta with mate scores decayed by ply
//! - Quiescence search over captures and promotions with stand-pat
//! - Move ordering: MVV-LVA captures, promotions, checks, then quiet moves
//! - Iterative deepening with a deadline and a shared stop flag
//! - Root-split parallel search that returns the sequential result
//! - An unpruned minimax reference with identical move choice

mod alphabeta;
mod constants;
mod minimax;
mod move_order;
mod quiescence;
mod smp;

use std::fmt;
use std::time::{Duration, Instant};

use log::debug;

use self::alphabeta::{Abort, RootLine, SearchContext};
use super::eval::Evaluator;
use super::{Board, GameStatus, Move};
use crate::sync::{Cancellation, StopFlag};

pub use constants::{DEFAULT_DEPTH, DEFAULT_QUIESCENCE_DEPTH, MATE_SCORE, MATE_THRESHOLD};
use constants::{MAX_QUIESCENCE_DEPTH, MAX_SEARCH_DEPTH};
pub use smp::search_parallel;

/// Search limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Full-width depth in plies
    pub depth: u32,
    /// Extra plies of captures and promotions past the horizon; 0 disables
    pub quiescence_depth: u32,
    /// Wall-clock limit, polled between sibling moves
    pub deadline: Option<Instant>,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            depth: DEFAULT_DEPTH,
            quiescence_depth: DEFAULT_QUIESCENCE_DEPTH,
            deadline: None,
        }
    }
}

impl SearchParams {
    #[must_use]
    pub fn with_depth(depth: u32) -> Self {
        SearchParams {
            depth,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn quiescence(mut self, quiescence_depth: u32) -> Self {
        self.quiescence_depth = quiescence_depth;
        self
    }

    #[must_use]
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline `limit` from now.
    #[must_use]
    pub fn time_limit(self, limit: Duration) -> Self {
        self.deadline(Instant::now() + limit)
    }

    /// Depth actually searched: at least one ply, at most the ply cap.
    pub(crate) fn clamped_depth(&self) -> u32 {
        self.depth.clamp(1, MAX_SEARCH_DEPTH)
    }

    pub(crate) fn clamped_quiescence_depth(&self) -> u32 {
        self.quiescence_depth.min(MAX_QUIESCENCE_DEPTH)
    }
}

/// Outcome of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Move,
    /// Score for the side to move at the root, in centipawns
    pub score: i32,
    /// Deepest fully completed depth
    pub depth: u32,
    pub nodes: u64,
    /// Expected line starting with `best_move`
    pub principal_variation: Vec<Move>,
}

impl SearchReport {
    /// Moves to mate, positive when the side to move delivers it.
    #[must_use]
    pub fn mate_in(&self) -> Option<i32> {
        mate_in(self.score)
    }
}

/// Convert a mate-band score to full moves until mate; `None` for ordinary
/// scores.
#[must_use]
pub fn mate_in(score: i32) -> Option<i32> {
    if score.abs() < MATE_THRESHOLD {
        return None;
    }
    let plies = MATE_SCORE - score.abs();
    let moves = (plies + 1) / 2;
    Some(if score > 0 { moves } else { -moves })
}

/// Search failure. `E` is the evaluator's own error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError<E> {
    /// The root has no legal moves; carries checkmate or stalemate
    Terminal(GameStatus),
    /// The evaluator failed; its error is passed through unchanged
    Evaluation(E),
    /// Stop flag or deadline fired before any depth completed
    Interrupted,
}

impl<E: fmt::Display> fmt::Display for SearchError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Terminal(status) => write!(f, "No legal moves to search: {status}"),
            SearchError::Evaluation(err) => write!(f, "Evaluator failed: {err}"),
            SearchError::Interrupted => write!(f, "Search stopped before completing a depth"),
        }
    }
}

impl<E> std::error::Error for SearchError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Evaluation(err) => Some(err),
            _ => None,
        }
    }
}

impl<E> From<Abort<E>> for SearchError<E> {
    fn from(abort: Abort<E>) -> Self {
        match abort {
            Abort::Stopped => SearchError::Interrupted,
            Abort::Evaluation(err) => SearchError::Evaluation(err),
        }
    }
}

/// A root with no legal moves is reported, never searched.
fn ensure_playable<E>(board: &Board) -> Result<(), SearchError<E>> {
    if board.generate_moves().is_empty() {
        Err(SearchError::Terminal(board.status()))
    } else {
        Ok(())
    }
}

fn report(line: RootLine, depth: u32, nodes: u64) -> SearchReport {
    SearchReport {
        best_move: line.best_move,
        score: line.score,
        depth,
        nodes,
        principal_variation: line.pv,
    }
}

pub(crate) fn format_pv(pv: &[Move]) -> String {
    pv.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fixed-depth alpha-beta search.
///
/// # Example
/// ```
/// use alphabeta_chess::board::{search, Board, MaterialEvaluator, SearchParams};
///
/// let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").unwrap();
/// let report = search(&board, &MaterialEvaluator, &SearchParams::with_depth(2)).unwrap();
/// assert_eq!(report.best_move.to_string(), "e1e8");
/// assert_eq!(report.mate_in(), Some(1));
/// ```
pub fn search<E: Evaluator>(
    board: &Board,
    evaluator: &E,
    params: &SearchParams,
) -> Result<SearchReport, SearchError<E::Error>> {
    search_with_stop(board, evaluator, params, &StopFlag::new())
}

/// Fixed-depth alpha-beta search that also honours `stop`.
pub fn search_with_stop<E: Evaluator>(
    board: &Board,
    evaluator: &E,
    params: &SearchParams,
    stop: &StopFlag,
) -> Result<SearchReport, SearchError<E::Error>> {
    ensure_playable(board)?;
    let cancel = Cancellation::new(stop.clone(), params.deadline);
    let mut ctx = SearchContext::new(board.clone(), evaluator, params, cancel);
    let depth = params.clamped_depth();
    let root_moves = ctx.root_moves();
    let line = ctx
        .search_root(depth, &root_moves)?
        .ok_or(SearchError::Interrupted)?;
    debug!(
        "depth {depth} score {} nodes {} pv {}",
        line.score,
        ctx.nodes,
        format_pv(&line.pv)
    );
    Ok(report(line, depth, ctx.nodes))
}

/// Search depths 1 through `params.depth`, returning the deepest completed
/// iteration. A stop or deadline aborts the running iteration only.
pub fn iterative_deepening<E: Evaluator>(
    board: &Board,
    evaluator: &E,
    params: &SearchParams,
    stop: &StopFlag,
) -> Result<SearchReport, SearchError<E::Error>> {
    ensure_playable(board)?;
    let cancel = Cancellation::new(stop.clone(), params.deadline);
    let mut ctx = SearchContext::new(board.clone(), evaluator, params, cancel);
    let root_moves = ctx.root_moves();
    let mut completed: Option<SearchReport> = None;

    for depth in 1..=params.clamped_depth() {
        match ctx.search_root(depth, &root_moves) {
            Ok(Some(line)) => {
                debug!(
                    "depth {depth} score {} nodes {} pv {}",
                    line.score,
                    ctx.nodes,
                    format_pv(&line.pv)
                );
                let found_mate = line.score >= MATE_THRESHOLD;
                completed = Some(report(line, depth, ctx.nodes));
                if found_mate {
                    break;
                }
            }
            Ok(None) | Err(Abort::Stopped) => {
                debug!("iteration at depth {depth} interrupted");
                break;
            }
            Err(Abort::Evaluation(err)) => return Err(SearchError::Evaluation(err)),
        }
    }

    completed
        .map(|mut report| {
            report.nodes = ctx.nodes;
            report
        })
        .ok_or(SearchError::Interrupted)
}

/// Unpruned reference search: same result as [`search`], more nodes.
pub fn minimax<E: Evaluator>(
    board: &Board,
    evaluator: &E,
    params: &SearchParams,
) -> Result<SearchReport, SearchError<E::Error>> {
    ensure_playable(board)?;
    let cancel = Cancellation::new(StopFlag::new(), params.deadline);
    let mut ctx = SearchContext::new(board.clone(), evaluator, params, cancel);
    let depth = params.clamped_depth();
    let root_moves = ctx.root_moves();
    let line = ctx
        .minimax_root(depth, &root_moves)?
        .ok_or(SearchError::Interrupted)?;
    Ok(report(line, depth, ctx.nodes))
}
