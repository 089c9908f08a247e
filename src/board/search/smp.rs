//! Root-split parallel search.
//!
//! Workers pull root moves from a shared counter and score each one with a
//! full window on a private board copy. Results are merged by score, ties
//! going to the move the sequential search would have tried first, so the
//! chosen move and score match [`search`](super::search) exactly.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;

use log::debug;
use parking_lot::Mutex;

use super::alphabeta::{Abort, RootLine, SearchContext};
use super::{ensure_playable, format_pv, report, SearchError, SearchParams, SearchReport};
use crate::board::eval::Evaluator;
use crate::board::Board;
use crate::sync::{Cancellation, StopFlag};

/// Split the root moves of `board` across `threads` workers.
///
/// `threads` of 0 or 1 still runs one worker thread. Node counts are summed
/// over every worker and are not comparable with the sequential search.
pub fn search_parallel<E>(
    board: &Board,
    evaluator: &E,
    params: &SearchParams,
    threads: usize,
    stop: &StopFlag,
) -> Result<SearchReport, SearchError<E::Error>>
where
    E: Evaluator + Sync,
    E::Error: Send,
{
    ensure_playable(board)?;
    let depth = params.clamped_depth();
    let cancel = Cancellation::new(stop.clone(), params.deadline);
    let root_moves = SearchContext::new(board.clone(), evaluator, params, cancel.clone()).root_moves();
    let moves = root_moves.as_slice();
    let workers = threads.clamp(1, moves.len());

    let next = AtomicUsize::new(0);
    let nodes = AtomicU64::new(0);
    let results: Mutex<Vec<(usize, RootLine)>> = Mutex::new(Vec::with_capacity(moves.len()));
    let failure: Mutex<Option<Abort<E::Error>>> = Mutex::new(None);

    thread::scope(|scope| {
        for worker in 0..workers {
            let (next, nodes, results, failure) = (&next, &nodes, &results, &failure);
            let mut ctx = SearchContext::new(board.clone(), evaluator, params, cancel.clone());
            scope.spawn(move || {
                loop {
                    if failure.lock().is_some() {
                        break;
                    }
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    let Some(scored) = moves.get(index) else {
                        break;
                    };
                    match ctx.search_root_move(depth, scored.mv) {
                        Ok(line) => results.lock().push((index, line)),
                        Err(abort) => {
                            failure.lock().get_or_insert(abort);
                            break;
                        }
                    }
                }
                debug!("worker {worker} finished after {} nodes", ctx.nodes);
                nodes.fetch_add(ctx.nodes, Ordering::Relaxed);
            });
        }
    });

    if let Some(abort) = failure.into_inner() {
        return Err(abort.into());
    }

    let mut results = results.into_inner();
    results.sort_by_key(|(index, _)| *index);
    let mut best: Option<RootLine> = None;
    for (_, line) in results {
        if best.as_ref().map_or(true, |b| line.score > b.score) {
            best = Some(line);
        }
    }
    let line = best.ok_or(SearchError::Interrupted)?;
    let nodes = nodes.into_inner();
    debug!(
        "parallel depth {depth} score {} nodes {nodes} pv {}",
        line.score,
        format_pv(&line.pv)
    );
    Ok(report(line, depth, nodes))
}
