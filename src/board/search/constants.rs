//! Search constants.

use crate::board::MAX_PLY;

/// Scores with absolute value >= this are forced mates
pub const MATE_THRESHOLD: i32 = 28000;

/// Score of being mated at the root; a mate found `ply` plies deep scores
/// `MATE_SCORE - ply`, so shorter mates rank higher.
pub const MATE_SCORE: i32 = MATE_THRESHOLD + MAX_PLY as i32;

/// Window bound no real score reaches
pub(crate) const INFINITY: i32 = MATE_SCORE + 1;

/// Largest evaluator output kept; anything beyond is clamped below the mate band
pub(crate) const MAX_EVAL: i32 = MATE_THRESHOLD - 1;

pub const DEFAULT_DEPTH: u32 = 3;
pub const DEFAULT_QUIESCENCE_DEPTH: u32 = 3;

/// Main search and quiescence depths are capped so mate plies stay in the band
pub(crate) const MAX_SEARCH_DEPTH: u32 = 64;
pub(crate) const MAX_QUIESCENCE_DEPTH: u32 = 32;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores are tried earlier: captures > promotions > checks > quiet

pub(crate) const CAPTURE_SCORE: i32 = 30_000;
pub(crate) const PROMOTION_SCORE: i32 = 20_000;
pub(crate) const CHECK_SCORE: i32 = 10_000;
