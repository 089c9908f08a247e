//! Chess board representation, rules and search.
//!
//! Uses bitboards for move generation. Supports the full rules: castling,
//! en passant, promotions, and the fifty-move, repetition and
//! insufficient-material draws.
//!
//! # Example
//! ```
//! use alphabeta_chess::board::{search, Board, MaterialEvaluator, SearchParams};
//!
//! let mut board = Board::new();
//! assert_eq!(board.generate_moves().len(), 20);
//!
//! board.play_move_str("e2e4").unwrap();
//! let report = search(&board, &MaterialEvaluator, &SearchParams::with_depth(2)).unwrap();
//! println!("black replies {} ({})", report.best_move, report.score);
//! ```

mod attack_tables;
mod builder;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod notation;
pub mod prelude;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use builder::BoardBuilder;
pub use error::{FenError, IllegalMoveError, MoveInputError, NotationError, SquareError};
pub use fen::STARTING_FEN;
pub use notation::CoordinateMove;
pub use state::{Board, GameStatus, UnmakeInfo};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece, Square,
};

// Evaluation
pub use eval::{
    encode_features, EvalError, Evaluator, Layer, LinearEvaluator, MaterialEvaluator, MlpEvaluator,
    FEATURE_COUNT,
};

// Search functions and configuration
pub use search::{
    iterative_deepening, mate_in, minimax, search, search_parallel, search_with_stop, SearchError,
    SearchParams, SearchReport, DEFAULT_DEPTH, DEFAULT_QUIESCENCE_DEPTH, MATE_SCORE, MATE_THRESHOLD,
};

pub(crate) use types::{bit_for_square, ScoredMoveList, MAX_PLY, PROMOTION_PIECES};
