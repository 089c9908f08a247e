//! Prelude module for convenient imports.
//!
//! # Example
//! ```
//! use alphabeta_chess::board::prelude::*;
//!
//! let board = Board::new();
//! assert_eq!(board.status(), GameStatus::InProgress);
//! ```

pub use super::{
    search, Board, BoardBuilder, CastlingRights, Color, Evaluator, FenError, GameStatus,
    MaterialEvaluator, Move, MoveInputError, MoveList, Piece, SearchError, SearchParams,
    SearchReport, Square,
};
pub use crate::sync::StopFlag;
