pub mod board;
pub mod sync;
pub(crate) mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use sync::StopFlag;
