//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node counts for move generation correctness
//! - `draw.rs` - Draw detection (50-move, repetition, insufficient material)
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `edge_cases.rs` - Special positions and edge cases
//! - `search.rs` - Search results, parity and cancellation
//! - `proptest.rs` - Property-based tests

mod edge_cases;
mod make_unmake;

use crate::board::{Board, Move, Piece, Square};

pub(super) fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}

pub(super) fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("valid FEN")
}

pub(super) fn find_move(board: &Board, from: &str, to: &str, promotion: Option<Piece>) -> Move {
    board
        .generate_moves()
        .into_iter()
        .find(|m| m.from() == sq(from) && m.to() == sq(to) && m.promotion() == promotion)
        .unwrap_or_else(|| panic!("expected move {from}{to} not found"))
}
