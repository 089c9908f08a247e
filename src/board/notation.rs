//! Coordinate move notation (`e2e4`, `e7e8q`) at the boundary of the engine.

use std::str::FromStr;

use super::error::{MoveInputError, NotationError};
use super::{Board, Move, Piece, Square};

/// A move as typed: two squares and an optional promotion piece, not yet
/// checked against any position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl FromStr for CoordinateMove {
    type Err = NotationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(NotationError::InvalidLength {
                len: text.chars().count(),
            });
        }
        let square = |part: &str| {
            part.parse::<Square>()
                .map_err(|_| NotationError::InvalidSquare {
                    notation: text.to_string(),
                })
        };
        let from = square(&text[0..2])?;
        let to = square(&text[2..4])?;

        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match Piece::from_char(c) {
                Some(piece @ (Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)) => {
                    Some(piece)
                }
                _ => return Err(NotationError::InvalidPromotion { char: c }),
            },
        };

        Ok(CoordinateMove {
            from,
            to,
            promotion,
        })
    }
}

impl Board {
    /// Resolve coordinate text to the legal move it names.
    ///
    /// A pawn reaching the last rank without a suffix promotes to a queen.
    ///
    /// # Example
    /// ```
    /// use alphabeta_chess::board::Board;
    ///
    /// let board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert!(mv.is_double_pawn_push());
    /// ```
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveInputError> {
        let CoordinateMove {
            from,
            to,
            promotion,
        } = text.parse()?;
        Ok(self.resolve_move(from, to, promotion)?)
    }

    /// Parse and play a coordinate move in one call.
    ///
    /// # Example
    /// ```
    /// use alphabeta_chess::board::Board;
    ///
    /// let mut board = Board::new();
    /// board.play_move_str("e2e4").unwrap();
    /// board.play_move_str("e7e5").unwrap();
    /// assert_eq!(board.fullmove_number(), 2);
    /// ```
    pub fn play_move_str(&mut self, text: &str) -> Result<Move, MoveInputError> {
        let mv = self.parse_move(text)?;
        self.make_move(mv);
        Ok(mv)
    }
}
