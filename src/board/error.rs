//! Error types for chess board operations.

use std::fmt;

use super::{Color, Move, Square};

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    TooFewParts { found: usize },
    /// Placement field does not have 8 ranks
    WrongRankCount { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// A rank describes more than 8 files
    TooManyFiles { rank: usize, files: usize },
    /// A rank describes fewer than 8 files
    TooFewFiles { rank: usize, files: usize },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Halfmove clock or fullmove number is not a number
    InvalidCounter { field: &'static str, found: String },
    /// A side does not have exactly one king
    KingCount { color: Color, count: u32 },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::TooManyFiles { rank, files } => {
                write!(f, "Too many files ({files}) in rank {rank}")
            }
            FenError::TooFewFiles { rank, files } => {
                write!(f, "Too few files ({files}) in rank {rank}")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { field, found } => {
                write!(f, "Invalid {field} '{found}' in FEN")
            }
            FenError::KingCount { color, count } => {
                write!(f, "{color} must have exactly one king, found {count}")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Malformed coordinate move text (`e2e4`, `e7e8q`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            NotationError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            NotationError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for NotationError {}

/// A requested move failed the legality rules for the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    /// No piece stands on the source square
    EmptySource { square: Square },
    /// The piece on the source square belongs to the side not on move
    WrongSide { square: Square, owner: Color },
    /// The piece cannot reach the destination under its movement rules
    NotPseudoLegal { from: Square, to: Square },
    /// Castling out of, through, or into check
    CastlesThroughCheck { mv: Move },
    /// The move would leave the mover's king attacked
    LeavesKingInCheck { mv: Move },
    /// A promotion piece was given for a move that does not promote
    UnexpectedPromotion { from: Square, to: Square },
    /// Flags on a hand-built move disagree with the position
    InconsistentFlags { mv: Move },
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveError::EmptySource { square } => {
                write!(f, "No piece on {square}")
            }
            IllegalMoveError::WrongSide { square, owner } => {
                write!(f, "Piece on {square} belongs to {owner}, who is not on move")
            }
            IllegalMoveError::NotPseudoLegal { from, to } => {
                write!(f, "Piece on {from} cannot move to {to}")
            }
            IllegalMoveError::CastlesThroughCheck { mv } => {
                write!(f, "Castling {mv} passes through or starts in check")
            }
            IllegalMoveError::LeavesKingInCheck { mv } => {
                write!(f, "Move {mv} leaves the king in check")
            }
            IllegalMoveError::UnexpectedPromotion { from, to } => {
                write!(f, "Move {from}{to} does not promote")
            }
            IllegalMoveError::InconsistentFlags { mv } => {
                write!(f, "Move {mv:?} does not match the position")
            }
        }
    }
}

impl std::error::Error for IllegalMoveError {}

/// Failure to turn user-supplied move text into a played move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveInputError {
    Notation(NotationError),
    Illegal(IllegalMoveError),
}

impl fmt::Display for MoveInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveInputError::Notation(err) => write!(f, "{err}"),
            MoveInputError::Illegal(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for MoveInputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveInputError::Notation(err) => Some(err),
            MoveInputError::Illegal(err) => Some(err),
        }
    }
}

impl From<NotationError> for MoveInputError {
    fn from(err: NotationError) -> Self {
        MoveInputError::Notation(err)
    }
}

impl From<IllegalMoveError> for MoveInputError {
    fn from(err: IllegalMoveError) -> Self {
        MoveInputError::Illegal(err)
    }
}
