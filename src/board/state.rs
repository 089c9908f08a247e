use std::collections::HashMap;
use std::fmt;

use crate::zobrist::ZOBRIST;

use super::attack_tables::PAWN_ATTACKS;

use super::{bit_for_square, Bitboard, CastlingRights, Color, Piece, Square};

/// Everything `make_move` overwrites that cannot be recomputed from the move.
#[derive(Clone, Debug)]
pub struct UnmakeInfo {
    pub(crate) captured: Option<(Color, Piece)>,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_castling_rights: CastlingRights,
    pub(crate) previous_hash: u64,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_fullmove_number: u32,
    pub(crate) moved: Piece,
}

impl UnmakeInfo {
    /// The piece removed by the move, if it was a capture
    #[must_use]
    pub fn captured(&self) -> Option<(Color, Piece)> {
        self.captured
    }
}

/// Occurrence count of each position hash reached in the game so far.
#[derive(Clone, Debug, Default)]
pub(crate) struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub(crate) fn get(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    pub(crate) fn increment(&mut self, hash: u64) -> u32 {
        let count = self.counts.entry(hash).or_insert(0);
        *count += 1;
        *count
    }

    pub(crate) fn decrement(&mut self, hash: u64) {
        if let Some(count) = self.counts.get_mut(&hash) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&hash);
            }
        }
    }

    pub(crate) fn reset_to(&mut self, hash: u64) {
        self.counts.clear();
        self.counts.insert(hash, 1);
    }
}

/// Outcome of a position for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl GameStatus {
    /// True when the game is over for any reason
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// True for every drawn outcome, stalemate included
    #[must_use]
    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::FiftyMoveRule
                | GameStatus::ThreefoldRepetition
                | GameStatus::InsufficientMaterial
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::FiftyMoveRule => write!(f, "draw by the fifty-move rule"),
            GameStatus::ThreefoldRepetition => write!(f, "draw by threefold repetition"),
            GameStatus::InsufficientMaterial => write!(f, "draw by insufficient material"),
        }
    }
}

/// A chess position plus the game history needed for repetition detection.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) hash: u64, // Zobrist hash
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) repetitions: RepetitionTable,
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Board {
    /// The standard initial position
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (file, piece) in BACK_RANK.into_iter().enumerate() {
            board.set_piece(Square(0, file), Color::White, piece);
            board.set_piece(Square(1, file), Color::White, Piece::Pawn);
            board.set_piece(Square(6, file), Color::Black, Piece::Pawn);
            board.set_piece(Square(7, file), Color::Black, piece);
        }
        board.castling_rights = CastlingRights::all();
        board.refresh_hash();
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            en_passant_target: None,
            castling_rights: CastlingRights::none(),
            hash: 0,
            halfmove_clock: 0,
            fullmove_number: 1,
            repetitions: RepetitionTable::default(),
        }
    }

    /// Recompute the hash from scratch and start a fresh repetition history.
    pub(crate) fn refresh_hash(&mut self) {
        self.hash = self.compute_hash();
        self.repetitions.reset_to(self.hash);
    }

    pub(crate) fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces[color.index()][piece.index()].iter() {
                    hash ^= ZOBRIST.piece(color, piece, sq);
                }
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side();
        }
        hash ^= ZOBRIST.castling(self.castling_rights);
        hash ^= ZOBRIST.en_passant(self.hashed_en_passant());
        hash
    }

    /// The en-passant target as far as position identity goes: only kept when
    /// a pawn of the side to move stands ready to capture onto it.
    pub(crate) fn hashed_en_passant(&self) -> Option<Square> {
        let target = self.en_passant_target?;
        let capturers = PAWN_ATTACKS[self.side_to_move.opponent().index()][target.index()]
            & self.pieces(self.side_to_move, Piece::Pawn).0;
        (capturers != 0).then_some(target)
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Square a pawn skipped on the previous double push, if any
    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Zobrist hash of placement, side to move, castling rights and ep file
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// How many times the current position has occurred in this game
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.get(self.hash)
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn all_occupied(&self) -> Bitboard {
        self.all_occupied
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = bit_for_square(sq);
        self.pieces[color.index()][piece.index()].0 |= bit;
        self.occupied[color.index()].0 |= bit;
        self.all_occupied.0 |= bit;
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = !bit_for_square(sq);
        self.pieces[color.index()][piece.index()].0 &= bit;
        self.occupied[color.index()].0 &= bit;
        self.all_occupied.0 &= bit;
    }

    /// Color and kind of the piece on `sq`, if any
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let bit = bit_for_square(sq);
        if self.all_occupied.0 & bit == 0 {
            return None;
        }
        let color = if self.occupied[Color::White.index()].0 & bit != 0 {
            Color::White
        } else {
            Color::Black
        };
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()].0 & bit != 0)
            .map(|piece| (color, piece))
    }

    #[inline]
    pub(crate) fn is_empty(&self, sq: Square) -> bool {
        self.all_occupied.0 & bit_for_square(sq) == 0
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).iter().next()
    }

    /// Draw by rule, checked in the order fifty-move, insufficient
    /// material, repetition. Mate and stalemate are not considered here.
    #[must_use]
    pub fn draw_by_rule(&self) -> Option<GameStatus> {
        if self.halfmove_clock >= 100 {
            Some(GameStatus::FiftyMoveRule)
        } else if self.is_insufficient_material() {
            Some(GameStatus::InsufficientMaterial)
        } else if self.repetition_count() >= 3 {
            Some(GameStatus::ThreefoldRepetition)
        } else {
            None
        }
    }

    /// Bare kings, a single minor piece, or only bishops all on one square
    /// colour.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let both = |piece: Piece| {
            self.pieces(Color::White, piece).0 | self.pieces(Color::Black, piece).0
        };
        if both(Piece::Pawn) | both(Piece::Rook) | both(Piece::Queen) != 0 {
            return false;
        }
        let knights = both(Piece::Knight).count_ones();
        let bishops = both(Piece::Bishop);
        match (knights, bishops.count_ones()) {
            (0, 0) | (1, 0) | (0, 1) => true,
            (0, _) => bishops_all_same_color(bishops),
            _ => false,
        }
    }
}

fn bishops_all_same_color(bishops: u64) -> bool {
    bishops & Bitboard::LIGHT_SQUARES.0 == 0 || bishops & Bitboard::DARK_SQUARES.0 == 0
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// Positions compare equal when every FEN field matches; the repetition
/// history is game bookkeeping and is ignored.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_target == other.en_passant_target
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Eq for Board {}

/// Diagram with rank 8 at the top, uppercase for White, `.` for empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self
                    .piece_at(Square(rank, file))
                    .map_or('.', |(color, piece)| piece.to_fen_char(color));
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
