use crate::zobrist::ZOBRIST;

use super::error::IllegalMoveError;
use super::{Board, Color, Move, Piece, Square, UnmakeInfo};

/// Rook origin and destination for a castle whose king lands on `king_to`.
#[inline]
pub(crate) fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    if king_to.file() == 6 {
        (Square(king_to.rank(), 7), Square(king_to.rank(), 5))
    } else {
        (Square(king_to.rank(), 0), Square(king_to.rank(), 3))
    }
}

/// The castling right tied to a rook's home corner.
#[inline]
fn corner_right(sq: Square) -> Option<(Color, bool)> {
    match (sq.rank(), sq.file()) {
        (0, 0) => Some((Color::White, false)),
        (0, 7) => Some((Color::White, true)),
        (7, 0) => Some((Color::Black, false)),
        (7, 7) => Some((Color::Black, true)),
        _ => None,
    }
}

/// Square of the pawn removed by an en-passant capture.
#[inline]
fn en_passant_victim(mv: Move) -> Square {
    Square(mv.from().rank(), mv.to().file())
}

impl Board {
    /// Apply `mv` in place and return what `unmake_move` needs to undo it.
    ///
    /// `mv` must come from [`Board::generate_moves`] for this position. Use
    /// [`Board::play`] or [`Board::apply`] for moves from outside the engine.
    ///
    /// # Panics
    ///
    /// Panics if the source square is empty.
    pub fn make_move(&mut self, mv: Move) -> UnmakeInfo {
        let color = self.side_to_move;
        let from = mv.from();
        let to = mv.to();
        let moved = match self.piece_at(from) {
            Some((_, piece)) => piece,
            None => panic!("make_move: no piece on {from} for {mv:?}"),
        };

        let info = UnmakeInfo {
            captured: None,
            previous_en_passant_target: self.en_passant_target,
            previous_castling_rights: self.castling_rights,
            previous_hash: self.hash,
            previous_halfmove_clock: self.halfmove_clock,
            previous_fullmove_number: self.fullmove_number,
            moved,
        };

        let mut hash = self.hash
            ^ ZOBRIST.side()
            ^ ZOBRIST.en_passant(self.hashed_en_passant())
            ^ ZOBRIST.castling(self.castling_rights);

        let captured = if mv.is_castling() {
            None
        } else {
            let victim_sq = if mv.is_en_passant() {
                en_passant_victim(mv)
            } else {
                to
            };
            let victim = self.piece_at(victim_sq);
            if let Some((victim_color, victim_piece)) = victim {
                self.remove_piece(victim_sq, victim_color, victim_piece);
                hash ^= ZOBRIST.piece(victim_color, victim_piece, victim_sq);
            }
            victim
        };

        let placed = mv.promotion().unwrap_or(moved);
        self.remove_piece(from, color, moved);
        self.set_piece(to, color, placed);
        hash ^= ZOBRIST.piece(color, moved, from) ^ ZOBRIST.piece(color, placed, to);

        if mv.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(to);
            self.remove_piece(rook_from, color, Piece::Rook);
            self.set_piece(rook_to, color, Piece::Rook);
            hash ^= ZOBRIST.piece(color, Piece::Rook, rook_from)
                ^ ZOBRIST.piece(color, Piece::Rook, rook_to);
        }

        self.en_passant_target = if mv.is_double_pawn_push() {
            Some(Square((from.rank() + to.rank()) / 2, from.file()))
        } else {
            None
        };

        if moved == Piece::King {
            self.castling_rights.remove_color(color);
        }
        // Leaving or landing on a rook's home corner ends that wing for good
        for sq in [from, to] {
            if let Some((owner, kingside)) = corner_right(sq) {
                self.castling_rights.remove(owner, kingside);
            }
        }

        if moved == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = color.opponent();

        hash ^= ZOBRIST.en_passant(self.hashed_en_passant()) ^ ZOBRIST.castling(self.castling_rights);
        self.hash = hash;
        self.repetitions.increment(hash);

        UnmakeInfo { captured, ..info }
    }

    /// Restore the position that existed before `make_move(mv)` returned `info`.
    pub fn unmake_move(&mut self, mv: Move, info: UnmakeInfo) {
        self.repetitions.decrement(self.hash);

        let color = self.side_to_move.opponent();
        let from = mv.from();
        let to = mv.to();

        let placed = mv.promotion().unwrap_or(info.moved);
        self.remove_piece(to, color, placed);
        self.set_piece(from, color, info.moved);

        if mv.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(to);
            self.remove_piece(rook_to, color, Piece::Rook);
            self.set_piece(rook_from, color, Piece::Rook);
        }

        if let Some((victim_color, victim_piece)) = info.captured {
            let victim_sq = if mv.is_en_passant() {
                en_passant_victim(mv)
            } else {
                to
            };
            self.set_piece(victim_sq, victim_color, victim_piece);
        }

        self.side_to_move = color;
        self.en_passant_target = info.previous_en_passant_target;
        self.castling_rights = info.previous_castling_rights;
        self.hash = info.previous_hash;
        self.halfmove_clock = info.previous_halfmove_clock;
        self.fullmove_number = info.previous_fullmove_number;
    }

    /// Check `mv` against the legal move list, explaining any rejection.
    pub fn validate_move(&self, mv: Move) -> Result<(), IllegalMoveError> {
        self.check_source(mv.from())?;
        if self.generate_moves().contains(mv) {
            return Ok(());
        }
        let pseudo = self.generate_pseudo_moves();
        if !pseudo.contains(mv) {
            let same_squares = pseudo
                .iter()
                .any(|m| m.from() == mv.from() && m.to() == mv.to());
            return Err(if same_squares {
                IllegalMoveError::InconsistentFlags { mv }
            } else {
                IllegalMoveError::NotPseudoLegal {
                    from: mv.from(),
                    to: mv.to(),
                }
            });
        }
        Err(self.rejection_reason(mv))
    }

    /// Find the legal move from `from` to `to`. A promotion without a piece
    /// resolves to a queen.
    pub fn resolve_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Move, IllegalMoveError> {
        self.check_source(from)?;
        let pseudo = self.generate_pseudo_moves();
        let mut candidates = pseudo
            .iter()
            .copied()
            .filter(|m| m.from() == from && m.to() == to)
            .peekable();
        let promotes = match candidates.peek() {
            Some(m) => m.is_promotion(),
            None => return Err(IllegalMoveError::NotPseudoLegal { from, to }),
        };
        if promotion.is_some() && !promotes {
            return Err(IllegalMoveError::UnexpectedPromotion { from, to });
        }
        let wanted = if promotes {
            Some(promotion.unwrap_or(Piece::Queen))
        } else {
            None
        };
        let mv = candidates
            .find(|m| m.promotion() == wanted)
            .ok_or(IllegalMoveError::NotPseudoLegal { from, to })?;
        if self.is_legal_pseudo_move(mv) {
            Ok(mv)
        } else {
            Err(self.rejection_reason(mv))
        }
    }

    /// Validate and play `mv`, keeping the undo record.
    pub fn play(&mut self, mv: Move) -> Result<UnmakeInfo, IllegalMoveError> {
        self.validate_move(mv)?;
        Ok(self.make_move(mv))
    }

    /// Value-semantics application: the successor position, `self` untouched.
    pub fn apply(&self, mv: Move) -> Result<Board, IllegalMoveError> {
        self.validate_move(mv)?;
        let mut next = self.clone();
        next.make_move(mv);
        Ok(next)
    }

    fn check_source(&self, from: Square) -> Result<(), IllegalMoveError> {
        match self.piece_at(from) {
            None => Err(IllegalMoveError::EmptySource { square: from }),
            Some((owner, _)) if owner != self.side_to_move => Err(IllegalMoveError::WrongSide {
                square: from,
                owner,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Why a pseudo-legal move failed the legality filter.
    fn rejection_reason(&self, mv: Move) -> IllegalMoveError {
        if mv.is_castling() && !self.castling_path_safe(mv) {
            IllegalMoveError::CastlesThroughCheck { mv }
        } else {
            IllegalMoveError::LeavesKingInCheck { mv }
        }
    }
}
