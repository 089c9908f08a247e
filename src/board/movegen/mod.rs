//! Pseudo-legal generation per piece, then a king-safety filter.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::attack_tables::{
    bishop_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS,
};
use super::make_unmake::castle_rook_squares;
use super::{bit_for_square, Bitboard, Board, Color, GameStatus, Move, MoveList, Piece, Square};

impl Board {
    /// All geometrically valid moves for the side to move, ignoring whether
    /// the mover's king is left attacked.
    ///
    /// Order: pawns, knights, bishops, rooks, queens, king; within a kind by
    /// ascending origin square.
    #[must_use]
    pub fn generate_pseudo_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let color = self.side_to_move;
        for piece in Piece::ALL {
            for from in self.pieces(color, piece).iter() {
                match piece {
                    Piece::Pawn => self.push_pawn_moves(from, &mut moves),
                    Piece::Knight => self.push_knight_moves(from, &mut moves),
                    Piece::King => self.push_king_moves(from, &mut moves),
                    _ => self.push_slider_moves(from, piece, &mut moves),
                }
            }
        }
        moves
    }

    /// Legal moves: pseudo-legal moves that keep the mover's king safe.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let mut legal = MoveList::new();
        for mv in self.generate_pseudo_moves() {
            if self.is_legal_pseudo_move(mv) {
                legal.push(mv);
            }
        }
        legal
    }

    /// Legal captures and promotions, for quiescence search.
    #[must_use]
    pub fn generate_tactical_moves(&self) -> MoveList {
        let mut tactical = MoveList::new();
        for mv in self.generate_pseudo_moves() {
            if mv.is_tactical() && self.is_legal_pseudo_move(mv) {
                tactical.push(mv);
            }
        }
        tactical
    }

    /// Quiet or capture moves from `from` to every square in `targets` not
    /// held by the mover.
    fn push_targets(&self, from: Square, targets: u64, moves: &mut MoveList) {
        let color = self.side_to_move;
        let enemies = self.occupied[color.opponent().index()].0;
        let targets = targets & !self.occupied[color.index()].0;
        for to in Bitboard(targets).iter() {
            if enemies & bit_for_square(to) != 0 {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }

    /// Legality filter for a move produced by `generate_pseudo_moves`.
    ///
    /// The occupancy after the move is built directly, so discovered checks
    /// (including the rank pin behind an en-passant pair) are seen without
    /// touching the board.
    pub(crate) fn is_legal_pseudo_move(&self, mv: Move) -> bool {
        let color = self.side_to_move;
        let Some(king) = self.king_square(color) else {
            return true;
        };
        if mv.is_castling() && !self.castling_path_safe(mv) {
            return false;
        }

        let from_bit = bit_for_square(mv.from());
        let to_bit = bit_for_square(mv.to());
        let victim_bit = if mv.is_en_passant() {
            bit_for_square(Square(mv.from().rank(), mv.to().file()))
        } else if mv.is_capture() {
            to_bit
        } else {
            0
        };

        let mut occupancy = (self.all_occupied.0 & !from_bit & !victim_bit) | to_bit;
        if mv.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(mv.to());
            occupancy = (occupancy & !bit_for_square(rook_from)) | bit_for_square(rook_to);
        }
        let king_after = if mv.from() == king { mv.to() } else { king };

        !self.attacked_with(king_after, color.opponent(), occupancy, victim_bit)
    }

    /// The king may not castle out of check or across an attacked square.
    pub(crate) fn castling_path_safe(&self, mv: Move) -> bool {
        let from = mv.from();
        let transit = Square(from.rank(), (from.file() + mv.to().file()) / 2);
        let enemy = self.side_to_move.opponent();
        !self.is_square_attacked(from, enemy) && !self.is_square_attacked(transit, enemy)
    }

    /// Whether any piece of `by` attacks `sq`, whoever is on move.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.attacked_with(sq, by, self.all_occupied.0, 0)
    }

    /// Attack test against a hypothetical occupancy, ignoring `by`'s pieces
    /// on the `removed` squares.
    fn attacked_with(&self, sq: Square, by: Color, occupancy: u64, removed: u64) -> bool {
        let idx = sq.index();
        let theirs = |piece: Piece| self.pieces(by, piece).0 & !removed;

        // A `by` pawn attacks sq from the squares a pawn of the other color on sq would attack
        if PAWN_ATTACKS[by.opponent().index()][idx] & theirs(Piece::Pawn) != 0 {
            return true;
        }
        if KNIGHT_ATTACKS[idx] & theirs(Piece::Knight) != 0 {
            return true;
        }
        if KING_ATTACKS[idx] & theirs(Piece::King) != 0 {
            return true;
        }
        let queens = theirs(Piece::Queen);
        if bishop_attacks(idx, occupancy) & (theirs(Piece::Bishop) | queens) != 0 {
            return true;
        }
        rook_attacks(idx, occupancy) & (theirs(Piece::Rook) | queens) != 0
    }

    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, color.opponent()))
    }

    /// Mate and stalemate come from the legal move list; otherwise the draw
    /// rules are consulted.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.generate_moves().is_empty() {
            if self.is_in_check(self.side_to_move) {
                GameStatus::Checkmate {
                    winner: self.side_to_move.opponent(),
                }
            } else {
                GameStatus::Stalemate
            }
        } else {
            self.draw_by_rule().unwrap_or(GameStatus::InProgress)
        }
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        matches!(self.status(), GameStatus::Checkmate { .. })
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.status() == GameStatus::Stalemate
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            let info = self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move(mv, info);
        }
        nodes
    }
}
