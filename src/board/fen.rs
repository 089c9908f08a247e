use std::str::FromStr;

use super::error::FenError;
use super::{Board, CastlingRights, Color, Piece, Square};

/// FEN of the standard initial position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a position from FEN.
    ///
    /// The halfmove clock and fullmove number are optional and default to
    /// `0` and `1`. Each side must have exactly one king, and an en-passant
    /// square must sit on the rank the side to move would capture onto.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut board = Board::empty();
        parse_placement(&mut board, parts[0])?;

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        board.castling_rights = parse_castling(parts[2])?;
        board.en_passant_target = parse_en_passant(parts[3], board.side_to_move)?;

        if let Some(field) = parts.get(4) {
            board.halfmove_clock = parse_counter("halfmove clock", field)?;
        }
        if let Some(field) = parts.get(5) {
            board.fullmove_number = parse_counter("fullmove number", field)?.max(1);
        }

        for color in Color::BOTH {
            let count = board.pieces(color, Piece::King).popcount();
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }

        board.refresh_hash();
        Ok(board)
    }

    /// Six-field FEN of the current position.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square(rank, file)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{placement} {active} {} {ep} {} {}",
            self.castling_rights, self.halfmove_clock, self.fullmove_number
        )
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as usize;
            } else {
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if file >= 8 {
                    return Err(FenError::TooManyFiles {
                        rank: rank + 1,
                        files: file + 1,
                    });
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                board.set_piece(Square(rank, file), color, piece);
                file += 1;
            }
        }
        match file {
            8 => {}
            files if files > 8 => {
                return Err(FenError::TooManyFiles {
                    rank: rank + 1,
                    files,
                })
            }
            files => {
                return Err(FenError::TooFewFiles {
                    rank: rank + 1,
                    files,
                })
            }
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        match c {
            'K' => rights.set(Color::White, true),
            'Q' => rights.set(Color::White, false),
            'k' => rights.set(Color::Black, true),
            'q' => rights.set(Color::Black, false),
            _ => return Err(FenError::InvalidCastling { char: c }),
        }
    }
    Ok(rights)
}

fn parse_en_passant(field: &str, side: Color) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let invalid = || FenError::InvalidEnPassant {
        found: field.to_string(),
    };
    let sq: Square = field.parse().map_err(|_| invalid())?;
    // White captures onto rank 6, Black onto rank 3
    let expected_rank = match side {
        Color::White => 5,
        Color::Black => 2,
    };
    if sq.rank() == expected_rank {
        Ok(Some(sq))
    } else {
        Err(invalid())
    }
}

fn parse_counter(field: &'static str, text: &str) -> Result<u32, FenError> {
    text.parse().map_err(|_| FenError::InvalidCounter {
        field,
        found: text.to_string(),
    })
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}
