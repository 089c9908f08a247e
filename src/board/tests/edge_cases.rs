//! Edge case tests for special chess positions and moves.

use super::{board, sq};
use crate::board::{
    Board, Color, FenError, GameStatus, IllegalMoveError, Move, MoveInputError, Piece, Square,
};

#[test]
fn test_stalemate_position() {
    let board = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!board.is_checkmate());
    assert!(board.is_stalemate());
    assert!(board.generate_moves().is_empty());
    assert_eq!(board.status(), GameStatus::Stalemate);
}

#[test]
fn test_underpromotions_available() {
    let mut board = board("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let promotions: Vec<Piece> = board
        .generate_moves()
        .into_iter()
        .filter_map(|m| m.promotion())
        .collect();
    assert_eq!(promotions.len(), 4);
    for piece in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
        assert!(promotions.contains(&piece), "{piece:?} promotion missing");
    }

    board.play_move_str("a7a8n").unwrap();
    assert_eq!(board.piece_at(sq("a8")), Some((Color::White, Piece::Knight)));
}

#[test]
fn test_promotion_defaults_to_queen() {
    let board = board("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let mv = board.parse_move("a7a8").unwrap();
    assert_eq!(mv.promotion(), Some(Piece::Queen));
}

#[test]
fn test_promotion_suffix_on_ordinary_move_is_rejected() {
    let board = Board::new();
    assert!(matches!(
        board.parse_move("e2e4q"),
        Err(MoveInputError::Illegal(IllegalMoveError::UnexpectedPromotion { .. }))
    ));
}

#[test]
fn test_en_passant_removes_correct_pawn() {
    let mut board = board("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1");
    let mv = board
        .generate_moves()
        .into_iter()
        .find(|m| m.is_en_passant())
        .expect("en passant should be available");

    let info = board.make_move(mv);
    assert!(board.piece_at(sq("d5")).is_none(), "captured pawn removed");
    assert_eq!(board.piece_at(sq("d6")), Some((Color::White, Piece::Pawn)));

    board.unmake_move(mv, info);
    assert_eq!(board.piece_at(sq("d5")), Some((Color::Black, Piece::Pawn)));
    assert_eq!(board.piece_at(sq("e5")), Some((Color::White, Piece::Pawn)));
}

#[test]
fn test_en_passant_only_immediately() {
    let mut board = board("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1");
    board.play_move_str("g1f3").unwrap();
    board.play_move_str("g8f6").unwrap();
    assert!(!board.generate_moves().into_iter().any(|m| m.is_en_passant()));
}

#[test]
fn test_en_passant_exposing_king_is_illegal() {
    // Capturing on d6 would clear the fifth rank between the rook and king
    let board = board("8/8/8/r2pP2K/8/8/8/4k3 w - d6 0 1");
    assert!(!board.generate_moves().into_iter().any(|m| m.is_en_passant()));
}

#[test]
fn test_castling_blocked_by_check() {
    let board = board("r3k2r/8/8/8/4Q3/8/8/R3K2R b KQkq - 0 1");
    assert!(board.is_in_check(Color::Black));
    assert!(!board.generate_moves().into_iter().any(|m| m.is_castling()));
}

#[test]
fn test_castling_through_attacked_square() {
    // The f8 rook covers f1, so only the queenside castle remains
    let board = board("r4rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let castles: Vec<Move> = board
        .generate_moves()
        .into_iter()
        .filter(|m| m.is_castling())
        .collect();
    assert_eq!(castles.len(), 1);
    assert!(castles[0].is_castle_queenside());

    let kingside = Move::castle_kingside(sq("e1"), sq("g1"));
    assert_eq!(
        board.validate_move(kingside),
        Err(IllegalMoveError::CastlesThroughCheck { mv: kingside })
    );
}

#[test]
fn test_double_check_only_king_can_move() {
    // Knight on f3 and rook on e8 both give check; the bishop could block
    // or capture either checker alone, but not both
    let board = board("4r1k1/8/8/8/8/5n2/3B4/4K3 w - - 0 1");
    let moves = board.generate_moves();
    assert!(!moves.is_empty());
    for mv in moves.iter() {
        assert_eq!(mv.from(), sq("e1"), "only the king may move in double check");
    }
}

#[test]
fn test_checkmate_back_rank() {
    let mut board = board("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    board.play_move_str("a1a8").unwrap();
    assert!(board.is_checkmate());
    assert_eq!(
        board.status(),
        GameStatus::Checkmate {
            winner: Color::White
        }
    );
}

#[test]
fn test_fen_parsing_errors() {
    assert_eq!(
        Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
        Err(FenError::TooFewParts { found: 1 })
    );
    assert_eq!(
        Board::from_fen("rnbxkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        Err(FenError::InvalidPiece { char: 'x' })
    );
    assert!(matches!(
        Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
        Err(FenError::InvalidSideToMove { .. })
    ));
    assert!(matches!(
        Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XYZ - 0 1"),
        Err(FenError::InvalidCastling { .. })
    ));
    assert!(matches!(
        Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1"),
        Err(FenError::InvalidEnPassant { .. })
    ));
    assert_eq!(
        Board::from_fen("8/8/8/8/8/8/8/K7 w - - 0 1"),
        Err(FenError::KingCount {
            color: Color::Black,
            count: 0
        })
    );
}

#[test]
fn test_fen_clock_fields_are_optional() {
    let board = board("4k3/8/8/8/8/8/8/4K3 b - -");
    assert_eq!(board.halfmove_clock(), 0);
    assert_eq!(board.fullmove_number(), 1);
    assert_eq!(board.to_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
}

#[test]
fn test_square_parsing() {
    assert_eq!("a1".parse::<Square>().unwrap(), Square(0, 0));
    assert_eq!("h8".parse::<Square>().unwrap(), Square(7, 7));
    assert_eq!("e4".parse::<Square>().unwrap(), Square(3, 4));

    for bad in ["i1", "a9", "", "a"] {
        assert!(bad.parse::<Square>().is_err(), "{bad:?}");
    }
    assert!(Square::try_from((7, 7)).is_ok());
    assert!(Square::try_from((8, 0)).is_err());
    assert!(Square::try_from((0, 8)).is_err());
}

#[test]
fn test_move_flags() {
    let capture = Move::capture(sq("d4"), sq("e5"));
    assert!(capture.is_capture());
    assert!(!capture.is_promotion());
    assert!(capture.is_tactical());

    let promo = Move::new_promotion(sq("a7"), sq("a8"), Piece::Queen);
    assert!(!promo.is_capture());
    assert!(promo.is_tactical());
    assert_eq!(promo.promotion(), Some(Piece::Queen));
    assert_eq!(promo.to_string(), "a7a8q");

    let ep = Move::en_passant(sq("e5"), sq("f6"));
    assert!(ep.is_capture());
    assert!(ep.is_en_passant());

    let push = Move::double_pawn_push(sq("e2"), sq("e4"));
    assert!(push.is_double_pawn_push());
    assert!(!push.is_tactical());
}

#[test]
fn test_board_from_str() {
    let board: Board = crate::board::STARTING_FEN.parse().unwrap();
    assert_eq!(board, Board::new());
    assert!("invalid fen".parse::<Board>().is_err());
}
