//! Make/unmake move tests.

use super::{board, find_move, sq};
use crate::board::{Board, Color, IllegalMoveError, Move, Piece, UnmakeInfo};
use rand::prelude::*;

#[test]
fn test_en_passant_make_unmake() {
    let mut board = board("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let original = board.clone();
    let mv = find_move(&board, "e5", "f6", None);
    assert!(mv.is_en_passant());

    let info = board.make_move(mv);
    assert_eq!(info.captured(), Some((Color::Black, Piece::Pawn)));
    assert!(board.piece_at(sq("f5")).is_none());
    assert_eq!(board.piece_at(sq("f6")), Some((Color::White, Piece::Pawn)));

    board.unmake_move(mv, info);
    assert_eq!(board, original);
    assert_eq!(board.hash(), original.hash());
    assert_eq!(board.en_passant_target(), Some(sq("f6")));
}

#[test]
fn test_promotion_make_unmake() {
    let mut board = board("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let original_hash = board.hash();
    let mv = find_move(&board, "a7", "a8", Some(Piece::Queen));

    let info = board.make_move(mv);
    assert_eq!(board.piece_at(sq("a8")), Some((Color::White, Piece::Queen)));
    board.unmake_move(mv, info);

    assert_eq!(board.hash(), original_hash);
    assert_eq!(board.piece_at(sq("a7")), Some((Color::White, Piece::Pawn)));
    assert!(board.piece_at(sq("a8")).is_none());
}

#[test]
fn test_castling_moves_rook_and_clears_rights() {
    let mut board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let original = board.clone();
    let mv = find_move(&board, "e1", "g1", None);
    assert!(mv.is_castle_kingside());

    let info = board.make_move(mv);
    assert_eq!(board.piece_at(sq("f1")), Some((Color::White, Piece::Rook)));
    assert!(board.piece_at(sq("h1")).is_none());
    assert!(!board.castling_rights().has(Color::White, true));
    assert!(!board.castling_rights().has(Color::White, false));
    assert!(board.castling_rights().has(Color::Black, true));

    board.unmake_move(mv, info);
    assert_eq!(board, original);
}

#[test]
fn test_rook_capture_on_corner_revokes_right() {
    let mut board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    board.play(find_move(&board, "a1", "a8", None)).unwrap();
    assert_eq!(board.castling_rights().to_string(), "Kk");
}

#[test]
fn test_double_push_sets_en_passant_target() {
    let mut board = Board::new();
    board.play_move_str("e2e4").unwrap();
    assert_eq!(board.en_passant_target(), Some(sq("e3")));
    board.play_move_str("g8f6").unwrap();
    assert_eq!(board.en_passant_target(), None);
    assert_eq!(board.fullmove_number(), 2);
    assert_eq!(board.halfmove_clock(), 1);
}

#[test]
fn test_apply_leaves_original_untouched() {
    let board = Board::new();
    let mv = find_move(&board, "g1", "f3", None);
    let next = board.apply(mv).unwrap();
    assert_eq!(board, Board::new());
    assert_eq!(next.side_to_move(), Color::Black);
    assert_eq!(next.piece_at(sq("f3")), Some((Color::White, Piece::Knight)));
}

#[test]
fn test_play_rejects_illegal_moves() {
    let mut board = Board::new();
    let before = board.clone();

    assert_eq!(
        board.play(Move::quiet(sq("e3"), sq("e4"))).unwrap_err(),
        IllegalMoveError::EmptySource { square: sq("e3") }
    );
    assert!(matches!(
        board.play(Move::quiet(sq("e7"), sq("e5"))),
        Err(IllegalMoveError::WrongSide { .. })
    ));
    assert!(matches!(
        board.play(Move::quiet(sq("e2"), sq("e5"))),
        Err(IllegalMoveError::NotPseudoLegal { .. })
    ));
    assert_eq!(board, before);
}

#[test]
fn test_pinned_piece_cannot_move() {
    let board = board("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
    let knight_moves = board
        .generate_moves()
        .into_iter()
        .filter(|m| m.from() == sq("e2"))
        .count();
    assert_eq!(knight_moves, 0);
    assert!(matches!(
        board.validate_move(Move::quiet(sq("e2"), sq("c3"))),
        Err(IllegalMoveError::LeavesKingInCheck { .. })
    ));
}

#[test]
fn test_legal_moves_stable_after_make_unmake() {
    let mut board = Board::new();
    let initial: Vec<Move> = board.generate_moves().into_iter().collect();

    for &mv in &initial {
        let info = board.make_move(mv);
        board.unmake_move(mv, info);
    }

    let after: Vec<Move> = board.generate_moves().into_iter().collect();
    assert_eq!(initial, after);
}

#[test]
fn test_random_playout_round_trip_state() {
    let mut board = Board::new();
    let initial = board.clone();
    let initial_fen = board.to_fen();

    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut history: Vec<(Move, UnmakeInfo)> = Vec::new();

    for _ in 0..200 {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
        let info = board.make_move(mv);
        history.push((mv, info));
        assert_eq!(board.hash(), board.compute_hash());
    }

    while let Some((mv, info)) = history.pop() {
        board.unmake_move(mv, info);
        assert_eq!(board.hash(), board.compute_hash());
    }

    assert_eq!(board, initial);
    assert_eq!(board.to_fen(), initial_fen);
    assert_eq!(board.repetition_count(), 1);
}
