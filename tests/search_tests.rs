//! Search tests to verify the engine finds correct moves in various positions.

use alphabeta_chess::board::{
    iterative_deepening, minimax, search, search_parallel, Board, Color, GameStatus,
    LinearEvaluator, MaterialEvaluator, SearchError, SearchParams,
};
use alphabeta_chess::StopFlag;

fn best_move(fen: &str, depth: u32) -> String {
    let board = Board::from_fen(fen).expect("valid FEN");
    search(&board, &MaterialEvaluator, &SearchParams::with_depth(depth))
        .expect("search succeeds")
        .best_move
        .to_string()
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    assert_eq!(best_move("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", 3), "e1e8");
}

/// Test that the engine finds a simple mate in 1 with queen
#[test]
fn finds_mate_in_one_queen() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
    assert_eq!(best_move(fen, 3), "h5f7");
}

/// Test that the engine captures free material
#[test]
fn captures_hanging_queen() {
    let board = Board::from_fen("4k3/8/8/3q4/8/4N3/P7/4K3 w - - 0 1").unwrap();
    let report = search(&board, &MaterialEvaluator, &SearchParams::with_depth(2)).unwrap();
    assert_eq!(report.best_move.to_string(), "e3d5");
    assert_eq!(report.score, 420);
}

/// Test that search handles single legal move positions
#[test]
fn single_legal_move() {
    // Only the bishop can interpose on c1
    let fen = "7k/8/7B/8/8/8/6r1/K5r1 w - - 0 1";
    let board = Board::from_fen(fen).unwrap();
    assert_eq!(board.generate_moves().len(), 1);
    assert_eq!(best_move(fen, 3), "h6c1");
}

/// Test that search reports checkmate instead of a move
#[test]
fn no_move_in_checkmate() {
    let board =
        Board::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1").unwrap();
    assert!(board.is_checkmate(), "Position should be checkmate");

    let result = search(&board, &MaterialEvaluator, &SearchParams::with_depth(4));
    assert_eq!(
        result,
        Err(SearchError::Terminal(GameStatus::Checkmate {
            winner: Color::Black
        }))
    );
}

/// Test that stalemate is reported, not searched
#[test]
fn identifies_stalemate() {
    let board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(board.is_stalemate());
    assert_eq!(
        search(&board, &MaterialEvaluator, &SearchParams::default()),
        Err(SearchError::Terminal(GameStatus::Stalemate))
    );
}

/// Test search handles draw positions correctly
#[test]
fn handles_draw_by_repetition() {
    let mut board = Board::new();
    for mv in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
        board.play_move_str(mv).unwrap();
    }
    assert_eq!(board.status(), GameStatus::ThreefoldRepetition);
}

/// A closure is a valid evaluator, and its sign convention is white-positive
#[test]
fn closure_evaluator_is_white_positive() {
    // Scores only whose turn it is
    let tempo = |board: &Board| board.side_to_move().sign() * 10;
    let board = Board::new();
    let report = search(&board, &tempo, &SearchParams::with_depth(1).quiescence(0)).unwrap();
    // After White's move Black is to move, so every leaf scores -10 for White
    assert_eq!(report.score, -10);
}

#[test]
fn material_model_agrees_with_material_count() {
    let board =
        Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
            .unwrap();
    let params = SearchParams::with_depth(2).quiescence(1);
    let model = LinearEvaluator::from_material();
    let plain = search(&board, &MaterialEvaluator, &params).unwrap();
    let learned = search(&board, &model, &params).unwrap();
    assert_eq!(plain.score.signum(), learned.score.signum());
}

#[test]
fn alphabeta_and_minimax_agree() {
    for fen in [
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ] {
        let board = Board::from_fen(fen).unwrap();
        let params = SearchParams::with_depth(3).quiescence(2);
        let pruned = search(&board, &MaterialEvaluator, &params).unwrap();
        let reference = minimax(&board, &MaterialEvaluator, &params).unwrap();
        assert_eq!(pruned.best_move, reference.best_move, "{fen}");
        assert_eq!(pruned.score, reference.score, "{fen}");
    }
}

#[test]
fn parallel_and_iterative_agree_with_sequential() {
    let board = Board::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let params = SearchParams::with_depth(3).quiescence(1);
    let sequential = search(&board, &MaterialEvaluator, &params).unwrap();
    let parallel =
        search_parallel(&board, &MaterialEvaluator, &params, 4, &StopFlag::new()).unwrap();
    let deepened =
        iterative_deepening(&board, &MaterialEvaluator, &params, &StopFlag::new()).unwrap();

    assert_eq!(parallel.best_move, sequential.best_move);
    assert_eq!(parallel.score, sequential.score);
    assert_eq!(deepened.best_move, sequential.best_move);
    assert_eq!(deepened.score, sequential.score);
}

/// Test that search completes at reasonable depth
#[test]
fn search_completes_at_depth_three() {
    use std::time::{Duration, Instant};

    let board = Board::new();
    let start = Instant::now();
    let report = search(&board, &MaterialEvaluator, &SearchParams::with_depth(3)).unwrap();
    assert!(board.generate_moves().contains(report.best_move));
    assert!(
        start.elapsed() < Duration::from_secs(60),
        "Search at depth 3 took too long: {:?}",
        start.elapsed()
    );
}
