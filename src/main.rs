//! Play a game against the engine from the terminal.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use log::LevelFilter;

use alphabeta_chess::board::{
    search_parallel, Board, Color, EvalError, Evaluator, GameStatus, LinearEvaluator,
    MaterialEvaluator, MlpEvaluator, SearchParams, DEFAULT_DEPTH, DEFAULT_QUIESCENCE_DEPTH,
};
use alphabeta_chess::StopFlag;

const USAGE: &str = "usage: alphabeta_chess [--fen FEN] [--depth N] [--quiescence N] \
[--engine-color white|black] [--threads N] [--load-model PATH] [--verbose]";

struct Options {
    fen: Option<String>,
    depth: u32,
    quiescence: u32,
    engine_color: Color,
    threads: usize,
    model: Option<String>,
    verbose: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        fen: None,
        depth: DEFAULT_DEPTH,
        quiescence: DEFAULT_QUIESCENCE_DEPTH,
        engine_color: Color::Black,
        threads: 1,
        model: None,
        verbose: false,
    };
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or(format!("{name} needs a value"));
        match arg.as_str() {
            "--fen" => options.fen = Some(value("--fen")?),
            "--depth" => options.depth = parse_number(&value("--depth")?)?,
            "--quiescence" => options.quiescence = parse_number(&value("--quiescence")?)?,
            "--threads" => options.threads = parse_number(&value("--threads")?)?,
            "--engine-color" => {
                options.engine_color = match value("--engine-color")?.as_str() {
                    "white" => Color::White,
                    "black" => Color::Black,
                    other => return Err(format!("unknown engine color '{other}'")),
                }
            }
            "--load-model" => options.model = Some(value("--load-model")?),
            "--verbose" | "-v" => options.verbose = true,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(options)
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, String> {
    text.parse().map_err(|_| format!("'{text}' is not a valid number"))
}

/// `RUST_LOG` configures the logger; `--verbose` raises it to debug.
fn logger(verbose: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder
}

/// Material count, or a model loaded with `--load-model`.
enum Engine {
    Material,
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    Linear(LinearEvaluator),
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    Network(MlpEvaluator),
}

impl Evaluator for Engine {
    type Error = EvalError;

    fn evaluate(&self, board: &Board) -> Result<i32, Self::Error> {
        match self {
            Engine::Material => Ok(MaterialEvaluator::score(board)),
            Engine::Linear(model) => model.evaluate(board),
            Engine::Network(model) => model.evaluate(board),
        }
    }
}

/// A file with `layers` is a network; otherwise it must be a linear model.
#[cfg(feature = "serde")]
fn load_model(path: &str) -> Result<Engine, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    match MlpEvaluator::from_json(&json) {
        Ok(network) => Ok(Engine::Network(network)),
        Err(EvalError::Parse { .. }) => LinearEvaluator::from_json(&json)
            .map(Engine::Linear)
            .map_err(|e| format!("{path}: {e}")),
        Err(e) => Err(format!("{path}: {e}")),
    }
}

#[cfg(not(feature = "serde"))]
fn load_model(_path: &str) -> Result<Engine, String> {
    Err("model loading requires the `serde` feature".to_string())
}

fn announce(status: GameStatus) {
    match status {
        GameStatus::Checkmate { winner } => println!("Checkmate! {winner:?} wins."),
        GameStatus::Stalemate => println!("Stalemate."),
        other => println!("Draw: {other}."),
    }
}

fn play(options: &Options, engine: &Engine) -> Result<(), String> {
    let mut board = match &options.fen {
        Some(fen) => Board::from_fen(fen).map_err(|e| format!("bad FEN: {e}"))?,
        None => Board::new(),
    };
    let params = SearchParams::with_depth(options.depth).quiescence(options.quiescence);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{board}");
        println!("Side to move: {:?}", board.side_to_move());
        let status = board.status();
        if status.is_terminal() {
            announce(status);
            return Ok(());
        }

        if board.side_to_move() == options.engine_color {
            let report = search_parallel(&board, engine, &params, options.threads, &StopFlag::new())
                .map_err(|e| format!("engine failed: {e}"))?;
            board.make_move(report.best_move);
            match report.mate_in() {
                Some(moves) => println!("Engine plays: {} (mate in {moves})", report.best_move),
                None => println!("Engine plays: {} (eval {})", report.best_move, report.score),
            }
            continue;
        }

        print!("Your move (e.g. e2e4, 'quit' to exit): ");
        io::stdout().flush().map_err(|e| e.to_string())?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.map_err(|e| e.to_string())?;
        let input = line.trim().to_ascii_lowercase();
        if matches!(input.as_str(), "quit" | "exit" | "resign") {
            println!("Game ended by user.");
            return Ok(());
        }
        if let Err(err) = board.play_move_str(&input) {
            println!("{err}; try again.");
        }
    }
}

fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    logger(options.verbose).init();

    let engine = match &options.model {
        Some(path) => match load_model(path) {
            Ok(engine) => engine,
            Err(message) => {
                eprintln!("{message}");
                return ExitCode::FAILURE;
            }
        },
        None => Engine::Material,
    };

    match play(&options, &engine) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn verbose_enables_debug_logging() {
        assert!(logger(true).build().filter() >= LevelFilter::Debug);
    }

    #[test]
    fn parses_engine_options() {
        let options = parse_args(args(&[
            "--depth",
            "4",
            "--engine-color",
            "white",
            "--threads",
            "2",
            "-v",
        ]))
        .unwrap();
        assert_eq!(options.depth, 4);
        assert_eq!(options.engine_color, Color::White);
        assert_eq!(options.threads, 2);
        assert!(options.verbose);
        assert_eq!(options.quiescence, DEFAULT_QUIESCENCE_DEPTH);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(args(&["--depth"])).is_err());
        assert!(parse_args(args(&["--depth", "deep"])).is_err());
        assert!(parse_args(args(&["--engine-color", "green"])).is_err());
        assert!(parse_args(args(&["--ponder"])).is_err());
    }
}
