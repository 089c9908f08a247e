//! Position evaluators consumed by the search.
//!
//! Every evaluator scores from White's point of view: positive values favour
//! White. The search flips the sign for Black to move, so implementations
//! never need to know whose turn it is.

use std::convert::Infallible;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Board, Color, Piece};

/// Maps a position to a white-positive score in centipawns.
pub trait Evaluator {
    /// Failure reported by the evaluator; the search hands it back unchanged.
    type Error;

    fn evaluate(&self, board: &Board) -> Result<i32, Self::Error>;
}

/// Plain closures are infallible evaluators.
impl<F> Evaluator for F
where
    F: Fn(&Board) -> i32,
{
    type Error = Infallible;

    fn evaluate(&self, board: &Board) -> Result<i32, Self::Error> {
        Ok(self(board))
    }
}

/// Material count: P=100, N=320, B=330, R=500, Q=900.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    #[must_use]
    pub fn score(board: &Board) -> i32 {
        Piece::ALL
            .into_iter()
            .map(|piece| {
                let white = board.pieces(Color::White, piece).popcount() as i32;
                let black = board.pieces(Color::Black, piece).popcount() as i32;
                piece.value() * (white - black)
            })
            .sum()
    }
}

impl Evaluator for MaterialEvaluator {
    type Error = Infallible;

    fn evaluate(&self, board: &Board) -> Result<i32, Self::Error> {
        Ok(Self::score(board))
    }
}

/// Length of the model input vector: 12 piece planes of 64 squares, the side
/// to move, and four castling flags.
pub const FEATURE_COUNT: usize = 12 * 64 + 5;

const SIDE_FEATURE: usize = 12 * 64;

/// Encode a position as the model input vector.
///
/// Plane `p` covers White's pawn..king for `p` in 0..6 and Black's for 6..12.
/// Within a plane squares run a8, b8, .., h8, a7, .., h1. Then follow the
/// side to move (+1 White, -1 Black) and the K, Q, k, q castling flags.
#[must_use]
pub fn encode_features(board: &Board) -> Vec<f32> {
    let mut features = vec![0.0f32; FEATURE_COUNT];
    for color in Color::BOTH {
        for piece in Piece::ALL {
            let plane = color.index() * 6 + piece.index();
            for sq in board.pieces(color, piece).iter() {
                let cell = (7 - sq.rank()) * 8 + sq.file();
                features[plane * 64 + cell] = 1.0;
            }
        }
    }
    features[SIDE_FEATURE] = match board.side_to_move() {
        Color::White => 1.0,
        Color::Black => -1.0,
    };
    let rights = board.castling_rights();
    let flags = [
        rights.has(Color::White, true),
        rights.has(Color::White, false),
        rights.has(Color::Black, true),
        rights.has(Color::Black, false),
    ];
    for (offset, flag) in flags.into_iter().enumerate() {
        features[SIDE_FEATURE + 1 + offset] = if flag { 1.0 } else { 0.0 };
    }
    features
}

/// Errors from constructing or loading a model-backed evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The weight vector does not match `FEATURE_COUNT`
    DimensionMismatch { expected: usize, found: usize },
    /// A weight, bias or scale is NaN or infinite
    NonFinite { what: &'static str },
    /// A network layer's weight or bias shape does not chain with its input
    LayerShape {
        layer: usize,
        expected: usize,
        found: usize,
    },
    /// Model file could not be decoded
    Parse { message: String },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DimensionMismatch { expected, found } => {
                write!(f, "Model expects {expected} weights, found {found}")
            }
            EvalError::NonFinite { what } => write!(f, "Model {what} is not finite"),
            EvalError::LayerShape {
                layer,
                expected,
                found,
            } => write!(f, "Layer {layer} expects width {expected}, found {found}"),
            EvalError::Parse { message } => write!(f, "Could not parse model: {message}"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Single-layer model over `encode_features`: `scale * tanh(w . x + b)`.
///
/// The output lies in `[-scale, scale]` centipawns, white-positive.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearEvaluator {
    weights: Vec<f32>,
    bias: f32,
    scale: f32,
}

impl LinearEvaluator {
    pub const DEFAULT_SCALE: f32 = 1000.0;

    pub fn new(weights: Vec<f32>, bias: f32, scale: f32) -> Result<Self, EvalError> {
        let model = LinearEvaluator {
            weights,
            bias,
            scale,
        };
        model.validate()?;
        Ok(model)
    }

    /// A model that rates positions by material only, expressed as weights.
    #[must_use]
    pub fn from_material() -> Self {
        let mut weights = vec![0.0f32; FEATURE_COUNT];
        for color in Color::BOTH {
            let sign = color.sign() as f32;
            for piece in Piece::ALL {
                let plane = color.index() * 6 + piece.index();
                let value = sign * piece.value() as f32 / Self::DEFAULT_SCALE;
                weights[plane * 64..(plane + 1) * 64].fill(value);
            }
        }
        LinearEvaluator {
            weights,
            bias: 0.0,
            scale: Self::DEFAULT_SCALE,
        }
    }

    /// Load `{"weights": [...], "bias": b, "scale": s}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, EvalError> {
        let model: LinearEvaluator = serde_json::from_str(json).map_err(|e| EvalError::Parse {
            message: e.to_string(),
        })?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), EvalError> {
        if self.weights.len() != FEATURE_COUNT {
            return Err(EvalError::DimensionMismatch {
                expected: FEATURE_COUNT,
                found: self.weights.len(),
            });
        }
        if !self.weights.iter().all(|w| w.is_finite()) {
            return Err(EvalError::NonFinite { what: "weight" });
        }
        if !self.bias.is_finite() {
            return Err(EvalError::NonFinite { what: "bias" });
        }
        if !self.scale.is_finite() {
            return Err(EvalError::NonFinite { what: "scale" });
        }
        Ok(())
    }
}

impl Evaluator for LinearEvaluator {
    type Error = EvalError;

    fn evaluate(&self, board: &Board) -> Result<i32, Self::Error> {
        let features = encode_features(board);
        // Deserialized values skip `new`, so the length is checked per call
        if features.len() != self.weights.len() {
            return Err(EvalError::DimensionMismatch {
                expected: features.len(),
                found: self.weights.len(),
            });
        }
        let activation: f32 = self
            .weights
            .iter()
            .zip(&features)
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.bias;
        Ok((self.scale * activation.tanh()).round() as i32)
    }
}

/// One fully connected layer. `weights` has one row per output, each row as
/// wide as the layer's input (the `[out, in]` layout of a PyTorch `Linear`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layer {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

impl Layer {
    fn forward(&self, input: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect()
    }
}

/// Feed-forward network over `encode_features`: ReLU between layers, a
/// single tanh output, and `scale` centipawns at full confidence.
///
/// The layer chain must start at `FEATURE_COUNT` inputs and end in one
/// output. The default shape is 773-256-256-1.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MlpEvaluator {
    layers: Vec<Layer>,
    scale: f32,
}

impl MlpEvaluator {
    pub const HIDDEN_WIDTH: usize = 256;

    pub fn new(layers: Vec<Layer>, scale: f32) -> Result<Self, EvalError> {
        let model = MlpEvaluator { layers, scale };
        model.validate()?;
        Ok(model)
    }

    /// Load `{"layers": [{"weights": [[...]], "bias": [...]}, ..], "scale": s}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, EvalError> {
        let model: MlpEvaluator = serde_json::from_str(json).map_err(|e| EvalError::Parse {
            message: e.to_string(),
        })?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), EvalError> {
        if self.layers.is_empty() {
            return Err(EvalError::LayerShape {
                layer: 0,
                expected: 1,
                found: 0,
            });
        }
        let mut width = FEATURE_COUNT;
        for (index, layer) in self.layers.iter().enumerate() {
            if let Some(row) = layer.weights.iter().find(|row| row.len() != width) {
                return Err(EvalError::LayerShape {
                    layer: index,
                    expected: width,
                    found: row.len(),
                });
            }
            if layer.bias.len() != layer.weights.len() {
                return Err(EvalError::LayerShape {
                    layer: index,
                    expected: layer.weights.len(),
                    found: layer.bias.len(),
                });
            }
            if !layer.weights.iter().flatten().chain(&layer.bias).all(|w| w.is_finite()) {
                return Err(EvalError::NonFinite { what: "weight" });
            }
            width = layer.weights.len();
        }
        if width != 1 {
            return Err(EvalError::LayerShape {
                layer: self.layers.len() - 1,
                expected: 1,
                found: width,
            });
        }
        if !self.scale.is_finite() {
            return Err(EvalError::NonFinite { what: "scale" });
        }
        Ok(())
    }
}

impl Evaluator for MlpEvaluator {
    type Error = EvalError;

    fn evaluate(&self, board: &Board) -> Result<i32, Self::Error> {
        let mut activations = encode_features(board);
        for (index, layer) in self.layers.iter().enumerate() {
            if index > 0 {
                activations.iter_mut().for_each(|a| *a = a.max(0.0));
            }
            activations = layer.forward(&activations);
        }
        // Deserialized values skip `new`, so an empty output is still possible
        let output = activations.first().copied().ok_or(EvalError::LayerShape {
            layer: self.layers.len(),
            expected: 1,
            found: 0,
        })?;
        Ok((self.scale * output.tanh()).round() as i32)
    }
}
