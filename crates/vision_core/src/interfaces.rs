use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::normalize::NormalizedImage;

/// Width of the classifier input grid.
pub const IMAGE_WIDTH: usize = 28;
/// Height of the classifier input grid.
pub const IMAGE_HEIGHT: usize = 28;
/// Total number of cells in a [`NormalizedImage`].
pub const IMAGE_PIXELS: usize = IMAGE_WIDTH * IMAGE_HEIGHT;
/// Number of digit classes the classifier scores.
pub const NUM_CLASSES: usize = 10;

/// Raw classifier scores, one per digit class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogitVector(pub [f32; NUM_CLASSES]);

impl LogitVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Softmax output; entries are non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityVector(pub [f32; NUM_CLASSES]);

impl ProbabilityVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Probability assigned to `class`.
    pub fn get(&self, class: PredictedClass) -> f32 {
        self.0[class.index()]
    }
}

/// Index of the winning digit class (0-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredictedClass(pub(crate) usize);

impl PredictedClass {
    /// Returns `None` when `index` is not a valid digit class.
    pub fn new(index: usize) -> Option<Self> {
        (index < NUM_CLASSES).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PredictedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of running the decision layer over one set of logits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub class: PredictedClass,
    pub probabilities: ProbabilityVector,
}

impl Prediction {
    /// Probability of the predicted class.
    pub fn confidence(&self) -> f32 {
        self.probabilities.get(self.class)
    }
}

/// Fatal startup failure while loading a classifier artifact.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model artifact not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model manifest {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },
    #[error("{tensor} shape mismatch: expected {expected:?}, found {actual:?}")]
    ShapeMismatch {
        tensor: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("failed to load model record {path}: {reason}")]
    Record { path: PathBuf, reason: String },
}

/// Recoverable per-request failure reported by the inference engine.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("engine fault during forward pass: {0}")]
    Engine(String),
    #[error("output shape mismatch: expected {expected:?}, found {actual:?}")]
    OutputShape {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("failed to read back output tensor: {0}")]
    Readback(String),
    #[error("classifier handle poisoned by an earlier panic")]
    HandlePoisoned,
}

/// A fixed-shape digit classifier: 1x1x28x28 in, 1x10 logits out.
///
/// Implementations own their input/output buffers for their whole lifetime, so
/// `classify` takes `&mut self` and only one call can be in flight per handle.
pub trait Classifier {
    /// Load a classifier from `model_path`, verifying the declared shapes.
    fn load(model_path: &Path) -> Result<Self, ModelLoadError>
    where
        Self: Sized;

    /// Run exactly one blocking forward pass over `image`.
    fn classify(&mut self, image: NormalizedImage) -> Result<LogitVector, InferenceError>;
}
