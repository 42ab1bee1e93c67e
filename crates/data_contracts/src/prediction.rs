use serde::{Deserialize, Serialize};
use vision_core::interfaces::Prediction;

/// One recognition result as emitted by the tools (`--json`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRecord {
    pub digit: usize,
    pub confidence: f32,
    pub probabilities: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_ms: Option<f32>,
}

impl PredictionRecord {
    pub fn from_prediction(prediction: &Prediction, inference_ms: Option<f32>) -> Self {
        Self {
            digit: prediction.class.index(),
            confidence: prediction.confidence(),
            probabilities: prediction.probabilities.as_slice().to_vec(),
            inference_ms,
        }
    }
}
