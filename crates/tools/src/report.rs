use std::fmt::Write as _;

use data_contracts::PredictionRecord;
use inference::Recognition;

/// Console report: predicted digit followed by one probability per line.
pub fn render_text(recognition: &Recognition) -> String {
    let prediction = &recognition.prediction;
    let mut out = String::new();
    let _ = writeln!(out, "Predicted digit index: {}", prediction.class);
    let _ = writeln!(out, "Probabilities:");
    for (digit, p) in prediction.probabilities.as_slice().iter().enumerate() {
        let _ = writeln!(out, "  {digit}: {p:.6}");
    }
    out
}

pub fn render_json(recognition: &Recognition) -> serde_json::Result<String> {
    let record =
        PredictionRecord::from_prediction(&recognition.prediction, Some(recognition.inference_ms));
    serde_json::to_string(&record)
}
