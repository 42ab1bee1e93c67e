use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use vision_core::capture::RawCapture;
use vision_core::decision::decide;
use vision_core::interfaces::{Classifier, InferenceError, ModelLoadError, Prediction};
use vision_core::normalize::normalize;

use crate::factory::InferenceFactory;

/// Outcome of one recognition request.
#[derive(Debug, Clone, Copy)]
pub struct Recognition {
    pub prediction: Prediction,
    pub inference_ms: f32,
}

/// Capture -> normalize -> classify -> decide, one request at a time.
///
/// The classifier reuses its buffers across calls, so it sits behind a mutex;
/// concurrent callers are serialized rather than interleaved.
pub struct Recognizer {
    classifier: Mutex<Box<dyn Classifier + Send>>,
}

impl Recognizer {
    pub fn new(classifier: impl Classifier + Send + 'static) -> Self {
        Self::from_boxed(Box::new(classifier))
    }

    pub fn from_boxed(classifier: Box<dyn Classifier + Send>) -> Self {
        Self {
            classifier: Mutex::new(classifier),
        }
    }

    /// Load the checkpoint at `model_path` on the default backend.
    pub fn load(model_path: &Path) -> Result<Self, ModelLoadError> {
        InferenceFactory.build(model_path).map(Self::from_boxed)
    }

    pub fn recognize(&self, capture: &RawCapture<'_>) -> Result<Recognition, InferenceError> {
        let image = normalize(capture);
        let mut classifier = self
            .classifier
            .lock()
            .map_err(|_| InferenceError::HandlePoisoned)?;
        let start = Instant::now();
        let logits = classifier.classify(image)?;
        let inference_ms = start.elapsed().as_secs_f32() * 1000.0;
        drop(classifier);

        let prediction = decide(&logits);
        tracing::debug!(
            digit = prediction.class.index(),
            confidence = prediction.confidence(),
            inference_ms,
            "recognized capture {}x{}",
            capture.width(),
            capture.height()
        );
        Ok(Recognition {
            prediction,
            inference_ms,
        })
    }
}
