#![recursion_limit = "256"]

pub mod factory;
pub mod recognizer;

#[cfg(feature = "backend-wgpu")]
pub type InferenceBackend = burn_wgpu::Wgpu<f32>;
#[cfg(not(feature = "backend-wgpu"))]
pub type InferenceBackend = burn_ndarray::NdArray<f32>;

pub use factory::{write_checkpoint, BurnDigitClassifier, InferenceFactory};
pub use recognizer::{Recognition, Recognizer};

pub mod prelude {
    pub use crate::factory::{write_checkpoint, BurnDigitClassifier, InferenceFactory};
    pub use crate::recognizer::{Recognition, Recognizer};
    pub use crate::InferenceBackend;
}

#[cfg(test)]
mod tests {
    use super::*;
    use vision_core::interfaces::ModelLoadError;

    #[test]
    fn factory_rejects_missing_checkpoint() {
        let factory = InferenceFactory;
        let err = factory
            .build(std::path::Path::new("no/such/digit_net.bin"))
            .err()
            .expect("missing checkpoint must fail");
        assert!(matches!(err, ModelLoadError::NotFound(_)));
    }
}
