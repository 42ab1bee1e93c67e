//! Shared data contracts for model artifacts and prediction records.

pub mod model;
pub mod prediction;

pub use model::{
    ArchitectureSpec, ModelManifest, ModelManifestSchemaVersion, ValidationError,
    EXPECTED_INPUT_SHAPE, EXPECTED_OUTPUT_SHAPE,
};
pub use prediction::PredictionRecord;
