use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use vision_core::interfaces::{IMAGE_HEIGHT, IMAGE_WIDTH, NUM_CLASSES};

/// NCHW input shape every classifier artifact must declare.
pub const EXPECTED_INPUT_SHAPE: [usize; 4] = [1, 1, IMAGE_HEIGHT, IMAGE_WIDTH];
/// Logit output shape every classifier artifact must declare.
pub const EXPECTED_OUTPUT_SHAPE: [usize; 2] = [1, NUM_CLASSES];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ModelManifestSchemaVersion {
    V1,
}

/// Hyperparameters of the convolutional classifier stored in a checkpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchitectureSpec {
    pub conv1_channels: usize,
    pub conv2_channels: usize,
    pub kernel_size: usize,
}

impl Default for ArchitectureSpec {
    fn default() -> Self {
        Self {
            conv1_channels: 8,
            conv2_channels: 16,
            kernel_size: 5,
        }
    }
}

/// Sidecar JSON describing a classifier checkpoint (`<model>.json` next to
/// `<model>.bin`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelManifest {
    pub schema_version: ModelManifestSchemaVersion,
    pub input_shape: Vec<usize>,
    pub output_shape: Vec<usize>,
    #[serde(default)]
    pub architecture: ArchitectureSpec,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("input shape {0:?} does not match {:?}", EXPECTED_INPUT_SHAPE)]
    InputShape(Vec<usize>),
    #[error("output shape {0:?} does not match {:?}", EXPECTED_OUTPUT_SHAPE)]
    OutputShape(Vec<usize>),
    #[error("channel counts must be non-zero: conv1={conv1}, conv2={conv2}")]
    ZeroChannels { conv1: usize, conv2: usize },
    #[error("kernel_size must be odd and non-zero, got {0}")]
    InvalidKernel(usize),
}

impl ModelManifest {
    pub fn new(architecture: ArchitectureSpec) -> Self {
        Self {
            schema_version: ModelManifestSchemaVersion::V1,
            input_shape: EXPECTED_INPUT_SHAPE.to_vec(),
            output_shape: EXPECTED_OUTPUT_SHAPE.to_vec(),
            architecture,
        }
    }

    /// Manifest path for a checkpoint path (`digit_net.bin` -> `digit_net.json`).
    pub fn path_for(checkpoint: &Path) -> PathBuf {
        checkpoint.with_extension("json")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.input_shape != EXPECTED_INPUT_SHAPE {
            return Err(ValidationError::InputShape(self.input_shape.clone()));
        }
        if self.output_shape != EXPECTED_OUTPUT_SHAPE {
            return Err(ValidationError::OutputShape(self.output_shape.clone()));
        }
        let arch = &self.architecture;
        if arch.conv1_channels == 0 || arch.conv2_channels == 0 {
            return Err(ValidationError::ZeroChannels {
                conv1: arch.conv1_channels,
                conv2: arch.conv2_channels,
            });
        }
        if arch.kernel_size % 2 == 0 {
            return Err(ValidationError::InvalidKernel(arch.kernel_size));
        }
        Ok(())
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
