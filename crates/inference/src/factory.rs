use crate::InferenceBackend;
use burn::module::Module;
use burn::record::{BinFileRecorder, FullPrecisionSettings};
use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use data_contracts::model::{
    ArchitectureSpec, ModelManifest, ValidationError, EXPECTED_INPUT_SHAPE, EXPECTED_OUTPUT_SHAPE,
};
use models::{DigitNet, DigitNetConfig};
use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use vision_core::interfaces::{
    Classifier, InferenceError, LogitVector, ModelLoadError, NUM_CLASSES,
};
use vision_core::normalize::NormalizedImage;

/// `DigitNet` checkpoint loaded into a Burn backend, with its logit buffer
/// allocated once for the lifetime of the handle.
pub struct BurnDigitClassifier<B: Backend = InferenceBackend> {
    model: DigitNet<B>,
    device: B::Device,
    config: DigitNetConfig,
    logits: [f32; NUM_CLASSES],
}

impl<B: Backend> BurnDigitClassifier<B> {
    /// Load `model_path` (Burn `.bin` record) plus its `.json` manifest onto `device`.
    pub fn load_on(model_path: &Path, device: &B::Device) -> Result<Self, ModelLoadError> {
        if !model_path.exists() {
            return Err(ModelLoadError::NotFound(model_path.to_path_buf()));
        }
        let manifest = read_manifest(model_path)?;
        let config = digit_net_config(&manifest.architecture);

        let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
        let loaded = guard_engine(|| {
            DigitNet::<B>::new(config, device).load_file(model_path, &recorder, device)
        })
        .map_err(|reason| ModelLoadError::Record {
            path: model_path.to_path_buf(),
            reason,
        })?;
        let model = loaded.map_err(|err| ModelLoadError::Record {
            path: model_path.to_path_buf(),
            reason: format!("{err:?}"),
        })?;
        verify_param_shapes(&model, &config)?;

        tracing::info!(
            path = %model_path.display(),
            conv1 = config.conv1_channels,
            conv2 = config.conv2_channels,
            kernel = config.kernel_size,
            "loaded digit classifier"
        );
        Ok(Self {
            model,
            device: device.clone(),
            config,
            logits: [0.0; NUM_CLASSES],
        })
    }

    /// Wrap an in-memory model, e.g. one just built for a test.
    pub fn from_model(model: DigitNet<B>, config: DigitNetConfig, device: &B::Device) -> Self {
        Self {
            model,
            device: device.clone(),
            config,
            logits: [0.0; NUM_CLASSES],
        }
    }

    pub fn config(&self) -> DigitNetConfig {
        self.config
    }

    /// Logits from the most recent successful `classify`.
    pub fn last_logits(&self) -> LogitVector {
        LogitVector(self.logits)
    }
}

impl<B: Backend> Classifier for BurnDigitClassifier<B> {
    fn load(model_path: &Path) -> Result<Self, ModelLoadError> {
        let device = B::Device::default();
        Self::load_on(model_path, &device)
    }

    fn classify(&mut self, image: NormalizedImage) -> Result<LogitVector, InferenceError> {
        let data = TensorData::new(image.into_vec(), EXPECTED_INPUT_SHAPE);
        let model = &self.model;
        let device = &self.device;
        let output = guard_engine(|| model.forward(Tensor::<B, 4>::from_data(data, device)))
            .map_err(InferenceError::Engine)?;

        let dims = output.dims();
        if dims != EXPECTED_OUTPUT_SHAPE {
            return Err(InferenceError::OutputShape {
                expected: EXPECTED_OUTPUT_SHAPE.to_vec(),
                actual: dims.to_vec(),
            });
        }
        let values = output
            .into_data()
            .to_vec::<f32>()
            .map_err(|err| InferenceError::Readback(format!("{err:?}")))?;
        if values.len() != NUM_CLASSES {
            return Err(InferenceError::Readback(format!(
                "expected {NUM_CLASSES} values, got {}",
                values.len()
            )));
        }
        self.logits.copy_from_slice(&values);
        Ok(LogitVector(self.logits))
    }
}

/// Builds boxed classifiers for the configured backend.
pub struct InferenceFactory;

impl InferenceFactory {
    pub fn build(&self, model_path: &Path) -> Result<Box<dyn Classifier + Send>, ModelLoadError> {
        let classifier = BurnDigitClassifier::<InferenceBackend>::load(model_path)?;
        Ok(Box::new(classifier))
    }
}

pub fn digit_net_config(arch: &ArchitectureSpec) -> DigitNetConfig {
    DigitNetConfig {
        conv1_channels: arch.conv1_channels,
        conv2_channels: arch.conv2_channels,
        kernel_size: arch.kernel_size,
    }
}

pub fn architecture_spec(cfg: &DigitNetConfig) -> ArchitectureSpec {
    ArchitectureSpec {
        conv1_channels: cfg.conv1_channels,
        conv2_channels: cfg.conv2_channels,
        kernel_size: cfg.kernel_size,
    }
}

/// Write `model` as a Burn record at `path` plus the JSON manifest beside it.
pub fn write_checkpoint<B: Backend>(
    model: DigitNet<B>,
    config: DigitNetConfig,
    path: &Path,
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
    model
        .save_file(path, &recorder)
        .map_err(|err| anyhow::anyhow!("failed to save record {}: {err:?}", path.display()))?;
    let manifest = ModelManifest::new(architecture_spec(&config));
    fs::write(ModelManifest::path_for(path), manifest.to_json_pretty()?)?;
    Ok(())
}

fn read_manifest(model_path: &Path) -> Result<ModelManifest, ModelLoadError> {
    let path = ModelManifest::path_for(model_path);
    let bytes = fs::read(&path).map_err(|source| ModelLoadError::Io {
        path: path.clone(),
        source,
    })?;
    let manifest =
        ModelManifest::from_json(&bytes).map_err(|err| ModelLoadError::InvalidManifest {
            path: path.clone(),
            reason: err.to_string(),
        })?;
    manifest.validate().map_err(|err| match err {
        ValidationError::InputShape(actual) => ModelLoadError::ShapeMismatch {
            tensor: "input".into(),
            expected: EXPECTED_INPUT_SHAPE.to_vec(),
            actual,
        },
        ValidationError::OutputShape(actual) => ModelLoadError::ShapeMismatch {
            tensor: "output".into(),
            expected: EXPECTED_OUTPUT_SHAPE.to_vec(),
            actual,
        },
        other => ModelLoadError::InvalidManifest {
            path: path.clone(),
            reason: other.to_string(),
        },
    })?;
    Ok(manifest)
}

fn verify_param_shapes<B: Backend>(
    model: &DigitNet<B>,
    config: &DigitNetConfig,
) -> Result<(), ModelLoadError> {
    for ((name, actual), (_, expected)) in model
        .param_shapes()
        .into_iter()
        .zip(config.expected_param_shapes())
    {
        if actual != expected {
            return Err(ModelLoadError::ShapeMismatch {
                tensor: name.to_string(),
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Run an engine call, turning a backend panic into an error message.
fn guard_engine<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown engine panic".to_string()
    }
}
