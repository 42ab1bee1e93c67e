use burn_ndarray::NdArray;
use data_contracts::ModelManifest;
use inference::factory::{write_checkpoint, BurnDigitClassifier};
use inference::prelude::Recognizer;
use models::{DigitNet, DigitNetConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use vision_core::interfaces::{Classifier, ModelLoadError};

type TestBackend = NdArray<f32>;

fn device() -> <TestBackend as burn::tensor::backend::Backend>::Device {
    Default::default()
}

fn load(path: &Path) -> Result<BurnDigitClassifier<TestBackend>, ModelLoadError> {
    BurnDigitClassifier::<TestBackend>::load(path)
}

#[test]
fn nonexistent_path_is_a_load_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("missing.bin");
    assert!(matches!(load(&path), Err(ModelLoadError::NotFound(_))));
    assert!(matches!(
        Recognizer::load(&path),
        Err(ModelLoadError::NotFound(_))
    ));
}

#[test]
fn missing_manifest_is_a_load_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("digit_net.bin");
    let cfg = DigitNetConfig::default();
    write_checkpoint(DigitNet::<TestBackend>::new(cfg, &device()), cfg, &path).unwrap();
    fs::remove_file(ModelManifest::path_for(&path)).unwrap();

    assert!(matches!(load(&path), Err(ModelLoadError::Io { .. })));
}

#[test]
fn manifest_declaring_wrong_output_shape_is_rejected() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("digit_net.bin");
    let cfg = DigitNetConfig::default();
    write_checkpoint(DigitNet::<TestBackend>::new(cfg, &device()), cfg, &path).unwrap();

    let manifest_path = ModelManifest::path_for(&path);
    let mut manifest = ModelManifest::from_json(&fs::read(&manifest_path).unwrap()).unwrap();
    manifest.output_shape = vec![1, 12];
    fs::write(&manifest_path, manifest.to_json_pretty().unwrap()).unwrap();

    match load(&path) {
        Err(ModelLoadError::ShapeMismatch {
            tensor,
            expected,
            actual,
        }) => {
            assert_eq!(tensor, "output");
            assert_eq!(expected, vec![1, 10]);
            assert_eq!(actual, vec![1, 12]);
        }
        other => panic!("expected output shape mismatch, got {:?}", other.err()),
    }
}

#[test]
fn malformed_manifest_is_rejected() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("digit_net.bin");
    let cfg = DigitNetConfig::default();
    write_checkpoint(DigitNet::<TestBackend>::new(cfg, &device()), cfg, &path).unwrap();
    fs::write(ModelManifest::path_for(&path), b"{ not json").unwrap();

    assert!(matches!(
        load(&path),
        Err(ModelLoadError::InvalidManifest { .. })
    ));
}

#[test]
fn record_that_disagrees_with_manifest_is_rejected() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("digit_net.bin");
    let small = DigitNetConfig {
        conv1_channels: 4,
        ..Default::default()
    };
    write_checkpoint(DigitNet::<TestBackend>::new(small, &device()), small, &path).unwrap();

    // Manifest now claims the default architecture; the stored weights are narrower.
    let manifest = ModelManifest::new(Default::default());
    fs::write(
        ModelManifest::path_for(&path),
        manifest.to_json_pretty().unwrap(),
    )
    .unwrap();

    let err = load(&path).err().expect("mismatched record must fail");
    assert!(
        matches!(
            err,
            ModelLoadError::ShapeMismatch { .. } | ModelLoadError::Record { .. }
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn corrupt_record_is_rejected() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("digit_net.bin");
    let cfg = DigitNetConfig::default();
    write_checkpoint(DigitNet::<TestBackend>::new(cfg, &device()), cfg, &path).unwrap();
    fs::write(&path, b"definitely not a burn record").unwrap();

    assert!(matches!(load(&path), Err(ModelLoadError::Record { .. })));
}
