use burn::tensor::Tensor;
use burn_ndarray::NdArray;
use inference::factory::{write_checkpoint, BurnDigitClassifier};
use inference::prelude::Recognizer;
use models::{DigitNet, DigitNetConfig};
use tempfile::tempdir;
use vision_core::canvas::Canvas;
use vision_core::interfaces::{Classifier, NUM_CLASSES};
use vision_core::normalize::{normalize, NormalizedImage};

type TestBackend = NdArray<f32>;

fn device() -> <TestBackend as burn::tensor::backend::Backend>::Device {
    Default::default()
}

fn one_stroke() -> Canvas {
    let mut canvas = Canvas::default();
    let (w, h) = canvas.dimensions();
    canvas.begin_stroke((w as i32 / 2, h as i32 / 8));
    canvas.stroke_to((w as i32 / 2, h as i32 * 7 / 8));
    canvas.end_stroke();
    canvas
}

#[test]
fn loaded_checkpoint_matches_in_memory_model() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("models/digit_net.bin");
    let cfg = DigitNetConfig::default();
    let model = DigitNet::<TestBackend>::new(cfg, &device());
    write_checkpoint(model.clone(), cfg, &path).unwrap();

    let mut classifier = BurnDigitClassifier::<TestBackend>::load(&path).expect("load checkpoint");
    assert_eq!(classifier.config(), cfg);

    let canvas = one_stroke();
    let image = normalize(&canvas.snapshot());
    let expected = model
        .forward(Tensor::<TestBackend, 4>::from_data(
            burn::tensor::TensorData::new(image.as_slice().to_vec(), [1, 1, 28, 28]),
            &device(),
        ))
        .into_data()
        .to_vec::<f32>()
        .unwrap_or_default();

    let logits = classifier.classify(image).expect("classify");
    assert_eq!(expected.len(), NUM_CLASSES);
    for (a, b) in logits.as_slice().iter().zip(expected.iter()) {
        assert!((a - b).abs() < 1e-5, "{a} vs {b}");
    }
    assert_eq!(classifier.last_logits(), logits);
}

#[test]
fn classify_is_repeatable_on_the_same_handle() {
    let cfg = DigitNetConfig::default();
    let model = DigitNet::<TestBackend>::new(cfg, &device());
    let mut classifier = BurnDigitClassifier::from_model(model, cfg, &device());

    let canvas = one_stroke();
    let first = classifier.classify(normalize(&canvas.snapshot())).unwrap();
    let _ = classifier.classify(NormalizedImage::blank()).unwrap();
    let again = classifier.classify(normalize(&canvas.snapshot())).unwrap();

    let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(first.as_slice()), bits(again.as_slice()));
}

#[test]
fn recognizer_reports_calibrated_prediction() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("digit_net.bin");
    let cfg = DigitNetConfig::default();
    write_checkpoint(DigitNet::<TestBackend>::new(cfg, &device()), cfg, &path).unwrap();
    let classifier = BurnDigitClassifier::<TestBackend>::load(&path).unwrap();
    let recognizer = Recognizer::new(classifier);

    let canvas = one_stroke();
    let recognition = recognizer.recognize(&canvas.snapshot()).expect("recognize");
    let probs = recognition.prediction.probabilities.as_slice();
    assert_eq!(probs.len(), NUM_CLASSES);
    assert!(probs.iter().all(|p| *p >= 0.0));
    assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);

    let max = probs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let first_max = probs.iter().position(|p| *p == max).unwrap();
    assert_eq!(recognition.prediction.class.index(), first_max);
    assert!(recognition.inference_ms >= 0.0);
}
