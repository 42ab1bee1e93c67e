use inference::prelude::Recognizer;
use std::env;
use std::path::PathBuf;
use vision_core::canvas::Canvas;

/// End-to-end check against a trained reference checkpoint. Point
/// `DIGITPAD_REFERENCE_CKPT` at a `DigitNet` `.bin` (with its `.json` manifest) to run.
#[test]
fn reference_model_reads_vertical_stroke_as_one() {
    let ckpt = match env::var("DIGITPAD_REFERENCE_CKPT") {
        Ok(p) => PathBuf::from(p),
        Err(_) => {
            eprintln!("DIGITPAD_REFERENCE_CKPT not set; skipping reference model test.");
            return;
        }
    };
    assert!(ckpt.exists(), "checkpoint path {:?} does not exist", ckpt);
    let recognizer = Recognizer::load(&ckpt).expect("load reference checkpoint");

    // Thick, slightly slanted downstroke through the middle of the default canvas.
    let mut canvas = Canvas::default().with_brush_radius(8);
    let (w, h) = canvas.dimensions();
    canvas.begin_stroke((w as i32 / 2 + 6, h as i32 / 8));
    canvas.stroke_to((w as i32 / 2 - 4, h as i32 * 7 / 8));
    assert!(canvas.end_stroke());

    let recognition = recognizer
        .recognize(&canvas.snapshot())
        .expect("inference on reference model");
    let probs = recognition.prediction.probabilities.as_slice();
    assert_eq!(recognition.prediction.class.index(), 1, "probabilities {probs:?}");
    let max = probs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(recognition.prediction.confidence(), max);
}
