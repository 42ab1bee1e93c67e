use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;

use cli_support::{init_logging, ModelArgs, ModelOpts};
use digitpad_tools::report::{render_json, render_text};
use digitpad_tools::PadConfig;
use inference::prelude::Recognizer;
use vision_core::capture::RawCapture;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Classify the digit drawn in a single image"
)]
struct Args {
    /// Input image path (any format supported by the `image` crate).
    #[arg(long)]
    image: PathBuf,
    #[command(flatten)]
    model: ModelArgs,
    /// Emit one JSON record instead of the text report.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = PadConfig::load();
    init_logging(&cfg.log_filter);

    let in_path = &args.image;
    if !in_path.exists() {
        anyhow::bail!("input image not found: {}", in_path.display());
    }
    let model = ModelOpts::resolve(&args.model, &cfg.model_path);
    let recognizer = Recognizer::load(&model.model_path)?;

    let img = ImageReader::open(in_path)?.decode()?.to_rgba8();
    let capture = RawCapture::from_image(&img);

    match recognizer.recognize(&capture) {
        Ok(recognition) => {
            if args.json {
                println!("{}", render_json(&recognition)?);
            } else {
                print!("{}", render_text(&recognition));
            }
        }
        Err(err) => tracing::warn!("no prediction for {}: {err}", in_path.display()),
    }
    Ok(())
}
