use clap::Parser;
use std::path::PathBuf;

use cli_support::{init_logging, CanvasArgs, CanvasOpts, ModelArgs, ModelOpts};
use digitpad_tools::report::{render_json, render_text};
use digitpad_tools::strokes::{parse_stroke, replay_stroke, Stroke};
use digitpad_tools::PadConfig;
use inference::prelude::Recognizer;
use vision_core::canvas::Canvas;
use vision_core::normalize::normalize;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Replay pointer strokes on a blank canvas and classify after each release"
)]
struct Args {
    /// One press-drag-release gesture as "x,y x,y ..."; repeat for more strokes.
    #[arg(long = "stroke", required = true)]
    strokes: Vec<String>,
    /// Clear the canvas before each stroke instead of accumulating ink.
    #[arg(long, default_value_t = false)]
    clear_between: bool,
    /// Brush half-width in pixels (2 paints a 5-pixel line).
    #[arg(long)]
    brush_radius: Option<u32>,
    #[command(flatten)]
    model: ModelArgs,
    #[command(flatten)]
    canvas: CanvasArgs,
    /// Write the final canvas as PNG.
    #[arg(long)]
    save_canvas: Option<PathBuf>,
    /// Write the final 28x28 classifier input as PNG.
    #[arg(long)]
    save_input: Option<PathBuf>,
    /// Emit one JSON record per release instead of the text report.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = PadConfig::load();
    init_logging(&cfg.log_filter);

    let strokes = args
        .strokes
        .iter()
        .map(|raw| parse_stroke(raw))
        .collect::<anyhow::Result<Vec<Stroke>>>()?;

    let model = ModelOpts::resolve(&args.model, &cfg.model_path);
    let recognizer = Recognizer::load(&model.model_path)?;

    let size = CanvasOpts::resolve(&args.canvas, cfg.canvas);
    let mut canvas = Canvas::new(size.width, size.height)
        .with_brush_radius(args.brush_radius.unwrap_or(cfg.brush_radius));
    tracing::info!(
        width = size.width,
        height = size.height,
        strokes = strokes.len(),
        "starting stroke session"
    );

    for (i, stroke) in strokes.iter().enumerate() {
        if args.clear_between {
            canvas.clear();
        }
        if !replay_stroke(&mut canvas, stroke) {
            continue;
        }
        match recognizer.recognize(&canvas.snapshot()) {
            Ok(recognition) => {
                if args.json {
                    println!("{}", render_json(&recognition)?);
                } else {
                    println!("stroke {}:", i + 1);
                    print!("{}", render_text(&recognition));
                }
            }
            // The session stays interactive; the user just draws again.
            Err(err) => tracing::warn!("stroke {}: no prediction: {err}", i + 1),
        }
    }

    if let Some(path) = &args.save_canvas {
        canvas.image().save(path)?;
        tracing::info!("saved canvas to {}", path.display());
    }
    if let Some(path) = &args.save_input {
        normalize(&canvas.snapshot()).to_luma8().save(path)?;
        tracing::info!("saved classifier input to {}", path.display());
    }
    Ok(())
}
