use clap::Args;
use std::path::{Path, PathBuf};
use vision_core::canvas::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

/// Classifier checkpoint selection shared by inference tools.
#[derive(Debug, Clone, Args)]
pub struct ModelArgs {
    /// Burn checkpoint (`.bin`, with a `.json` manifest beside it). Defaults to the
    /// config file's `model_path`.
    #[arg(long)]
    pub model: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ModelOpts {
    pub model_path: PathBuf,
}

impl ModelOpts {
    pub fn new(model_path: PathBuf) -> Self {
        Self { model_path }
    }

    /// CLI flag wins over the configured default.
    pub fn resolve(args: &ModelArgs, configured: &Path) -> Self {
        Self::new(
            args.model
                .clone()
                .unwrap_or_else(|| configured.to_path_buf()),
        )
    }
}

/// Drawing surface size for headless stroke sessions.
#[derive(Debug, Clone, Args)]
pub struct CanvasArgs {
    /// Canvas width in pixels.
    #[arg(long)]
    pub width: Option<u32>,
    /// Canvas height in pixels.
    #[arg(long)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasOpts {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasOpts {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl CanvasOpts {
    /// Fill unset flags from `fallback`; zero sizes are bumped to 1.
    pub fn resolve(args: &CanvasArgs, fallback: CanvasOpts) -> Self {
        Self {
            width: args.width.unwrap_or(fallback.width).max(1),
            height: args.height.unwrap_or(fallback.height).max(1),
        }
    }
}
