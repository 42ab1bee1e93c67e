//! Shared CLI helpers for digitpad binaries.

pub mod common;
pub mod logging;

pub use common::{CanvasArgs, CanvasOpts, ModelArgs, ModelOpts};
pub use logging::init_logging;
