pub mod config;
pub mod report;
pub mod strokes;

pub use config::PadConfig;
