//! vision_core: capture, normalization, and decision primitives shared by the
//! recognizer and its tools.

pub mod canvas;
pub mod capture;
pub mod decision;
pub mod interfaces;
pub mod normalize;

pub mod prelude {
    pub use crate::canvas::Canvas;
    pub use crate::capture::RawCapture;
    pub use crate::decision::{decide, softmax};
    pub use crate::interfaces::*;
    pub use crate::normalize::{normalize, NormalizedImage};
}
