//! Capture-to-tensor normalization.
//!
//! Any `W x H` RGBA capture is mapped onto the fixed 28x28 classifier grid with
//! nearest-neighbour sampling (`src = dst * size / 28`, truncating). Each sampled
//! pixel's R,G,B average `L` becomes `(255 - L) / 255`, so dark ink on a light
//! background turns into high values. Alpha is ignored.

use image::{GrayImage, Luma};

use crate::capture::RawCapture;
use crate::interfaces::{IMAGE_HEIGHT, IMAGE_PIXELS, IMAGE_WIDTH};

/// 28x28 row-major intensity grid in `[0, 1]`, ink high.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage(Box<[f32; IMAGE_PIXELS]>);

impl NormalizedImage {
    /// All-background image.
    pub fn blank() -> Self {
        Self(Box::new([0.0; IMAGE_PIXELS]))
    }

    pub fn as_slice(&self) -> &[f32] {
        self.0.as_slice()
    }

    pub fn as_array(&self) -> &[f32; IMAGE_PIXELS] {
        &self.0
    }

    /// Hand the backing storage over without copying.
    pub fn into_vec(self) -> Vec<f32> {
        let cells: Box<[f32]> = self.0;
        cells.into_vec()
    }

    /// Intensity at `(row, col)`; panics outside the 28x28 grid.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < IMAGE_HEIGHT && col < IMAGE_WIDTH);
        self.0[row * IMAGE_WIDTH + col]
    }

    /// Sum of all intensities; zero for an empty drawing.
    pub fn ink_mass(&self) -> f32 {
        self.0.iter().sum()
    }

    /// Render back to an 8-bit grayscale image (ink white, background black),
    /// the polarity the classifier sees.
    pub fn to_luma8(&self) -> GrayImage {
        GrayImage::from_fn(IMAGE_WIDTH as u32, IMAGE_HEIGHT as u32, |x, y| {
            let v = self.get(y as usize, x as usize);
            Luma([(v * 255.0).round().clamp(0.0, 255.0) as u8])
        })
    }
}

/// Downsample and invert `capture` into the classifier's input grid.
pub fn normalize(capture: &RawCapture<'_>) -> NormalizedImage {
    let width = capture.width() as usize;
    let height = capture.height() as usize;
    let mut out = NormalizedImage::blank();
    for row in 0..IMAGE_HEIGHT {
        // row < IMAGE_HEIGHT keeps src_y < height.
        let src_y = row * height / IMAGE_HEIGHT;
        for col in 0..IMAGE_WIDTH {
            let src_x = col * width / IMAGE_WIDTH;
            let [r, g, b, _] = capture.pixel(src_x, src_y);
            let luminance = (r as f32 + g as f32 + b as f32) / 3.0;
            out.0[row * IMAGE_WIDTH + col] = (255.0 - luminance) / 255.0;
        }
    }
    out
}
