//! In-memory drawing surface standing in for the interactive window.
//!
//! Mirrors the pointer semantics of the desktop demo: a press starts a stroke, drags
//! paint thick black segments onto a white surface, and the release ends the stroke
//! (that is when a recognition request is made). Clearing resets to white.

use image::{Rgba, RgbaImage};

use crate::capture::RawCapture;

pub const DEFAULT_CANVAS_WIDTH: u32 = 280;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 224;
/// Brush half-width; radius 2 paints a 5-pixel-wide line.
pub const DEFAULT_BRUSH_RADIUS: u32 = 2;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub struct Canvas {
    image: RgbaImage,
    brush_radius: u32,
    last: Option<(u32, u32)>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl Canvas {
    /// White canvas of the given size; zero dimensions are bumped to 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), BACKGROUND),
            brush_radius: DEFAULT_BRUSH_RADIUS,
            last: None,
        }
    }

    pub fn with_brush_radius(mut self, radius: u32) -> Self {
        self.brush_radius = radius;
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn is_drawing(&self) -> bool {
        self.last.is_some()
    }

    /// Pointer press: start a stroke at `point` (clamped to the surface).
    pub fn begin_stroke(&mut self, point: (i32, i32)) {
        let p = self.clamp(point);
        self.stamp(p.0, p.1);
        self.last = Some(p);
    }

    /// Pointer drag: paint from the previous point to `point`. Ignored when no
    /// stroke is active.
    pub fn stroke_to(&mut self, point: (i32, i32)) {
        let Some(from) = self.last else { return };
        let to = self.clamp(point);
        self.draw_segment(from, to);
        self.last = Some(to);
    }

    /// Pointer release. Returns true when a stroke was active, i.e. when the
    /// caller should run a recognition.
    pub fn end_stroke(&mut self) -> bool {
        self.last.take().is_some()
    }

    /// Reset to a blank white surface.
    pub fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = BACKGROUND;
        }
        self.last = None;
    }

    /// Borrow the current pixels as a capture.
    pub fn snapshot(&self) -> RawCapture<'_> {
        RawCapture::from_image(&self.image)
    }

    fn clamp(&self, (x, y): (i32, i32)) -> (u32, u32) {
        let (w, h) = self.image.dimensions();
        (
            x.clamp(0, w as i32 - 1) as u32,
            y.clamp(0, h as i32 - 1) as u32,
        )
    }

    fn draw_segment(&mut self, from: (u32, u32), to: (u32, u32)) {
        let (mut x0, mut y0) = (from.0 as i64, from.1 as i64);
        let (x1, y1) = (to.0 as i64, to.1 as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.stamp(x0 as u32, y0 as u32);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn stamp(&mut self, cx: u32, cy: u32) {
        let (w, h) = self.image.dimensions();
        let r = self.brush_radius;
        let x_end = cx.saturating_add(r).min(w - 1);
        let y_end = cy.saturating_add(r).min(h - 1);
        for y in cy.saturating_sub(r)..=y_end {
            for x in cx.saturating_sub(r)..=x_end {
                self.image.put_pixel(x, y, INK);
            }
        }
    }
}
