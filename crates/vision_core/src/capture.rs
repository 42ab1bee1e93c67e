use image::RgbaImage;

/// Borrowed RGBA8 snapshot of a drawing surface.
///
/// The buffer is interleaved `R,G,B,A` per pixel, row-major, and must be exactly
/// `width * height * 4` bytes long with both dimensions at least 1. That is a
/// caller contract: it is checked in debug builds only.
#[derive(Debug, Clone, Copy)]
pub struct RawCapture<'a> {
    width: u32,
    height: u32,
    rgba: &'a [u8],
}

impl<'a> RawCapture<'a> {
    pub fn new(width: u32, height: u32, rgba: &'a [u8]) -> Self {
        debug_assert!(width >= 1 && height >= 1, "capture must be at least 1x1");
        debug_assert_eq!(
            rgba.len(),
            width as usize * height as usize * 4,
            "capture buffer length must be width * height * 4"
        );
        Self {
            width,
            height,
            rgba,
        }
    }

    /// View an `image` RGBA buffer as a capture without copying.
    pub fn from_image(img: &'a RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.as_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn rgba(&self) -> &'a [u8] {
        self.rgba
    }

    /// RGBA bytes of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * self.width as usize + x) * 4;
        [
            self.rgba[idx],
            self.rgba[idx + 1],
            self.rgba[idx + 2],
            self.rgba[idx + 3],
        ]
    }
}
