//! Fixed-size RGB8 canvas

use image::{Rgb, RgbImage};

use crate::error::{LatheError, LatheResult};

/// A width x height raster of 8-bit RGB pixels with a background color.
///
/// The size never changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbImage,
    background: Rgb<u8>,
}

impl Canvas {
    /// Allocate a canvas filled with `background`.
    ///
    /// Zero-sized canvases are allowed and behave as no-ops everywhere.
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> LatheResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| {
                LatheError::resource(format!("canvas {width}x{height} overflows address space"))
            })?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(len).map_err(|e| {
            LatheError::resource(format!("failed to allocate {width}x{height} canvas: {e}"))
        })?;
        for _ in 0..(width as usize * height as usize) {
            buf.extend_from_slice(&background);
        }

        let image = RgbImage::from_raw(width, height, buf)
            .ok_or_else(|| LatheError::resource("canvas buffer size mismatch"))?;
        Ok(Self {
            image,
            background: Rgb(background),
        })
    }

    /// Blank canvas with the same size and background as `self`
    pub fn blank_like(&self) -> LatheResult<Self> {
        Self::new(self.width(), self.height(), self.background.0)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    #[inline]
    pub fn background(&self) -> [u8; 3] {
        self.background.0
    }

    /// Pixel at (x, y), `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x < self.width() && y < self.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Set pixel at (x, y); out-of-range writes are ignored
    pub fn put_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        if x < self.width() && y < self.height() {
            self.image.put_pixel(x, y, Rgb(color));
        }
    }

    /// Reset every pixel to the background
    pub fn clear(&mut self) {
        let bg = self.background;
        for p in self.image.pixels_mut() {
            *p = bg;
        }
    }

    /// True if every pixel equals the background
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| *p == self.background)
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Raw interleaved RGB bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }
}
