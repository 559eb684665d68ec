//! RGBA float pixel buffers
//!
//! A [`PixelBuffer`] is the finished payload handed to image storage: a
//! row-major run of RGBA `f32` quadruples, origin top-left unless flipped.

use bytemuck::cast_slice;

/// One RGBA pixel
pub type Rgba = [f32; 4];

/// Trailing fill outside any data segment
pub const PAD_EMPTY: Rgba = [0.0, 0.0, 0.0, 0.0];

/// Fill inside a data segment: valid coordinate space, zero displacement
pub const PAD_DEFINED: Rgba = [0.0, 0.0, 0.0, 1.0];

/// Row-major RGBA32F pixel storage
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Create a `width x height` buffer filled with `fill`
    pub fn filled(width: u32, height: u32, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Wrap existing pixels; `None` if the length does not match the extent
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`)
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Pixel at column `x`, row `y`
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Pixels of row `y`
    pub fn row(&self, y: u32) -> &[Rgba] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// Flat view of every scalar component (4 per pixel)
    pub fn as_floats(&self) -> &[f32] {
        cast_slice(&self.pixels)
    }

    pub fn as_floats_mut(&mut self) -> &mut [f32] {
        bytemuck::cast_slice_mut(&mut self.pixels)
    }
}
