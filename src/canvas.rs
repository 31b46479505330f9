use crate::color::{BLACK, Rgb, hsv};
use crate::geometry::Geometry;

/// Pixel buffer handed to sprites while rendering
///
/// Writes overwrite: when two sprites draw the same pixel in one frame, the
/// one rendered last wins. Writes past the end of the strip are ignored.
pub struct Canvas<'a> {
    pixels: &'a mut [Rgb],
    geometry: &'a Geometry,
}

impl<'a> Canvas<'a> {
    pub fn new(pixels: &'a mut [Rgb], geometry: &'a Geometry) -> Self {
        Self { pixels, geometry }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn geometry(&self) -> &'a Geometry {
        self.geometry
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    pub fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    /// Set a pixel from a floating point HSV triple (hue in turns)
    pub fn set_hsv(&mut self, index: usize, hue: f32, sat: f32, val: f32) {
        self.set(index, hsv(hue, sat, val));
    }

    pub fn clear(&mut self) {
        self.pixels.fill(BLACK);
    }

    /// Replace the whole buffer, padding with black or truncating to fit
    pub fn copy_from(&mut self, colors: &[Rgb]) {
        let shared = colors.len().min(self.pixels.len());
        self.pixels[..shared].copy_from_slice(&colors[..shared]);
        self.pixels[shared..].fill(BLACK);
    }
}
