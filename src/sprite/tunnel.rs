//! Rings rising through the tree

use super::Sprite;
use crate::canvas::Canvas;

const DEFAULT_SPEED: f32 = 0.01;
const DEFAULT_RINGS: f32 = 4.0;

/// Bright rings that travel from the base of the tree to its tip
///
/// Brightness follows the pixel radius, hue follows the pixel angle, so
/// each ring is a rainbow around the tree.
#[derive(Debug, Clone)]
pub struct TunnelSprite {
    phase: f32,
    speed: f32,
    rings: f32,
}

impl Default for TunnelSprite {
    fn default() -> Self {
        Self::new()
    }
}

impl TunnelSprite {
    pub const fn new() -> Self {
        Self {
            phase: 0.0,
            speed: DEFAULT_SPEED,
            rings: DEFAULT_RINGS,
        }
    }

    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Number of rings visible at once
    #[must_use]
    pub const fn with_rings(mut self, rings: f32) -> Self {
        self.rings = rings;
        self
    }
}

impl Sprite for TunnelSprite {
    fn step(&mut self) {
        self.phase = (self.phase + self.speed).rem_euclid(1.0);
    }

    fn render(&mut self, canvas: &mut Canvas<'_>) {
        let geometry = canvas.geometry();
        for index in 0..canvas.len() {
            let wave = (geometry.radius(index) * self.rings + self.phase).rem_euclid(1.0);
            let val = wave * wave;
            let hue = geometry.angle(index) / 360.0 + self.phase;
            canvas.set_hsv(index, hue, 1.0, val);
        }
    }
}
