//! Evenly spaced dots drifting along the strip

use super::Sprite;
use crate::canvas::Canvas;

const DEFAULT_SPEED: f32 = 0.25;

/// Lights every `skip`-th pixel, with a phase that drifts each frame
///
/// `skip` is derived from `factor`, the fraction of pixels to light:
/// `skip = count / round(count * factor)`.
#[derive(Debug, Clone)]
pub struct EveryNthSprite {
    skip: usize,
    offset: f32,
    speed: f32,
    hue: f32,
    sat: f32,
    val: f32,
}

impl EveryNthSprite {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(count: usize, factor: f32) -> Self {
        let lit = ((count as f32 * factor).round() as usize).max(1);
        Self {
            skip: (count / lit).max(1),
            offset: 0.0,
            speed: DEFAULT_SPEED,
            hue: 0.0,
            sat: 0.0,
            val: 1.0,
        }
    }

    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the brightness value (0.0-1.0)
    #[must_use]
    pub fn with_value(mut self, val: f32) -> Self {
        self.val = val;
        self
    }

    /// Tint the dots; they are white by default
    #[must_use]
    pub fn with_color(mut self, hue: f32, sat: f32) -> Self {
        self.hue = hue;
        self.sat = sat;
        self
    }

    pub const fn skip(&self) -> usize {
        self.skip
    }

    pub const fn offset(&self) -> f32 {
        self.offset
    }
}

impl Sprite for EveryNthSprite {
    fn step(&mut self) {
        self.offset = (self.offset + self.speed).rem_euclid(self.skip as f32);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, canvas: &mut Canvas<'_>) {
        let start = (self.offset.floor() as usize).min(self.skip - 1);
        for index in (start..canvas.len()).step_by(self.skip) {
            canvas.set_hsv(index, self.hue, self.sat, self.val);
        }
    }
}
