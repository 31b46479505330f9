//! Geometry-driven sprite: lights every pixel a predicate accepts

use super::Sprite;
use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::geometry::{Geometry, normalize};

const BEAM_HALF_WIDTH: f32 = 10.0;
const DEFAULT_SPEED: f32 = 3.0;
const DEFAULT_COLOR: Rgb = Rgb {
    r: 255,
    g: 160,
    b: 40,
};

/// Decides whether a pixel is lit, given the strip geometry and the
/// sprite's current phase in degrees
pub type PixelPredicate = fn(geometry: &Geometry, index: usize, phase: f32) -> bool;

/// A vertical beam `2 * BEAM_HALF_WIDTH` degrees wide, facing `phase`
pub fn angle_beam(geometry: &Geometry, index: usize, phase: f32) -> bool {
    geometry.angle_from(index, phase) <= BEAM_HALF_WIDTH
}

/// Lights the pixels that satisfy a predicate of the geometry
///
/// The phase advances by `speed` degrees per frame and wraps at 360, so
/// angle-based predicates sweep around the tree.
#[derive(Debug, Clone)]
pub struct PredicateSprite {
    predicate: PixelPredicate,
    phase: f32,
    speed: f32,
    color: Rgb,
}

impl PredicateSprite {
    pub const fn new(predicate: PixelPredicate) -> Self {
        Self {
            predicate,
            phase: 0.0,
            speed: DEFAULT_SPEED,
            color: DEFAULT_COLOR,
        }
    }

    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub const fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub const fn phase(&self) -> f32 {
        self.phase
    }
}

impl Sprite for PredicateSprite {
    fn step(&mut self) {
        self.phase = normalize(self.phase + self.speed);
    }

    fn render(&mut self, canvas: &mut Canvas<'_>) {
        let geometry = canvas.geometry();
        for index in 0..canvas.len() {
            if (self.predicate)(geometry, index, self.phase) {
                canvas.set(index, self.color);
            }
        }
    }
}
