//! Random twinkles

use rand::Rng;

use super::Sprite;
use crate::canvas::Canvas;
use crate::color::{Rgb, fade, hsv};
use crate::math8::unit8;

const DEFAULT_SPARKLE_CHANCE: f64 = 0.01;
const DEFAULT_SPAWN_CHANCE: f64 = 0.2;
const DEFAULT_DECAY: f32 = 0.92;
const MIN_VALUE: f32 = 0.02;
const MAX_DECAY: f32 = 0.99;

/// Each frame, every pixel lights up with a small probability
///
/// Holds no state besides its parameters; a pixel lit in one frame is
/// gone in the next.
#[derive(Debug, Clone)]
pub struct SparkleSprite {
    chance: f64,
}

impl Default for SparkleSprite {
    fn default() -> Self {
        Self::new()
    }
}

impl SparkleSprite {
    pub const fn new() -> Self {
        Self {
            chance: DEFAULT_SPARKLE_CHANCE,
        }
    }

    /// Set the per-pixel, per-frame probability of lighting up
    #[must_use]
    pub const fn with_chance(mut self, chance: f64) -> Self {
        self.chance = chance;
        self
    }
}

impl Sprite for SparkleSprite {
    fn render(&mut self, canvas: &mut Canvas<'_>) {
        let chance = self.chance.clamp(0.0, 1.0);
        let mut rng = rand::thread_rng();
        for index in 0..canvas.len() {
            if rng.gen_bool(chance) {
                let hue = rng.gen_range(0.0..1.0);
                let val = rng.gen_range(0.3..1.0);
                canvas.set_hsv(index, hue, 1.0, val);
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Spark {
    index: usize,
    color: Rgb,
    value: f32,
}

/// Sparks that appear at random pixels and fade out over several frames
#[derive(Debug, Clone)]
pub struct SparkleFadeSprite {
    count: usize,
    spawn_chance: f64,
    decay: f32,
    sparks: Vec<Spark>,
}

impl SparkleFadeSprite {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            spawn_chance: DEFAULT_SPAWN_CHANCE,
            decay: DEFAULT_DECAY,
            sparks: Vec::new(),
        }
    }

    /// Set the probability of a new spark appearing each frame
    #[must_use]
    pub fn with_spawn_chance(mut self, chance: f64) -> Self {
        self.spawn_chance = chance;
        self
    }

    /// Set the per-frame brightness multiplier of live sparks, kept below 1
    #[must_use]
    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = decay.clamp(0.0, MAX_DECAY);
        self
    }

    pub const fn decay(&self) -> f32 {
        self.decay
    }

    pub fn live_sparks(&self) -> usize {
        self.sparks.len()
    }
}

impl Sprite for SparkleFadeSprite {
    fn step(&mut self) {
        let decay = self.decay;
        self.sparks.retain_mut(|spark| {
            spark.value *= decay;
            spark.value > MIN_VALUE
        });

        let mut rng = rand::thread_rng();
        if self.count > 0 && rng.gen_bool(self.spawn_chance.clamp(0.0, 1.0)) {
            self.sparks.push(Spark {
                index: rng.gen_range(0..self.count),
                color: hsv(rng.gen_range(0.0..1.0), 0.6, 1.0),
                value: 1.0,
            });
        }
    }

    fn render(&mut self, canvas: &mut Canvas<'_>) {
        for spark in &self.sparks {
            canvas.set(spark.index, fade(spark.color, unit8(spark.value)));
        }
    }
}
