//! Drops sliding down the strip

use rand::Rng;

use super::Sprite;
use crate::canvas::Canvas;

const GRAVITY: f32 = 0.02;
const TAIL_LENGTH: usize = 5;
const MAX_DELAY: u32 = 120;

/// A single drop that appears in the upper half of the tree, accelerates
/// towards the base and reappears elsewhere after a random pause
#[derive(Debug, Clone)]
pub struct DripSprite {
    count: usize,
    position: f32,
    velocity: f32,
    hue: f32,
    delay: u32,
}

impl DripSprite {
    pub fn new(count: usize) -> Self {
        let mut drip = Self {
            count,
            position: 0.0,
            velocity: 0.0,
            hue: 0.0,
            delay: 0,
        };
        drip.respawn();
        drip
    }

    fn respawn(&mut self) {
        let mut rng = rand::thread_rng();
        self.position = if self.count > 1 {
            rng.gen_range(self.count / 2..self.count) as f32
        } else {
            0.0
        };
        self.velocity = 0.0;
        self.hue = rng.gen_range(0.5..0.7);
        self.delay = rng.gen_range(0..MAX_DELAY);
    }

    /// Returns true while the drop is waiting to appear
    pub const fn is_waiting(&self) -> bool {
        self.delay > 0
    }

    pub const fn position(&self) -> f32 {
        self.position
    }
}

impl Sprite for DripSprite {
    fn step(&mut self) {
        if self.delay > 0 {
            self.delay -= 1;
            return;
        }
        self.velocity += GRAVITY;
        self.position -= self.velocity;
        if self.position < 0.0 {
            self.respawn();
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, canvas: &mut Canvas<'_>) {
        if self.is_waiting() {
            return;
        }
        let head = self.position.floor().max(0.0) as usize;
        // The tail trails above the head, towards the tip of the tree
        for i in 0..TAIL_LENGTH {
            let val = 1.0 - i as f32 / TAIL_LENGTH as f32;
            canvas.set_hsv(head + i, self.hue, 0.8, val);
        }
    }
}
