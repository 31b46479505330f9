//! Moving snake of pixels with a rainbow body

use super::Sprite;
use crate::canvas::Canvas;

const DEFAULT_LENGTH: usize = 12;

/// Arc of `length` pixels whose head advances by `speed` pixels per frame
///
/// The body trails behind the direction of travel and fades towards the
/// tail. Hue is taken from the position along the strip, so the snake
/// shifts color as it moves.
#[derive(Debug, Clone)]
pub struct SnakeSprite {
    count: usize,
    head: f32,
    speed: f32,
    length: usize,
    hue_offset: f32,
}

impl SnakeSprite {
    pub fn new(count: usize, head: f32, speed: f32) -> Self {
        Self {
            count,
            head: wrap(head, count),
            speed,
            length: DEFAULT_LENGTH,
            hue_offset: 0.0,
        }
    }

    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Shift the hue, in pixels along the strip
    #[must_use]
    pub fn with_hue_offset(mut self, offset: f32) -> Self {
        self.hue_offset = offset;
        self
    }

    pub const fn head(&self) -> f32 {
        self.head
    }

    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Pixel index of the `i`-th body segment, 0 being the head
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn segment(&self, i: usize) -> usize {
        let count = self.count as isize;
        let head = self.head.floor() as isize;
        let offset = i as isize;
        let index = if self.speed >= 0.0 {
            head - offset
        } else {
            head + offset
        };
        index.rem_euclid(count) as usize
    }
}

impl Sprite for SnakeSprite {
    fn step(&mut self) {
        self.head = wrap(self.head + self.speed, self.count);
    }

    fn render(&mut self, canvas: &mut Canvas<'_>) {
        if self.count == 0 || self.length == 0 {
            return;
        }
        let count = self.count as f32;
        let length = self.length as f32;
        for i in 0..self.length {
            let hue = (self.hue_offset + self.head + i as f32) / count;
            let val = 1.0 - i as f32 / length;
            canvas.set_hsv(self.segment(i), hue, 1.0, val);
        }
    }
}

fn wrap(position: f32, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let wrapped = position.rem_euclid(count as f32);
    if wrapped >= count as f32 { 0.0 } else { wrapped }
}
