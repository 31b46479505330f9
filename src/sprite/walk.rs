//! Interactive game: walk around the base of the tree and shoot upwards

use super::Sprite;
use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::geometry::normalize;

const WALK_SPEED: f32 = 3.0;
const SHOT_SPEED: f32 = 0.15;
const FLASH_TICKS: u8 = 20;
const FLASH_WIDTH: f32 = 40.0;
/// Windings further than this from the aimed angle do not count as hits
const MAX_AIM_ERROR: f32 = 30.0;

const PLAYER_COLOR: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Keys of the remote game controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Left,
    Right,
    Fire,
}

impl GameKey {
    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "fire" => Some(Self::Fire),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Fire => "fire",
        }
    }
}

/// Pressed state of every controller key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameKeys {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl GameKeys {
    /// State in which only `key` may be pressed
    pub fn only(key: GameKey, pressed: bool) -> Self {
        let mut keys = Self::default();
        match key {
            GameKey::Left => keys.left = pressed,
            GameKey::Right => keys.right = pressed,
            GameKey::Fire => keys.fire = pressed,
        }
        keys
    }
}

#[derive(Debug, Clone)]
struct Shot {
    angle: f32,
    winding: f32,
}

#[derive(Debug, Clone)]
struct Flash {
    angle: f32,
    ticks: u8,
}

/// Player walking around the lowest winding of the tree
///
/// Holding left or right moves the player; pressing fire launches a shot
/// that climbs the tree one winding at a time at the player's angle and
/// bursts when it runs out of windings.
#[derive(Debug, Clone, Default)]
pub struct InteractiveWalkSprite {
    angle: f32,
    keys: GameKeys,
    shots: Vec<Shot>,
    flashes: Vec<Flash>,
}

impl InteractiveWalkSprite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_game_keys(&mut self, keys: GameKeys) {
        if keys.fire && !self.keys.fire {
            self.shots.push(Shot {
                angle: self.angle,
                winding: 0.0,
            });
        }
        self.keys = keys;
    }

    /// Angle the player is facing, in degrees
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    pub fn shots_in_flight(&self) -> usize {
        self.shots.len()
    }
}

impl Sprite for InteractiveWalkSprite {
    fn step(&mut self) {
        if self.keys.left {
            self.angle = normalize(self.angle + WALK_SPEED);
        }
        if self.keys.right {
            self.angle = normalize(self.angle - WALK_SPEED);
        }
        for shot in &mut self.shots {
            shot.winding += SHOT_SPEED;
        }
        self.flashes.retain_mut(|flash| {
            flash.ticks -= 1;
            flash.ticks > 0
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, canvas: &mut Canvas<'_>) {
        let geometry = canvas.geometry();

        for flash in &self.flashes {
            let val = f32::from(flash.ticks) / f32::from(FLASH_TICKS);
            for index in geometry.indices_within_angle_band(flash.angle, FLASH_WIDTH) {
                canvas.set_hsv(index, 0.08, 0.9, val);
            }
        }

        let aimed = |angle: f32| -> Vec<usize> {
            geometry
                .indices_near_angle(angle)
                .into_iter()
                .filter(|&index| geometry.angle_from(index, angle) <= MAX_AIM_ERROR)
                .collect()
        };

        let mut landed = Vec::new();
        self.shots.retain(|shot| {
            let windings = aimed(shot.angle);
            match windings.get(shot.winding as usize) {
                Some(&index) => {
                    canvas.set_hsv(index, shot.winding / 10.0, 1.0, 1.0);
                    true
                }
                None => {
                    landed.push(Flash {
                        angle: shot.angle,
                        ticks: FLASH_TICKS,
                    });
                    false
                }
            }
        });
        self.flashes.extend(landed);

        if let Some(&index) = aimed(self.angle).first() {
            canvas.set(index, PLAYER_COLOR);
        }
    }
}
