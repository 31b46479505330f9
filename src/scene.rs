//! Scenes: fixed compositions of sprites rendered together

use rand::Rng;

use crate::canvas::Canvas;
use crate::geometry::Geometry;
use crate::sprite::{
    DripSprite, EveryNthSprite, GameKeys, InteractiveWalkSprite, PredicateSprite, SnakeSprite,
    SparkleFadeSprite, SparkleSprite, SpriteId, SpriteSlot, TunnelSprite, angle_beam,
};

const SCENE_NAME_EMPTY: &str = "empty";
const SCENE_NAME_MULTI: &str = "multi";
const SCENE_NAME_SNAKES: &str = "snakes";
const SCENE_NAME_NTH: &str = "nth";
const SCENE_NAME_SPARKLE: &str = "sparkle";
const SCENE_NAME_TUNNEL: &str = "tunnel";
const SCENE_NAME_DRIPS: &str = "drips";
const SCENE_NAME_GAME: &str = "game";
const SCENE_NAME_BEAM: &str = "beam";

const SNAKE_COUNT: usize = 15;
const DRIP_COUNT: usize = 10;

/// Ordered list of sprites; later sprites are drawn on top
#[derive(Debug, Clone)]
pub struct Scene {
    name: &'static str,
    sprites: Vec<SpriteSlot>,
}

impl Scene {
    pub fn new(name: &'static str, sprites: Vec<SpriteSlot>) -> Self {
        Self { name, sprites }
    }

    /// Scene holding a single sprite with default parameters
    pub fn from_sprite(id: SpriteId, geometry: &Geometry) -> Self {
        Self::new(id.as_str(), vec![id.to_slot(geometry)])
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn sprites(&self) -> &[SpriteSlot] {
        &self.sprites
    }

    pub fn step(&mut self) {
        for sprite in &mut self.sprites {
            sprite.step();
        }
    }

    pub fn render(&mut self, canvas: &mut Canvas<'_>) {
        for sprite in &mut self.sprites {
            sprite.render(canvas);
        }
    }

    /// Forward controller input to every sprite that accepts it
    ///
    /// Returns `true` if at least one sprite consumed the keys.
    pub fn handle_game_keys(&mut self, keys: GameKeys) -> bool {
        self.sprites
            .iter_mut()
            .fold(false, |handled, sprite| sprite.handle_game_keys(keys) | handled)
    }
}

/// Scenes that can be requested by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneId {
    Empty,
    Multi,
    Snakes,
    Nth,
    Sparkle,
    Tunnel,
    Drips,
    Game,
    Beam,
}

impl SceneId {
    pub const ALL: [Self; 9] = [
        Self::Empty,
        Self::Multi,
        Self::Snakes,
        Self::Nth,
        Self::Sparkle,
        Self::Tunnel,
        Self::Drips,
        Self::Game,
        Self::Beam,
    ];

    /// Scenes the attract mode rotates through
    pub const ATTRACT: [Self; 7] = [
        Self::Multi,
        Self::Snakes,
        Self::Nth,
        Self::Sparkle,
        Self::Tunnel,
        Self::Beam,
        Self::Drips,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => SCENE_NAME_EMPTY,
            Self::Multi => SCENE_NAME_MULTI,
            Self::Snakes => SCENE_NAME_SNAKES,
            Self::Nth => SCENE_NAME_NTH,
            Self::Sparkle => SCENE_NAME_SPARKLE,
            Self::Tunnel => SCENE_NAME_TUNNEL,
            Self::Drips => SCENE_NAME_DRIPS,
            Self::Game => SCENE_NAME_GAME,
            Self::Beam => SCENE_NAME_BEAM,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            SCENE_NAME_EMPTY => Some(Self::Empty),
            SCENE_NAME_MULTI => Some(Self::Multi),
            SCENE_NAME_SNAKES => Some(Self::Snakes),
            SCENE_NAME_NTH => Some(Self::Nth),
            SCENE_NAME_SPARKLE => Some(Self::Sparkle),
            SCENE_NAME_TUNNEL => Some(Self::Tunnel),
            SCENE_NAME_DRIPS => Some(Self::Drips),
            SCENE_NAME_GAME => Some(Self::Game),
            SCENE_NAME_BEAM => Some(Self::Beam),
            _ => None,
        }
    }

    /// Build a fresh scene
    pub fn build(self, geometry: &Geometry) -> Scene {
        let count = geometry.count();
        let sprites = match self {
            Self::Empty => Vec::new(),
            Self::Multi => {
                let mut sprites = snakes(count);
                sprites.push(SpriteSlot::EveryNth(
                    EveryNthSprite::new(count, 0.1).with_value(0.3),
                ));
                sprites.push(SpriteSlot::SparkleFade(SparkleFadeSprite::new(count)));
                sprites
            }
            Self::Snakes => snakes(count),
            Self::Nth => vec![
                SpriteSlot::EveryNth(EveryNthSprite::new(count, 0.1)),
                SpriteSlot::EveryNth(EveryNthSprite::new(count, 0.101)),
            ],
            Self::Sparkle => vec![
                SpriteSlot::Sparkle(SparkleSprite::new()),
                SpriteSlot::SparkleFade(SparkleFadeSprite::new(count)),
            ],
            Self::Tunnel => vec![SpriteSlot::Tunnel(TunnelSprite::new())],
            Self::Drips => (0..DRIP_COUNT)
                .map(|_| SpriteSlot::Drips(DripSprite::new(count)))
                .collect(),
            Self::Game => vec![SpriteSlot::InteractiveWalk(InteractiveWalkSprite::new())],
            Self::Beam => vec![SpriteSlot::Predicate(PredicateSprite::new(angle_beam))],
        };
        Scene::new(self.as_str(), sprites)
    }
}

/// Snakes spread evenly along the strip, each faster than the last
fn snakes(count: usize) -> Vec<SpriteSlot> {
    let mut rng = rand::thread_rng();
    (0..SNAKE_COUNT)
        .map(|i| {
            let head = (i * count / SNAKE_COUNT) as f32;
            let speed = (1.0 + 0.3 * i as f32) / 4.0;
            let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            SpriteSlot::Snake(SnakeSprite::new(count, head, speed * direction))
        })
        .collect()
}
