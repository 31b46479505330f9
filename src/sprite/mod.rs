//! Sprite system with compile-time known sprite variants
//!
//! A sprite is one independent animation: it advances its own state on
//! `step` and draws onto a [`Canvas`] on `render`. Sprites never interact,
//! so a scene can step and render them in any order; drawing order only
//! decides which color wins on shared pixels.

mod drips;
mod every_nth;
mod predicate;
mod snake;
mod sparkle;
mod tunnel;
mod walk;

pub use drips::DripSprite;
pub use every_nth::EveryNthSprite;
pub use predicate::{PixelPredicate, PredicateSprite, angle_beam};
pub use snake::SnakeSprite;
pub use sparkle::{SparkleFadeSprite, SparkleSprite};
pub use tunnel::TunnelSprite;
pub use walk::{GameKey, GameKeys, InteractiveWalkSprite};

use crate::canvas::Canvas;
use crate::geometry::Geometry;

const SPRITE_NAME_SNAKE: &str = "snake";
const SPRITE_NAME_EVERY_NTH: &str = "everyNth";
const SPRITE_NAME_SPARKLE: &str = "sparkle";
const SPRITE_NAME_SPARKLE_FADE: &str = "sparkleFade";
const SPRITE_NAME_PREDICATE: &str = "predicate";
const SPRITE_NAME_INTERACTIVE_WALK: &str = "interactiveWalk";
const SPRITE_NAME_TUNNEL: &str = "tunnel";
const SPRITE_NAME_DRIPS: &str = "drips";

pub trait Sprite {
    /// Advance the animation by one frame
    fn step(&mut self) {}

    /// Draw the current state
    fn render(&mut self, canvas: &mut Canvas<'_>);
}

/// Sprite slot - enum containing all possible sprites
#[derive(Debug, Clone)]
pub enum SpriteSlot {
    Snake(SnakeSprite),
    EveryNth(EveryNthSprite),
    Sparkle(SparkleSprite),
    SparkleFade(SparkleFadeSprite),
    Predicate(PredicateSprite),
    InteractiveWalk(InteractiveWalkSprite),
    Tunnel(TunnelSprite),
    Drips(DripSprite),
}

/// Sprites that can be requested by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteId {
    Snake,
    EveryNth,
    Sparkle,
    SparkleFade,
    Predicate,
    InteractiveWalk,
    Tunnel,
    Drips,
}

impl SpriteId {
    pub const ALL: [Self; 8] = [
        Self::Snake,
        Self::EveryNth,
        Self::Sparkle,
        Self::SparkleFade,
        Self::Predicate,
        Self::InteractiveWalk,
        Self::Tunnel,
        Self::Drips,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Snake => SPRITE_NAME_SNAKE,
            Self::EveryNth => SPRITE_NAME_EVERY_NTH,
            Self::Sparkle => SPRITE_NAME_SPARKLE,
            Self::SparkleFade => SPRITE_NAME_SPARKLE_FADE,
            Self::Predicate => SPRITE_NAME_PREDICATE,
            Self::InteractiveWalk => SPRITE_NAME_INTERACTIVE_WALK,
            Self::Tunnel => SPRITE_NAME_TUNNEL,
            Self::Drips => SPRITE_NAME_DRIPS,
        }
    }

    /// Parse a sprite name, accepting both `camelCase` and `snake_case`
    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            SPRITE_NAME_SNAKE => Some(Self::Snake),
            SPRITE_NAME_EVERY_NTH | "every_nth" => Some(Self::EveryNth),
            SPRITE_NAME_SPARKLE => Some(Self::Sparkle),
            SPRITE_NAME_SPARKLE_FADE | "sparkle_fade" => Some(Self::SparkleFade),
            SPRITE_NAME_PREDICATE | "beam" => Some(Self::Predicate),
            SPRITE_NAME_INTERACTIVE_WALK | "interactive_walk" => Some(Self::InteractiveWalk),
            SPRITE_NAME_TUNNEL => Some(Self::Tunnel),
            SPRITE_NAME_DRIPS => Some(Self::Drips),
            _ => None,
        }
    }

    /// Build the sprite with its default parameters
    pub fn to_slot(self, geometry: &Geometry) -> SpriteSlot {
        let count = geometry.count();
        match self {
            Self::Snake => SpriteSlot::Snake(SnakeSprite::new(count, 0.0, 0.5)),
            Self::EveryNth => SpriteSlot::EveryNth(EveryNthSprite::new(count, 0.1)),
            Self::Sparkle => SpriteSlot::Sparkle(SparkleSprite::new()),
            Self::SparkleFade => SpriteSlot::SparkleFade(SparkleFadeSprite::new(count)),
            Self::Predicate => SpriteSlot::Predicate(PredicateSprite::new(angle_beam)),
            Self::InteractiveWalk => {
                SpriteSlot::InteractiveWalk(InteractiveWalkSprite::new())
            }
            Self::Tunnel => SpriteSlot::Tunnel(TunnelSprite::new()),
            Self::Drips => SpriteSlot::Drips(DripSprite::new(count)),
        }
    }
}

impl SpriteSlot {
    pub fn step(&mut self) {
        match self {
            Self::Snake(sprite) => sprite.step(),
            Self::EveryNth(sprite) => sprite.step(),
            Self::Sparkle(sprite) => sprite.step(),
            Self::SparkleFade(sprite) => sprite.step(),
            Self::Predicate(sprite) => sprite.step(),
            Self::InteractiveWalk(sprite) => sprite.step(),
            Self::Tunnel(sprite) => sprite.step(),
            Self::Drips(sprite) => sprite.step(),
        }
    }

    pub fn render(&mut self, canvas: &mut Canvas<'_>) {
        match self {
            Self::Snake(sprite) => sprite.render(canvas),
            Self::EveryNth(sprite) => sprite.render(canvas),
            Self::Sparkle(sprite) => sprite.render(canvas),
            Self::SparkleFade(sprite) => sprite.render(canvas),
            Self::Predicate(sprite) => sprite.render(canvas),
            Self::InteractiveWalk(sprite) => sprite.render(canvas),
            Self::Tunnel(sprite) => sprite.render(canvas),
            Self::Drips(sprite) => sprite.render(canvas),
        }
    }

    /// Forward controller input; only interactive sprites react
    ///
    /// Returns `true` if the sprite consumed the keys.
    pub fn handle_game_keys(&mut self, keys: GameKeys) -> bool {
        match self {
            Self::InteractiveWalk(sprite) => {
                sprite.handle_game_keys(keys);
                true
            }
            _ => false,
        }
    }

    /// Get the sprite ID for external observation
    pub fn id(&self) -> SpriteId {
        match self {
            Self::Snake(_) => SpriteId::Snake,
            Self::EveryNth(_) => SpriteId::EveryNth,
            Self::Sparkle(_) => SpriteId::Sparkle,
            Self::SparkleFade(_) => SpriteId::SparkleFade,
            Self::Predicate(_) => SpriteId::Predicate,
            Self::InteractiveWalk(_) => SpriteId::InteractiveWalk,
            Self::Tunnel(_) => SpriteId::Tunnel,
            Self::Drips(_) => SpriteId::Drips,
        }
    }
}
