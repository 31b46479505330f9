//! Animated patterns for an addressable LED strip wound around a tree.
//!
//! The pieces, leaves first:
//! - [`Geometry`] maps a pixel index to an angle, radius and position
//! - sprites ([`SpriteSlot`]) are independent animations drawn on a [`Canvas`]
//! - a [`Scene`] composes sprites; a mode ([`ModeSlot`]) rotates among scenes
//!   or shows frames pushed from outside
//! - [`FrameScheduler`] runs the fixed-rate loop, routing control messages
//!   into a [`FrameState`] and flushing frames to an [`OutputDriver`]

pub mod canvas;
pub mod channel;
pub mod color;
pub mod config;
pub mod driver;
pub mod frame_scheduler;
pub mod frame_state;
pub mod geometry;
pub mod math8;
pub mod message;
pub mod mode;
pub mod modifier;
pub mod scene;
pub mod sprite;
pub mod transport;

pub use canvas::Canvas;
pub use channel::{MessageChannel, MessageReceiver, MessageSender};
pub use color::{Hsv, Rgb};
pub use config::{ConfigError, Settings};
pub use driver::{DisplayError, OutputDriver};
pub use frame_scheduler::{FrameResult, FrameScheduler, Role, SchedulerOptions};
pub use frame_state::{FrameState, ModeSet};
pub use geometry::{AngleTable, Geometry, GeometryError};
pub use message::{Action, ControlMessage, MessageError};
pub use mode::{ModeId, ModeSlot, SceneMode, SlaveMode};
pub use modifier::Modifiers;
pub use scene::{Scene, SceneId};
pub use sprite::{Sprite, SpriteId, SpriteSlot};
pub use transport::{Transport, TransportError};

pub use embassy_time::{Duration, Instant};
