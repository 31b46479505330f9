//! Control messages and their JSON wire format
//!
//! ```json
//! {"type": "action", "action": "next"}
//! {"type": "ping"}
//! {"type": "pixels", "leds": [16711680, 65280, 255]}
//! {"type": "gamekey", "key": "left", "state": true}
//! ```
//!
//! `leds` holds colors packed as `0xRRGGBB`. It may also be a string that
//! contains such an array, which is what some publishers send.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, rgb_from_u32, rgb_to_u32};
use crate::sprite::GameKey;

const TYPE_ACTION: &str = "action";
const TYPE_PING: &str = "ping";
const TYPE_PIXELS: &str = "pixels";
const TYPE_GAMEKEY: &str = "gamekey";

/// Topic the leader publishes its frames on
pub const PIXELS_TOPIC: &str = TYPE_PIXELS;

/// Errors from decoding a control message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// Not valid JSON, or a field has the wrong shape
    Malformed(String),
    UnknownType(String),
    UnknownAction(String),
    UnknownKey(String),
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(reason) => write!(f, "malformed message: {reason}"),
            Self::UnknownType(kind) => write!(f, "unknown message type {kind:?}"),
            Self::UnknownAction(action) => write!(f, "unknown action {action:?}"),
            Self::UnknownKey(key) => write!(f, "unknown game key {key:?}"),
        }
    }
}

impl std::error::Error for MessageError {}

impl From<serde_json::Error> for MessageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Remote commands understood by the frame state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Next,
    Toggle,
    Off,
    Stop,
    Start,
    Resume,
    On,
    Reverse,
    Spin,
}

impl Action {
    pub const ALL: [Self; 9] = [
        Self::Next,
        Self::Toggle,
        Self::Off,
        Self::Stop,
        Self::Start,
        Self::Resume,
        Self::On,
        Self::Reverse,
        Self::Spin,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Toggle => "toggle",
            Self::Off => "off",
            Self::Stop => "stop",
            Self::Start => "start",
            Self::Resume => "resume",
            Self::On => "on",
            Self::Reverse => "reverse",
            Self::Spin => "spin",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == s)
    }
}

/// A decoded control message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    Action(Action),
    Ping,
    PixelFrame(Vec<Rgb>),
    GameKey { key: GameKey, pressed: bool },
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
struct ActionPayload {
    action: String,
}

#[derive(Deserialize)]
struct PixelsPayload {
    leds: Leds,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Leds {
    Packed(Vec<u32>),
    Encoded(String),
}

#[derive(Deserialize)]
struct GameKeyPayload {
    key: String,
    #[serde(default)]
    state: KeyState,
}

/// Key state as sent by controllers: a boolean or a 0/1 number
#[derive(Deserialize)]
#[serde(untagged)]
enum KeyState {
    Flag(bool),
    Level(i64),
}

impl Default for KeyState {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl KeyState {
    const fn pressed(&self) -> bool {
        match self {
            Self::Flag(pressed) => *pressed,
            Self::Level(level) => *level != 0,
        }
    }
}

#[derive(Serialize)]
struct PixelsOut<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    leds: &'a [u32],
}

impl ControlMessage {
    /// The wire `type` of this message
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Action(_) => TYPE_ACTION,
            Self::Ping => TYPE_PING,
            Self::PixelFrame(_) => TYPE_PIXELS,
            Self::GameKey { .. } => TYPE_GAMEKEY,
        }
    }

    /// Decode one JSON message
    pub fn decode(bytes: &[u8]) -> Result<Self, MessageError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        let Envelope { kind } = Envelope::deserialize(&value)?;

        match kind.as_str() {
            TYPE_ACTION => {
                let payload = ActionPayload::deserialize(&value)?;
                Action::parse_from_str(&payload.action)
                    .map(Self::Action)
                    .ok_or(MessageError::UnknownAction(payload.action))
            }
            TYPE_PING => Ok(Self::Ping),
            TYPE_PIXELS => {
                let payload = PixelsPayload::deserialize(&value)?;
                let packed = match payload.leds {
                    Leds::Packed(packed) => packed,
                    Leds::Encoded(text) => serde_json::from_str(&text)?,
                };
                Ok(Self::PixelFrame(
                    packed.into_iter().map(rgb_from_u32).collect(),
                ))
            }
            TYPE_GAMEKEY => {
                let payload = GameKeyPayload::deserialize(&value)?;
                let key = GameKey::parse_from_str(&payload.key)
                    .ok_or_else(|| MessageError::UnknownKey(payload.key.clone()))?;
                Ok(Self::GameKey {
                    key,
                    pressed: payload.state.pressed(),
                })
            }
            _ => Err(MessageError::UnknownType(kind)),
        }
    }
}

/// Encode a frame as a `pixels` message
pub fn encode_pixels(pixels: &[Rgb]) -> Result<Vec<u8>, serde_json::Error> {
    let packed: Vec<u32> = pixels.iter().copied().map(rgb_to_u32).collect();
    serde_json::to_vec(&PixelsOut {
        kind: TYPE_PIXELS,
        leds: &packed,
    })
}
