//! Settings file loading and validation
//!
//! ```toml
//! [pixels]
//! count = 450
//!
//! [pixels.angles]
//! "0" = [0, 450]
//! "180" = [24]
//!
//! [frame]
//! fps = 60.0
//!
//! [transport]
//! listen = "0.0.0.0:7890"
//!
//! [display]
//! driver = "terminal"
//! ```
//!
//! Only `[pixels]` is required.

use core::fmt;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::driver::{DriverKind, MAX_BRIGHTNESS};
use crate::frame_scheduler::DEFAULT_FPS;
use crate::frame_state::{DEFAULT_SPIN_LIMIT, DEFAULT_SPIN_STEP};
use crate::geometry::{AngleTable, Geometry, GeometryError};
use crate::mode::SceneMode;
use crate::scene::{Scene, SceneId};
use crate::sprite::SpriteId;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(toml::de::Error),
    /// Fewer than two reference angles
    TooFewAngles(usize),
    /// An angle lists no pixel indices
    EmptyAngleGroup(String),
    /// An angle key is not a finite number
    InvalidAngle(String),
    /// The same index is listed under two angles
    DuplicateIndex {
        index: usize,
        first: String,
        second: String,
    },
    IndexBeyondStrip { index: usize, count: usize },
    Geometry(GeometryError),
    UnknownScene(String),
    UnknownSprite(String),
    InvalidFrameRate(f32),
    /// A zero spin step would never reach the spin limit
    ZeroSpinStep,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid settings: {err}"),
            Self::TooFewAngles(found) => {
                write!(f, "at least two reference angles are required, found {found}")
            }
            Self::EmptyAngleGroup(angle) => write!(f, "angle {angle} lists no pixels"),
            Self::InvalidAngle(angle) => write!(f, "angle {angle:?} is not a number"),
            Self::DuplicateIndex {
                index,
                first,
                second,
            } => write!(f, "pixel {index} is listed under both {first} and {second}"),
            Self::IndexBeyondStrip { index, count } => {
                write!(f, "pixel {index} is beyond the end of a strip of {count}")
            }
            Self::Geometry(err) => write!(f, "invalid geometry: {err}"),
            Self::UnknownScene(name) => {
                let known: Vec<_> = SceneId::ALL.iter().map(|id| id.as_str()).collect();
                write!(f, "unknown scene {name:?}, expected one of {}", known.join(", "))
            }
            Self::UnknownSprite(name) => {
                let known: Vec<_> = SpriteId::ALL.iter().map(|id| id.as_str()).collect();
                write!(f, "unknown sprite {name:?}, expected one of {}", known.join(", "))
            }
            Self::InvalidFrameRate(fps) => write!(f, "frame rate must be positive, got {fps}"),
            Self::ZeroSpinStep => f.write_str("spin_step must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Geometry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GeometryError> for ConfigError {
    fn from(err: GeometryError) -> Self {
        Self::Geometry(err)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub pixels: PixelsConfig,
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Strip length and the measured angle of some of its pixels
#[derive(Debug, Clone, Deserialize)]
pub struct PixelsConfig {
    pub count: i64,
    /// Angle in degrees, as a string key, to the pixels measured at that angle
    pub angles: BTreeMap<String, Vec<usize>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub fps: f32,
    pub spin_step: usize,
    pub spin_limit: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            spin_step: DEFAULT_SPIN_STEP,
            spin_limit: DEFAULT_SPIN_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Address to receive control messages on
    pub listen: Option<SocketAddr>,
    /// Where a leader publishes its frames
    pub peer: Option<SocketAddr>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub driver: DriverKind,
    pub device: PathBuf,
    pub brightness: u8,
    /// Width and height of the terminal plot, in cells
    pub size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            driver: DriverKind::Terminal,
            device: PathBuf::from("/dev/spidev0.1"),
            brightness: MAX_BRIGHTNESS,
            size: 40,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text).map_err(ConfigError::Parse)?;
        settings.frame.validate()?;
        Ok(settings)
    }
}

impl FrameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::InvalidFrameRate(self.fps));
        }
        if self.spin_step == 0 {
            return Err(ConfigError::ZeroSpinStep);
        }
        Ok(())
    }
}

impl PixelsConfig {
    /// Validate the angle groups into a table
    pub fn angle_table(&self) -> Result<AngleTable, ConfigError> {
        let count = self.strip_len()?;
        if self.angles.len() < 2 {
            return Err(ConfigError::TooFewAngles(self.angles.len()));
        }

        let mut table = AngleTable::new();
        let mut seen: HashMap<usize, &str> = HashMap::new();
        for (key, indices) in &self.angles {
            let angle = key
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|angle| angle.is_finite())
                .ok_or_else(|| ConfigError::InvalidAngle(key.clone()))?;
            if indices.is_empty() {
                return Err(ConfigError::EmptyAngleGroup(key.clone()));
            }
            for &index in indices {
                if index > count {
                    return Err(ConfigError::IndexBeyondStrip { index, count });
                }
                if let Some(first) = seen.insert(index, key) {
                    return Err(ConfigError::DuplicateIndex {
                        index,
                        first: first.to_owned(),
                        second: key.clone(),
                    });
                }
                table.insert(index, angle);
            }
        }
        Ok(table)
    }

    /// Build the validated geometry
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        Ok(Geometry::new(self.strip_len()?, self.angle_table()?)?)
    }

    fn strip_len(&self) -> Result<usize, ConfigError> {
        usize::try_from(self.count)
            .ok()
            .filter(|count| *count > 0)
            .ok_or(ConfigError::Geometry(GeometryError::EmptyStrip))
    }
}

/// Build the mode for a scene or sprite requested by name
///
/// A scene name takes precedence over a sprite name. Returns `None` when
/// neither is given.
pub fn custom_mode(
    scene: Option<&str>,
    sprite: Option<&str>,
    geometry: &Geometry,
) -> Result<Option<SceneMode>, ConfigError> {
    let scene = match (scene, sprite) {
        (Some(name), _) => SceneId::parse_from_str(name)
            .ok_or_else(|| ConfigError::UnknownScene(name.to_owned()))?
            .build(geometry),
        (None, Some(name)) => {
            let id = SpriteId::parse_from_str(name)
                .ok_or_else(|| ConfigError::UnknownSprite(name.to_owned()))?;
            Scene::from_sprite(id, geometry)
        }
        (None, None) => return Ok(None),
    };
    Ok(Some(SceneMode::new(vec![scene])))
}
