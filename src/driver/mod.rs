//! Output drivers
//!
//! A driver receives one complete frame per tick. Implement [`OutputDriver`]
//! to support other hardware.

mod apa102;
mod terminal;

pub use apa102::{Apa102Driver, MAX_BRIGHTNESS};
pub use terminal::TerminalDriver;

use core::fmt;
use std::io;

use crate::color::Rgb;

#[derive(Debug)]
pub enum DisplayError {
    Io(io::Error),
    /// The driver was written to after being closed
    Closed,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "display write failed: {err}"),
            Self::Closed => write!(f, "display is closed"),
        }
    }
}

impl std::error::Error for DisplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Closed => None,
        }
    }
}

impl From<io::Error> for DisplayError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Abstract LED driver trait
///
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    /// Show one frame
    fn write(&mut self, colors: &[Rgb]) -> Result<(), DisplayError>;

    /// Release the device; best effort, errors are only logged by callers
    fn close(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

impl<D: OutputDriver + ?Sized> OutputDriver for Box<D> {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), DisplayError> {
        (**self).write(colors)
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        (**self).close()
    }
}

/// Driver that discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDriver;

impl OutputDriver for NullDriver {
    fn write(&mut self, _colors: &[Rgb]) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Driver kinds selectable from configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    #[default]
    Terminal,
    Apa102,
    Null,
}

impl DriverKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Apa102 => "apa102",
            Self::Null => "null",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            "terminal" => Some(Self::Terminal),
            "apa102" => Some(Self::Apa102),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}
