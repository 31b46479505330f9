//! APA102 (`DotStar`) strips on a SPI device

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::{DisplayError, OutputDriver};
use crate::color::Rgb;

/// Global brightness is a 5-bit field
pub const MAX_BRIGHTNESS: u8 = 0x1F;

const START_FRAME: [u8; 4] = [0x00; 4];
const LED_FRAME_MARKER: u8 = 0xE0;

/// Encodes frames into the APA102 wire format
///
/// Each frame is a 4-byte zero start frame, then `0xE0 | brightness, b, g, r`
/// per pixel, then one `0xFF` byte per 16 pixels (rounded up) so the clock
/// reaches the end of the strip.
pub struct Apa102Driver<W: Write> {
    device: Option<W>,
    brightness: u8,
    last_len: usize,
    buffer: Vec<u8>,
}

impl Apa102Driver<File> {
    /// Open a SPI device node such as `/dev/spidev0.1`
    pub fn open(path: impl AsRef<Path>, brightness: u8) -> Result<Self, DisplayError> {
        let device = OpenOptions::new().write(true).open(path)?;
        Ok(Self::new(device, brightness))
    }
}

impl<W: Write> Apa102Driver<W> {
    pub fn new(device: W, brightness: u8) -> Self {
        Self {
            device: Some(device),
            brightness: brightness.min(MAX_BRIGHTNESS),
            last_len: 0,
            buffer: Vec::new(),
        }
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Encode a frame into the internal buffer
    pub fn encode(&mut self, colors: &[Rgb]) -> &[u8] {
        encode_frame(&mut self.buffer, self.brightness, colors);
        &self.buffer
    }

    /// Give back the underlying device, if still open
    pub fn into_inner(self) -> Option<W> {
        self.device
    }
}

fn encode_frame(buffer: &mut Vec<u8>, brightness: u8, colors: &[Rgb]) {
    buffer.clear();
    buffer.extend_from_slice(&START_FRAME);
    let marker = LED_FRAME_MARKER | brightness;
    for color in colors {
        buffer.extend_from_slice(&[marker, color.b, color.g, color.r]);
    }
    buffer.extend(core::iter::repeat_n(0xFF, colors.len().div_ceil(16)));
}

impl<W: Write> OutputDriver for Apa102Driver<W> {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), DisplayError> {
        let Some(device) = self.device.as_mut() else {
            return Err(DisplayError::Closed);
        };
        encode_frame(&mut self.buffer, self.brightness, colors);
        self.last_len = colors.len();
        device.write_all(&self.buffer)?;
        device.flush()?;
        Ok(())
    }

    /// Blank the strip and release the device
    fn close(&mut self) -> Result<(), DisplayError> {
        if self.device.is_none() {
            return Ok(());
        }
        let blank = vec![Rgb::default(); self.last_len];
        let result = self.write(&blank);
        self.device = None;
        result
    }
}
