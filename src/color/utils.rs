pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    math8::scale8,
};

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Convert a floating point HSV triple to RGB
///
/// # Arguments
/// * `hue` - Hue in turns; any value is wrapped into `[0, 1)`
/// * `sat` - Saturation, clamped to `[0, 1]`
/// * `val` - Value, clamped to `[0, 1]`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv(hue: f32, sat: f32, val: f32) -> Rgb {
    let hue = hue.rem_euclid(1.0);
    hsv2rgb(Hsv {
        hue: (hue * 256.0).min(255.0) as u8,
        sat: (sat.clamp(0.0, 1.0) * 255.0).round() as u8,
        val: (val.clamp(0.0, 1.0) * 255.0).round() as u8,
    })
}

/// Scale every channel of a color by `amount` (0 = black, 255 = unchanged)
#[inline]
pub fn fade(color: Rgb, amount: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, amount),
        g: scale8(color.g, amount),
        b: scale8(color.b, amount),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}
