//! Escape-time to RGB color mapping.

use serde::{Deserialize, Serialize};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The color as RGBA bytes with full opacity.
    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Build a color from unit-range channels, rounding to nearest.
    fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self::new(channel(r * 255.0), channel(g * 255.0), channel(b * 255.0))
    }
}

/// Map a smooth escape time to a color.
///
/// Points inside the set (`iteration >= max_iterations`) get a dark tint that
/// depends only on `hue`. Escaping points sweep half the hue wheel from `hue`,
/// brightening and saturating as `t = sqrt(iteration / max_iterations)` grows.
/// Negative escape times are treated as zero.
#[must_use]
pub fn colorize(iteration: f64, max_iterations: u32, hue: f64, sat_base: f64) -> Rgb {
    let max = f64::from(max_iterations);
    if iteration >= max {
        let h = hue / 360.0;
        return Rgb::new(
            channel(15.0 + h * 10.0),
            channel(12.0 + h * 8.0),
            channel(20.0 + h * 5.0),
        );
    }

    let t = (iteration.max(0.0) / max).sqrt();
    let h = (hue + t * 180.0) % 360.0;
    let s = sat_base + t * 0.3;
    let l = 0.1 + t * 0.5;
    hsl_to_rgb(h, s, l)
}

/// Standard chroma / intermediate / match HSL conversion.
///
/// `h` in degrees `[0, 360)`. Saturation above 1 is allowed and may push
/// channels out of range; they are clamped when rounded.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r, g, b) = if h < 60.0 {
        (chroma, x, 0.0)
    } else if h < 120.0 {
        (x, chroma, 0.0)
    } else if h < 180.0 {
        (0.0, chroma, x)
    } else if h < 240.0 {
        (0.0, x, chroma)
    } else if h < 300.0 {
        (x, 0.0, chroma)
    } else {
        (chroma, 0.0, x)
    };

    Rgb::from_unit(r + m, g + m, b + m)
}

/// Round to nearest and clamp into a byte.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
