//! Color space conversion
//!
//! Provides conversion between the color representations used by the
//! picker and the palette generator:
//! - hex text <-> RGB
//! - RGB <-> HSV (Hue, Saturation, Value)
//! - RGB <-> HSL (Hue, Saturation, Lightness)
//! - RGB -> contrasting text color
//!
//! Hue is in degrees `[0, 360)`; saturation, value and lightness are
//! percentages `[0, 100]`. Every function is pure and never panics on bad
//! input: invalid hex text yields `None` or a fixed fallback color.

use crate::ColorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Round floating-point channels to the nearest integer.
    ///
    /// Channels are expected in `[0, 255]`; out-of-range values are
    /// clamped.
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: channel_to_u8(r),
            g: channel_to_u8(g),
            b: channel_to_u8(b),
        }
    }

    /// Perceived luminance `0.299 R + 0.587 G + 0.114 B`, in `[0, 255]`.
    pub fn luminance(&self) -> f64 {
        self.luminance_milli() as f64 / 1000.0
    }

    /// Luminance scaled by 1000, computed exactly in integers.
    pub fn luminance_milli(&self) -> u32 {
        299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Uppercase `#RRGGBB`, as shown on swatches
    pub fn to_hex_upper(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Pack into a `0xRRGGBBAA` pixel with full alpha.
    pub fn to_pixel(&self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | 0xff
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s).ok_or_else(|| ColorError::InvalidHex(s.to_string()))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// HSV color representation
///
/// - `h`: Hue in degrees `[0, 360)`
/// - `s`: Saturation in percent `[0, 100]`
/// - `v`: Value in percent `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    /// Create a new HSV color
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

/// HSL color representation
///
/// - `h`: Hue in degrees `[0, 360)`
/// - `s`: Saturation in percent `[0, 100]`
/// - `l`: Lightness in percent `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Create a new HSL color
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// Color substituted for invalid hex input.
///
/// Keeps the picker stable while a user is mid-edit of the hex field.
pub const FALLBACK_HSV: Hsv = Hsv::new(210.0, 100.0, 100.0);

/// Contrast text colors returned by [`contrast_color`]
pub const CONTRAST_DARK: &str = "#000000";
pub const CONTRAST_LIGHT: &str = "#ffffff";

/// Luminance threshold (x1000) at or above which dark text is chosen
const CONTRAST_THRESHOLD_MILLI: u32 = 128_000;

#[inline]
fn channel_to_u8(c: f64) -> u8 {
    debug_assert!(
        !c.is_finite() || (-0.5..=255.5).contains(&c),
        "channel out of range: {c}"
    );
    if c.is_nan() {
        return 0;
    }
    c.round().clamp(0.0, 255.0) as u8
}

/// Wrap a hue in degrees into `[0, 360)`.
///
/// Negative hues wrap upward (`-20` becomes `340`). Non-finite input maps
/// to 0.
pub fn wrap_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let w = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if w >= 360.0 { 0.0 } else { w }
}

/// Parse `#rrggbb` or `rrggbb` (case-insensitive) into RGB.
///
/// Returns `None` for any other length or a non-hex character.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Format floating-point channels as lowercase `#rrggbb`.
///
/// Each channel is rounded to the nearest integer. Channels must lie in
/// `[0, 255]`; this is checked in debug builds and clamped otherwise.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Rgb::from_f64(r, g, b).to_hex()
}

/// Normalized channels plus max, min and their difference
fn decompose(rgb: Rgb) -> (f64, f64, f64, f64, f64, f64) {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    (r, g, b, max, min, max - min)
}

/// Hue in degrees from normalized channels; requires `delta > 0`.
fn hue_of(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    let h = if max == r {
        (g - b) / delta
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    wrap_hue(h * 60.0)
}

/// RGB from hue plus chroma and the lightness/value match offset
fn from_chroma(h: f64, c: f64, m: f64) -> Rgb {
    let hp = wrap_hue(h) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgb::from_f64((r1 + m) * 255.0, (g1 + m) * 255.0, (b1 + m) * 255.0)
}

/// Convert RGB to HSV.
///
/// A fully desaturated color (`max == min`) has hue 0 and saturation 0.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let (r, g, b, max, min, delta) = decompose(rgb);
    let v = max * 100.0;
    if max == min {
        return Hsv::new(0.0, 0.0, v);
    }
    let s = delta / max * 100.0;
    Hsv::new(hue_of(r, g, b, max, delta), s, v)
}

/// Convert HSV to RGB.
///
/// Hue wraps modulo 360; saturation and value are clamped to `[0, 100]`.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let s = hsv.s.clamp(0.0, 100.0) / 100.0;
    let v = hsv.v.clamp(0.0, 100.0) / 100.0;
    let c = v * s;
    from_chroma(hsv.h, c, v - c)
}

/// Convert RGB to HSL.
///
/// Lightness is `(max + min) / 2`. A fully desaturated color has hue 0 and
/// saturation 0.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (r, g, b, max, min, delta) = decompose(rgb);
    let l = (max + min) / 2.0;
    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }
    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    Hsl::new(hue_of(r, g, b, max, delta), s * 100.0, l * 100.0)
}

/// Convert HSL to RGB.
///
/// Hue wraps modulo 360; saturation and lightness are clamped to
/// `[0, 100]`.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let s = hsl.s.clamp(0.0, 100.0) / 100.0;
    let l = hsl.l.clamp(0.0, 100.0) / 100.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    from_chroma(hsl.h, c, l - c / 2.0)
}

/// Parse hex text into HSV, falling back to [`FALLBACK_HSV`] on invalid
/// input.
pub fn hex_to_hsv(hex: &str) -> Hsv {
    hex_to_rgb(hex).map(rgb_to_hsv).unwrap_or(FALLBACK_HSV)
}

/// Parse hex text into HSL, falling back to the HSL form of
/// [`FALLBACK_HSV`] on invalid input.
pub fn hex_to_hsl(hex: &str) -> Hsl {
    rgb_to_hsl(hex_to_rgb(hex).unwrap_or_else(fallback_rgb))
}

/// RGB form of [`FALLBACK_HSV`]
pub fn fallback_rgb() -> Rgb {
    hsv_to_rgb(FALLBACK_HSV)
}

/// Format HSV as lowercase `#rrggbb`
pub fn hsv_to_hex(hsv: Hsv) -> String {
    hsv_to_rgb(hsv).to_hex()
}

/// Format HSL as lowercase `#rrggbb`
pub fn hsl_to_hex(hsl: Hsl) -> String {
    hsl_to_rgb(hsl).to_hex()
}

/// Pick black or white text for legibility on a background color.
///
/// Uses luminance `0.299 R + 0.587 G + 0.114 B`: black at 128 or above,
/// white below. Invalid hex is treated as the fallback color.
pub fn contrast_color(hex: &str) -> &'static str {
    contrast_for(hex_to_rgb(hex).unwrap_or_else(fallback_rgb))
}

/// [`contrast_color`] for an already parsed color
pub fn contrast_for(rgb: Rgb) -> &'static str {
    if rgb.luminance_milli() >= CONTRAST_THRESHOLD_MILLI {
        CONTRAST_DARK
    } else {
        CONTRAST_LIGHT
    }
}
