//! SnapStyle Core - Raster data structures and compositing primitives
//!
//! This crate provides the fundamental data structures used throughout
//! the SnapStyle workspace:
//!
//! - [`Pix`] / [`PixMut`] - The RGBA raster container (immutable / mutable)
//! - [`Mask`] - Floating-point coverage plane used for shapes and shadows
//! - [`RectF`] / [`RoundedRect`] - Sub-pixel rectangle geometry
//! - [`BlendMode`] - Canvas-style compositing operators
//! - [`LinearGradient`] - Two-stop linear gradient fills

pub mod error;
pub mod geom;
pub mod mask;
pub mod pix;

pub use error::{Error, Result};
pub use geom::{RectF, RoundedRect};
pub use mask::Mask;
pub use pix::{BlendMode, LinearGradient, Pix, PixMut};

/// Color channel indices and helper functions for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Red channel (MSB, byte 0)
    pub const RED: usize = 0;
    /// Green channel (byte 1)
    pub const GREEN: usize = 1;
    /// Blue channel (byte 2)
    pub const BLUE: usize = 2;
    /// Alpha channel (LSB, byte 3)
    pub const ALPHA: usize = 3;

    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Fully transparent black.
    pub const TRANSPARENT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Replace the alpha byte of a pixel.
    #[inline]
    pub fn with_alpha(pixel: u32, a: u8) -> u32 {
        (pixel & 0xffff_ff00) | a as u32
    }

    /// Convert a float channel value to a byte, rounding and clamping.
    #[inline]
    pub fn to_byte(v: f32) -> u8 {
        v.round().clamp(0.0, 255.0) as u8
    }

}
