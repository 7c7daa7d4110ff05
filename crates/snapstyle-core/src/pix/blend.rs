//! Image compositing operations
//!
//! Implements the subset of the W3C compositing and blending model that
//! the compositor needs, on straight (non-premultiplied) RGBA pixels:
//!
//! - `source-over`: normal alpha compositing
//! - `destination-out`: erase the destination where the source is opaque
//! - `overlay`: separable blend mode (multiply in shadows, screen in
//!   highlights), followed by source-over
//!
//! Every operation accepts a global opacity that scales the source alpha,
//! the same way a canvas `globalAlpha` does.

use super::{Pix, PixMut};
use crate::color;
use crate::error::{Error, Result};

/// Blend mode for compositing operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Normal alpha compositing
    #[default]
    SourceOver,
    /// Keep the destination only where the source is transparent
    DestinationOut,
    /// Overlay: multiply where the backdrop is dark, screen where light
    Overlay,
}

/// Overlay blend of a single normalized channel.
///
/// `b` is the backdrop, `s` the source.
#[inline]
pub fn overlay_channel(b: f32, s: f32) -> f32 {
    if b <= 0.5 {
        2.0 * b * s
    } else {
        1.0 - 2.0 * (1.0 - b) * (1.0 - s)
    }
}

/// Composite one source pixel onto one destination pixel.
///
/// `opacity` multiplies the source alpha and is clamped to `[0, 1]`.
pub fn blend_pixel(dst: u32, src: u32, mode: BlendMode, opacity: f32) -> u32 {
    let (sr, sg, sb, sa) = unpack(src);
    let (dr, dg, db, da) = unpack(dst);
    let sa = sa * opacity.clamp(0.0, 1.0);

    match mode {
        BlendMode::DestinationOut => {
            let oa = da * (1.0 - sa);
            if oa <= 0.0 {
                return color::TRANSPARENT;
            }
            color::with_alpha(dst, color::to_byte(oa * 255.0))
        }
        BlendMode::SourceOver => source_over((sr, sg, sb), sa, (dr, dg, db), da),
        BlendMode::Overlay => {
            // Blend result is mixed with the source by backdrop alpha
            let mix = |s: f32, d: f32| (1.0 - da) * s + da * overlay_channel(d, s);
            let blended = (mix(sr, dr), mix(sg, dg), mix(sb, db));
            source_over(blended, sa, (dr, dg, db), da)
        }
    }
}

#[inline]
fn unpack(pixel: u32) -> (f32, f32, f32, f32) {
    let (r, g, b, a) = color::extract_rgba(pixel);
    (
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    )
}

#[inline]
fn source_over(s: (f32, f32, f32), sa: f32, d: (f32, f32, f32), da: f32) -> u32 {
    let oa = sa + da * (1.0 - sa);
    if oa <= 0.0 {
        return color::TRANSPARENT;
    }
    let ch = |sc: f32, dc: f32| color::to_byte((sc * sa + dc * da * (1.0 - sa)) / oa * 255.0);
    color::compose_rgba(
        ch(s.0, d.0),
        ch(s.1, d.1),
        ch(s.2, d.2),
        color::to_byte(oa * 255.0),
    )
}

impl PixMut {
    /// Composite `src` onto this image with its top-left corner at (x, y).
    ///
    /// Pixels of `src` that fall outside this image are ignored.
    ///
    /// # Arguments
    ///
    /// * `src` - Source image
    /// * `x` - X offset for placement (may be negative)
    /// * `y` - Y offset for placement (may be negative)
    /// * `mode` - Compositing operator
    /// * `opacity` - Global alpha applied to the source (0.0 to 1.0)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `opacity` is not finite.
    pub fn composite(
        &mut self,
        src: &Pix,
        x: i32,
        y: i32,
        mode: BlendMode,
        opacity: f32,
    ) -> Result<()> {
        check_opacity(opacity)?;
        let dw = self.width() as i64;
        let dh = self.height() as i64;
        for sy in 0..src.height() {
            let ty = y as i64 + sy as i64;
            if ty < 0 || ty >= dh {
                continue;
            }
            let src_row = src.row_data(sy);
            let dst_row = self.row_data_mut(ty as u32);
            for (sx, &s) in src_row.iter().enumerate() {
                let tx = x as i64 + sx as i64;
                if tx < 0 || tx >= dw {
                    continue;
                }
                let d = &mut dst_row[tx as usize];
                *d = blend_pixel(*d, s, mode, opacity);
            }
        }
        Ok(())
    }

    /// Repeat `tile` across the whole image, compositing each copy.
    ///
    /// Tiling starts at the origin, so the pattern is stable for a given
    /// tile regardless of image size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `opacity` is not finite.
    pub fn composite_tiled(&mut self, tile: &Pix, mode: BlendMode, opacity: f32) -> Result<()> {
        check_opacity(opacity)?;
        let tw = tile.width();
        let th = tile.height();
        for y in 0..self.height() {
            let tile_row = tile.row_data(y % th);
            let dst_row = self.row_data_mut(y);
            for (x, d) in dst_row.iter_mut().enumerate() {
                let s = tile_row[x % tw as usize];
                *d = blend_pixel(*d, s, mode, opacity);
            }
        }
        Ok(())
    }
}

fn check_opacity(opacity: f32) -> Result<()> {
    if !opacity.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "opacity must be finite, got {opacity}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_over_opaque_replaces() {
        let dst = color::compose_rgb(10, 20, 30);
        let src = color::compose_rgb(200, 100, 50);
        assert_eq!(blend_pixel(dst, src, BlendMode::SourceOver, 1.0), src);
    }

    #[test]
    fn test_source_over_half_opacity() {
        let dst = color::compose_rgb(0, 0, 0);
        let src = color::compose_rgb(255, 255, 255);
        let out = blend_pixel(dst, src, BlendMode::SourceOver, 0.5);
        assert_eq!(color::extract_rgba(out), (128, 128, 128, 255));
    }

    #[test]
    fn test_source_over_onto_transparent() {
        let src = color::compose_rgba(255, 0, 0, 128);
        let out = blend_pixel(color::TRANSPARENT, src, BlendMode::SourceOver, 1.0);
        assert_eq!(color::extract_rgba(out), (255, 0, 0, 128));
    }

    #[test]
    fn test_destination_out() {
        let dst = color::compose_rgba(9, 9, 9, 200);
        let full = blend_pixel(dst, color::compose_rgb(0, 0, 0), BlendMode::DestinationOut, 1.0);
        assert_eq!(full, color::TRANSPARENT);
        let none = blend_pixel(dst, color::TRANSPARENT, BlendMode::DestinationOut, 1.0);
        assert_eq!(none, dst);
    }

    #[test]
    fn test_overlay_channel() {
        assert_eq!(overlay_channel(0.0, 0.7), 0.0);
        assert_eq!(overlay_channel(1.0, 0.2), 1.0);
        assert!((overlay_channel(0.5, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_overlay_mid_gray_is_neutral() {
        // Overlaying 50% gray onto mid-tones changes very little
        let dst = color::compose_rgb(128, 128, 128);
        let src = color::compose_rgb(128, 128, 128);
        let out = blend_pixel(dst, src, BlendMode::Overlay, 1.0);
        let (r, _, _, a) = color::extract_rgba(out);
        assert!((r as i32 - 128).abs() <= 1);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_composite_clips() {
        let mut dst = PixMut::new_filled(4, 4, 4, color::compose_rgb(0, 0, 0)).unwrap();
        let src: Pix = PixMut::new_filled(3, 3, 4, color::compose_rgb(255, 255, 255))
            .unwrap()
            .into();
        dst.composite(&src, -1, 2, BlendMode::SourceOver, 1.0).unwrap();
        let out: Pix = dst.into();
        assert_eq!(out.get_rgb(0, 2), Some((255, 255, 255)));
        assert_eq!(out.get_rgb(1, 3), Some((255, 255, 255)));
        assert_eq!(out.get_rgb(2, 2), Some((0, 0, 0)));
        assert_eq!(out.get_rgb(0, 1), Some((0, 0, 0)));
    }

    #[test]
    fn test_composite_rejects_nan_opacity() {
        let mut dst = PixMut::new_rgba(2, 2).unwrap();
        let src = Pix::new_rgba(1, 1).unwrap();
        assert!(dst.composite(&src, 0, 0, BlendMode::SourceOver, f32::NAN).is_err());
    }

    #[test]
    fn test_composite_tiled_zero_opacity_is_noop() {
        let base = color::compose_rgb(40, 80, 120);
        let mut dst = PixMut::new_filled(5, 5, 4, base).unwrap();
        let tile: Pix = PixMut::new_filled(2, 2, 4, color::compose_rgb(255, 255, 255))
            .unwrap()
            .into();
        dst.composite_tiled(&tile, BlendMode::Overlay, 0.0).unwrap();
        assert!(dst.data().iter().all(|&p| p == base));
    }
}
