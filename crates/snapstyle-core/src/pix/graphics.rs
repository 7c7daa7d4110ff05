//! Graphics rendering functions
//!
//! This module provides the fills and draws the compositor is built from:
//! - Two-stop linear gradients rotated about the image center
//! - Resampled image draws clipped to a rounded rectangle

use super::{BlendMode, Pix, PixMut, blend::blend_pixel};
use crate::color;
use crate::error::{Error, Result};
use crate::geom::{RectF, RoundedRect};

/// A two-stop linear gradient between two points
///
/// Positions before the start point take `start_color`, positions past the
/// end point take `end_color`; in between, channels are interpolated
/// linearly in sRGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub start_color: u32,
    pub end_color: u32,
}

impl LinearGradient {
    /// Build a gradient whose axis passes through the center of a
    /// `width x height` image, rotated `angle_deg` degrees clockwise from
    /// the +x axis.
    ///
    /// The half-length of the axis is the image diagonal projected onto
    /// the direction, `(|w cos a| + |h sin a|) / 2`, so the gradient always
    /// spans the image exactly from corner to opposite corner along its
    /// direction. At 0 degrees it runs strictly left to right.
    pub fn rotated(width: u32, height: u32, angle_deg: f64, start_color: u32, end_color: u32) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let w = width as f64;
        let h = height as f64;
        let half = ((w * cos).abs() + (h * sin).abs()) / 2.0;
        let cx = w / 2.0;
        let cy = h / 2.0;
        Self {
            x0: cx - cos * half,
            y0: cy - sin * half,
            x1: cx + cos * half,
            y1: cy + sin * half,
            start_color,
            end_color,
        }
    }

    /// Interpolation parameter for a point, clamped to `[0, 1]`.
    pub fn t_at(&self, px: f64, py: f64) -> f64 {
        let dx = self.x1 - self.x0;
        let dy = self.y1 - self.y0;
        let len2 = dx * dx + dy * dy;
        if len2 <= f64::EPSILON {
            return 0.0;
        }
        (((px - self.x0) * dx + (py - self.y0) * dy) / len2).clamp(0.0, 1.0)
    }

    /// Gradient color at a point.
    pub fn color_at(&self, px: f64, py: f64) -> u32 {
        let t = self.t_at(px, py) as f32;
        let (r0, g0, b0, a0) = color::extract_rgba(self.start_color);
        let (r1, g1, b1, a1) = color::extract_rgba(self.end_color);
        let lerp = |a: u8, b: u8| color::to_byte(a as f32 + (b as f32 - a as f32) * t);
        color::compose_rgba(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1), lerp(a0, a1))
    }
}

impl PixMut {
    /// Fill the whole image with a linear gradient, sampled at pixel centers.
    pub fn fill_linear_gradient(&mut self, gradient: &LinearGradient) {
        for y in 0..self.height() {
            let py = y as f64 + 0.5;
            let row = self.row_data_mut(y);
            for (x, p) in row.iter_mut().enumerate() {
                *p = gradient.color_at(x as f64 + 0.5, py);
            }
        }
    }

    /// Draw `src` scaled into `dest`, clipped to `clip`.
    ///
    /// The source is resampled bilinearly (on premultiplied values, so
    /// transparent regions do not bleed dark fringes) and composited
    /// source-over, with the clip's anti-aliased coverage acting as extra
    /// opacity at the edges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `dest` is empty.
    pub fn draw_image_clipped(&mut self, src: &Pix, dest: RectF, clip: &RoundedRect) -> Result<()> {
        if dest.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "destination rectangle is empty: {}x{}",
                dest.w, dest.h
            )));
        }
        let Some((x0, y0, x1, y1)) = clip.rect.pixel_bounds(1.0, self.width(), self.height())
        else {
            return Ok(());
        };

        let sx_scale = src.width() as f64 / dest.w;
        let sy_scale = src.height() as f64 / dest.h;

        for y in y0..y1 {
            let py = y as f64 + 0.5;
            let v = (py - dest.y) * sy_scale - 0.5;
            for x in x0..x1 {
                let px = x as f64 + 0.5;
                let cov = clip.coverage(px, py);
                if cov <= 0.0 {
                    continue;
                }
                let u = (px - dest.x) * sx_scale - 0.5;
                let s = sample_bilinear(src, u, v);
                let d = self.get_pixel_unchecked(x, y);
                self.set_pixel_unchecked(x, y, blend_pixel(d, s, BlendMode::SourceOver, cov));
            }
        }
        Ok(())
    }
}

/// Sample `src` at continuous coordinates (u, v) with edge clamping.
///
/// RGB images are treated as fully opaque.
pub fn sample_bilinear(src: &Pix, u: f64, v: f64) -> u32 {
    let max_x = (src.width() - 1) as f64;
    let max_y = (src.height() - 1) as f64;
    let u = u.clamp(0.0, max_x);
    let v = v.clamp(0.0, max_y);
    let xa = u.floor();
    let ya = v.floor();
    let fx = (u - xa) as f32;
    let fy = (v - ya) as f32;
    let xa = xa as u32;
    let ya = ya as u32;
    let xb = (xa + 1).min(src.width() - 1);
    let yb = (ya + 1).min(src.height() - 1);

    let opaque = !src.has_alpha();
    let premul = |p: u32| {
        let (r, g, b, a) = color::extract_rgba(p);
        let a = if opaque { 1.0 } else { a as f32 / 255.0 };
        [r as f32 * a, g as f32 * a, b as f32 * a, a]
    };
    let p00 = premul(src.get_pixel_unchecked(xa, ya));
    let p10 = premul(src.get_pixel_unchecked(xb, ya));
    let p01 = premul(src.get_pixel_unchecked(xa, yb));
    let p11 = premul(src.get_pixel_unchecked(xb, yb));

    let mut out = [0.0f32; 4];
    for (i, o) in out.iter_mut().enumerate() {
        let top = p00[i] + (p10[i] - p00[i]) * fx;
        let bottom = p01[i] + (p11[i] - p01[i]) * fx;
        *o = top + (bottom - top) * fy;
    }
    let a = out[3];
    if a <= 0.0 {
        return color::TRANSPARENT;
    }
    color::compose_rgba(
        color::to_byte(out[0] / a),
        color::to_byte(out[1] / a),
        color::to_byte(out[2] / a),
        color::to_byte(a * 255.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: u32 = 0x000000ff;
    const WHITE: u32 = 0xffffffff;

    #[test]
    fn test_gradient_zero_degrees_left_to_right() {
        let g = LinearGradient::rotated(100, 100, 0.0, BLACK, WHITE);
        assert!((g.x0 - 0.0).abs() < 1e-9);
        assert!((g.x1 - 100.0).abs() < 1e-9);
        assert!((g.y0 - 50.0).abs() < 1e-9);
        assert!((g.y1 - 50.0).abs() < 1e-9);
        // Same column, any row: same color
        assert_eq!(g.color_at(10.5, 0.5), g.color_at(10.5, 99.5));
    }

    #[test]
    fn test_gradient_wide_canvas_spans_width() {
        let g = LinearGradient::rotated(400, 100, 0.0, BLACK, WHITE);
        assert!((g.x1 - g.x0 - 400.0).abs() < 1e-9);
        let g = LinearGradient::rotated(400, 100, 90.0, BLACK, WHITE);
        assert!((g.y1 - g.y0 - 100.0).abs() < 1e-9);
        assert!((g.x0 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_gradient_endpoints_colors() {
        let g = LinearGradient::rotated(10, 10, 45.0, BLACK, WHITE);
        assert_eq!(g.color_at(0.0, 0.0), BLACK);
        assert_eq!(g.color_at(10.0, 10.0), WHITE);
        assert!((g.t_at(5.0, 5.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_gradient_180_reverses() {
        let a = LinearGradient::rotated(20, 10, 0.0, BLACK, WHITE);
        let b = LinearGradient::rotated(20, 10, 180.0, WHITE, BLACK);
        assert_eq!(a.color_at(3.5, 4.5), b.color_at(3.5, 4.5));
    }

    #[test]
    fn test_fill_linear_gradient_monotonic() {
        let mut pm = PixMut::new_rgba(16, 4).unwrap();
        pm.fill_linear_gradient(&LinearGradient::rotated(16, 4, 0.0, BLACK, WHITE));
        let pix: Pix = pm.into();
        let mut prev = 0u8;
        for x in 0..16 {
            let (r, _, _) = pix.get_rgb(x, 2).unwrap();
            assert!(r >= prev);
            prev = r;
        }
    }

    #[test]
    fn test_sample_bilinear_midpoint() {
        let src = Pix::from_data(2, 1, 3, vec![BLACK, WHITE]).unwrap();
        let mid = sample_bilinear(&src, 0.5, 0.0);
        assert_eq!(color::extract_rgb(mid), (128, 128, 128));
        assert_eq!(sample_bilinear(&src, -4.0, 0.0), BLACK);
        assert_eq!(sample_bilinear(&src, 9.0, 0.0), WHITE);
    }

    #[test]
    fn test_sample_bilinear_transparent_neighbor_no_fringe() {
        let red = color::compose_rgba(255, 0, 0, 255);
        let src = Pix::from_data(2, 1, 4, vec![red, color::TRANSPARENT]).unwrap();
        let (r, g, b, a) = color::extract_rgba(sample_bilinear(&src, 0.5, 0.0));
        assert_eq!((r, g, b), (255, 0, 0));
        assert_eq!(a, 128);
    }

    #[test]
    fn test_draw_image_clipped_rounds_corners() {
        let mut canvas = PixMut::new_filled(20, 20, 4, BLACK).unwrap();
        let src: Pix = PixMut::new_filled(4, 4, 3, WHITE).unwrap().into();
        let dest = RectF::new_unchecked(0.0, 0.0, 20.0, 20.0);
        let clip = RoundedRect::new(dest, 8.0);
        canvas.draw_image_clipped(&src, dest, &clip).unwrap();
        let out: Pix = canvas.into();
        assert_eq!(out.get_rgb(10, 10), Some((255, 255, 255)));
        assert_eq!(out.get_rgb(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_draw_image_clipped_empty_dest() {
        let mut canvas = PixMut::new_rgba(4, 4).unwrap();
        let src = Pix::new(2, 2).unwrap();
        let dest = RectF::new_unchecked(0.0, 0.0, 0.0, 3.0);
        let clip = RoundedRect::new(dest, 0.0);
        assert!(canvas.draw_image_clipped(&src, dest, &clip).is_err());
    }
}
