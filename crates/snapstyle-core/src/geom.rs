//! RectF, RoundedRect - Sub-pixel rectangle geometry
//!
//! Placement math in the compositor happens in floating point so that
//! fitting, panning and zooming never accumulate integer rounding. These
//! types are small `Copy` values.

use crate::error::{Error, Result};

/// An axis-aligned rectangle with floating-point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    /// Left x coordinate
    pub x: f64,
    /// Top y coordinate
    pub y: f64,
    /// Width
    pub w: f64,
    /// Height
    pub h: f64,
}

impl RectF {
    /// Create a new rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if any component is not finite or if width or
    /// height is negative.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Result<Self> {
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "rectangle components must be finite: ({x}, {y}, {w}, {h})"
            )));
        }
        if w < 0.0 || h < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "rectangle dimensions must be non-negative: w={w}, h={h}"
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a rectangle without validation
    pub const fn new_unchecked(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle of the given size centered on a point
    pub fn centered_at(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Get the center x coordinate
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    /// Get the center y coordinate
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }

    /// Check if the rectangle has no area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Shrink the rectangle by `amount` on all four sides.
    ///
    /// The result may have zero or negative extent; callers decide
    /// whether that is an error.
    pub fn inset(&self, amount: f64) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            w: self.w - 2.0 * amount,
            h: self.h - 2.0 * amount,
        }
    }

    /// Move the rectangle by (dx, dy)
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Scale the rectangle about its own center
    pub fn scale_about_center(&self, factor: f64) -> Self {
        Self::centered_at(
            self.center_x(),
            self.center_y(),
            self.w * factor,
            self.h * factor,
        )
    }

    /// Largest rectangle with the aspect ratio of `content_w x content_h`
    /// that fits inside `self`, centered.
    ///
    /// Returns `None` if either the container or the content is empty.
    pub fn contain(&self, content_w: f64, content_h: f64) -> Option<Self> {
        if self.is_empty() || content_w <= 0.0 || content_h <= 0.0 {
            return None;
        }
        let ratio = f64::min(self.w / content_w, self.h / content_h);
        Some(Self::centered_at(
            self.center_x(),
            self.center_y(),
            content_w * ratio,
            content_h * ratio,
        ))
    }

    /// Integer pixel bounds `(x0, y0, x1, y1)` covering this rectangle,
    /// expanded by `margin` and clipped to `width x height`.
    ///
    /// Returns `None` when the clipped region is empty.
    pub fn pixel_bounds(
        &self,
        margin: f64,
        width: u32,
        height: u32,
    ) -> Option<(u32, u32, u32, u32)> {
        let x0 = (self.x - margin).floor().max(0.0);
        let y0 = (self.y - margin).floor().max(0.0);
        let x1 = (self.right() + margin).ceil().min(width as f64);
        let y1 = (self.bottom() + margin).ceil().min(height as f64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// A rectangle with uniformly rounded corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub rect: RectF,
    pub radius: f64,
}

impl RoundedRect {
    /// Create a rounded rectangle.
    ///
    /// The radius is clamped to `[0, min(w, h) / 2]`, matching how canvas
    /// implementations resolve oversized corner radii.
    pub fn new(rect: RectF, radius: f64) -> Self {
        let max_radius = f64::min(rect.w, rect.h).max(0.0) / 2.0;
        Self {
            rect,
            radius: radius.clamp(0.0, max_radius),
        }
    }

    /// Signed distance from `(px, py)` to the shape outline.
    ///
    /// Negative inside, positive outside.
    pub fn signed_distance(&self, px: f64, py: f64) -> f64 {
        let r = self.radius;
        let hw = self.rect.w / 2.0;
        let hh = self.rect.h / 2.0;
        let qx = (px - self.rect.center_x()).abs() - (hw - r);
        let qy = (py - self.rect.center_y()).abs() - (hh - r);
        let outside = f64::hypot(qx.max(0.0), qy.max(0.0));
        let inside = f64::max(qx, qy).min(0.0);
        outside + inside - r
    }

    /// Anti-aliased coverage of the pixel whose center is `(px, py)`,
    /// in `[0, 1]`.
    #[inline]
    pub fn coverage(&self, px: f64, py: f64) -> f32 {
        if self.rect.is_empty() {
            return 0.0;
        }
        (0.5 - self.signed_distance(px, py)).clamp(0.0, 1.0) as f32
    }
}
