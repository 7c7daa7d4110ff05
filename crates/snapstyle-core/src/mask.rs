//! Mask - Floating-point coverage plane
//!
//! A `Mask` stores one `f32` coverage value in `[0, 1]` per pixel. Shapes
//! are rasterized into masks, filters blur them, and the compositor turns
//! them into tinted layers. Keeping coverage separate from color lets the
//! shadow renderer blur geometry without touching pixel data.

use crate::error::{Error, Result};
use crate::geom::RoundedRect;
use crate::pix::{Pix, PixMut, fits_allocation};
use crate::color;

/// Coverage plane with the same dimensions as a target image
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Mask {
    /// Create an empty (all zero) mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|&n| fits_allocation::<f32>(n))
            .ok_or(Error::InvalidDimension { width, height })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::InvalidDimension { width, height })?;
        data.resize(len, 0.0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Rasterize a rounded rectangle with anti-aliased edges.
    ///
    /// Only the pixels around the shape's bounding box are visited.
    pub fn from_rounded_rect(width: u32, height: u32, shape: &RoundedRect) -> Result<Self> {
        let mut mask = Self::new(width, height)?;
        if let Some((x0, y0, x1, y1)) = shape.rect.pixel_bounds(1.0, width, height) {
            for y in y0..y1 {
                let row = y as usize * width as usize;
                for x in x0..x1 {
                    mask.data[row + x as usize] =
                        shape.coverage(x as f64 + 0.5, y as f64 + 0.5);
                }
            }
        }
        Ok(mask)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw coverage values, row-major.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw coverage values, row-major.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Coverage at (x, y), or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Sum of all coverage values.
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }

    /// Erase `other` from this mask: `self = self * (1 - other)`.
    ///
    /// This is the coverage form of the `destination-out` operator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if sizes differ.
    pub fn erase(&mut self, other: &Mask) -> Result<()> {
        self.check_same_size(other)?;
        for (d, &s) in self.data.iter_mut().zip(&other.data) {
            *d *= 1.0 - s;
        }
        Ok(())
    }

    /// Convert to a layer image: every pixel is `rgb` with alpha equal to
    /// `coverage * opacity`.
    pub fn to_layer(&self, r: u8, g: u8, b: u8, opacity: f32) -> Result<Pix> {
        let mut layer = PixMut::new_rgba(self.width, self.height)?;
        for (dst, &cov) in layer.data_mut().iter_mut().zip(&self.data) {
            let a = color::to_byte(cov.clamp(0.0, 1.0) * opacity * 255.0);
            *dst = color::compose_rgba(r, g, b, a);
        }
        Ok(layer.into())
    }

    fn check_same_size(&self, other: &Mask) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (other.width, other.height),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::RectF;

    #[test]
    fn test_new_invalid() {
        assert!(Mask::new(0, 4).is_err());
        assert!(Mask::new(u32::MAX, u32::MAX).is_err());
    }

    #[test]
    fn test_rounded_rect_square_corners_area() {
        let shape = RoundedRect::new(RectF::new_unchecked(2.0, 3.0, 5.0, 4.0), 0.0);
        let mask = Mask::from_rounded_rect(10, 10, &shape).unwrap();
        assert!((mask.sum() - 20.0).abs() < 1e-6);
        assert_eq!(mask.get(2, 3), Some(1.0));
        assert_eq!(mask.get(1, 3), Some(0.0));
        assert_eq!(mask.get(7, 3), Some(0.0));
    }

    #[test]
    fn test_erase_is_destination_out() {
        let shape = RoundedRect::new(RectF::new_unchecked(0.0, 0.0, 4.0, 4.0), 0.0);
        let mut a = Mask::from_rounded_rect(8, 8, &shape).unwrap();
        let b = a.clone();
        a.erase(&b).unwrap();
        assert_eq!(a.sum(), 0.0);
        let other = Mask::new(4, 4).unwrap();
        assert!(a.erase(&other).is_err());
    }

    #[test]
    fn test_to_layer_alpha() {
        let shape = RoundedRect::new(RectF::new_unchecked(0.0, 0.0, 2.0, 2.0), 0.0);
        let mask = Mask::from_rounded_rect(4, 4, &shape).unwrap();
        let layer = mask.to_layer(0, 0, 0, 0.5).unwrap();
        assert_eq!(layer.get_rgba(0, 0), Some((0, 0, 0, 128)));
        assert_eq!(layer.get_rgba(3, 3), Some((0, 0, 0, 0)));
    }
}
