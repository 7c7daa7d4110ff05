//! PIX - The main raster container
//!
//! `Pix` holds a 32-bit RGBA image. Every pixel is one packed word in
//! `0xRRGGBBAA` order (see [`crate::color`]).
//!
//! # Samples per pixel
//!
//! - `spp = 3`: RGB image, the alpha byte is ignored on export
//! - `spp = 4`: RGBA image, alpha is meaningful
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;
pub mod blend;
pub mod graphics;

pub use blend::BlendMode;
pub use graphics::LinearGradient;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal PIX data
#[derive(Debug, PartialEq, Eq)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel (3 for RGB, 4 for RGBA)
    spp: u32,
    /// The image data (one packed word per pixel)
    data: Vec<u32>,
}

/// Whether `n` elements of `T` stay within the allocator's size limit.
pub(crate) fn fits_allocation<T>(n: usize) -> bool {
    n.checked_mul(size_of::<T>())
        .is_some_and(|bytes| bytes <= isize::MAX as usize)
}

impl PixData {
    fn alloc(width: u32, height: u32, spp: u32, fill: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if spp != 3 && spp != 4 {
            return Err(Error::InvalidSpp(spp));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|&n| fits_allocation::<u32>(n))
            .ok_or(Error::InvalidDimension { width, height })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::InvalidDimension { width, height })?;
        data.resize(len, fill);
        Ok(Self {
            width,
            height,
            spp,
            data,
        })
    }
}

/// PIX - Main raster container
///
/// # Examples
///
/// ```
/// use snapstyle_core::Pix;
///
/// let pix = Pix::new(640, 480).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// assert_eq!(pix.spp(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new RGB image initialized to zero (black).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::alloc(width, height, 3, 0)?),
        })
    }

    /// Create a new RGBA image initialized to transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_rgba(width: u32, height: u32) -> Result<Self> {
        Ok(PixMut::new_rgba(width, height)?.into())
    }

    /// Create an image from packed `0xRRGGBBAA` words.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `data.len()` is not
    /// `width * height`, or a dimension / spp error.
    pub fn from_data(width: u32, height: u32, spp: u32, data: Vec<u32>) -> Result<Self> {
        let mut pd = PixData::alloc(width, height, spp, 0)?;
        if data.len() != pd.data.len() {
            return Err(Error::IndexOutOfBounds {
                index: data.len(),
                len: pd.data.len(),
            });
        }
        pd.data = data;
        Ok(Pix {
            inner: Arc::new(pd),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Check whether the alpha channel is meaningful.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.inner.spp == 4
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get one row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.width) as usize;
        let end = start + self.inner.width as usize;
        &self.inner.data[start..end]
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(PixData {
                width: self.inner.width,
                height: self.inner.height,
                spp: self.inner.spp,
                data: self.inner.data.clone(),
            }),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Get a mutable image, copying only if the data is shared.
    pub fn into_mut(self) -> PixMut {
        match self.try_into_mut() {
            Ok(pm) => pm,
            Err(pix) => pix.to_mut(),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: PixData {
                width: self.inner.width,
                height: self.inner.height,
                spp: self.inner.spp,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new RGBA image initialized to transparent black.
    pub fn new_rgba(width: u32, height: u32) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::alloc(width, height, 4, 0)?,
        })
    }

    /// Create a new image with every pixel set to `pixel`.
    pub fn new_filled(width: u32, height: u32, spp: u32, pixel: u32) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::alloc(width, height, spp, pixel)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get one mutable row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.width) as usize;
        let end = start + self.inner.width as usize;
        &mut self.inner.data[start..end]
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.spp(), 3);
        assert_eq!(pix.data().len(), 20_000);
    }

    #[test]
    fn test_pix_creation_invalid() {
        assert!(Pix::new(0, 100).is_err());
        assert!(Pix::new(100, 0).is_err());
        assert!(PixMut::new_filled(4, 4, 2, 0).is_err());
    }

    #[test]
    fn test_pix_creation_too_large() {
        assert!(matches!(
            PixMut::new_filled(u32::MAX, u32::MAX, 4, 0),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_pix_clone_shares_data() {
        let pix1 = Pix::new(10, 10).unwrap();
        let pix2 = pix1.clone();
        assert_eq!(pix1.ref_count(), 2);
        assert_eq!(pix1.data().as_ptr(), pix2.data().as_ptr());
    }

    #[test]
    fn test_pix_deep_clone() {
        let pix1 = Pix::new(10, 10).unwrap();
        let pix2 = pix1.deep_clone();
        assert_eq!(pix1.ref_count(), 1);
        assert_ne!(pix1.data().as_ptr(), pix2.data().as_ptr());
        assert_eq!(pix1, pix2);
    }

    #[test]
    fn test_try_into_mut_shared_fails() {
        let pix = Pix::new(4, 4).unwrap();
        let other = pix.clone();
        let pix = pix.try_into_mut().unwrap_err();
        drop(other);
        assert!(pix.try_into_mut().is_ok());
    }

    #[test]
    fn test_from_data() {
        let data = vec![color::compose_rgb(1, 2, 3); 6];
        let pix = Pix::from_data(3, 2, 3, data).unwrap();
        assert_eq!(pix.get_rgb(2, 1), Some((1, 2, 3)));
        assert!(Pix::from_data(3, 2, 3, vec![0; 5]).is_err());
    }

    #[test]
    fn test_row_data() {
        let mut pm = PixMut::new_rgba(3, 2).unwrap();
        pm.row_data_mut(1).fill(7);
        let pix: Pix = pm.into();
        assert_eq!(pix.row_data(0), &[0, 0, 0]);
        assert_eq!(pix.row_data(1), &[7, 7, 7]);
    }
}
