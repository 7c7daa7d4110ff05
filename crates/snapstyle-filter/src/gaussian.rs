//! Gaussian blur approximated by repeated box blurs
//!
//! Three successive box blurs with carefully chosen widths approximate a
//! Gaussian closely enough for soft shadows, at a cost independent of
//! sigma.

use crate::block_conv::box_blur_mask_in_place;
use crate::{FilterError, FilterResult};
use snapstyle_core::Mask;

/// Number of box passes used by [`gaussian_blur_mask`]
pub const GAUSSIAN_BOX_PASSES: usize = 3;

/// Widest box returned by [`box_sizes_for_gaussian`]
const MAX_BOX_WIDTH: i64 = u32::MAX as i64;

/// Compute `n` odd box widths whose successive application approximates
/// a Gaussian of standard deviation `sigma`.
///
/// The widths are the two odd integers bracketing the ideal width
/// `sqrt(12 sigma^2 / n + 1)`, mixed so that the total variance matches
/// `sigma^2` as closely as possible. Widths saturate at `u32::MAX`.
pub fn box_sizes_for_gaussian(sigma: f64, n: usize) -> Vec<u32> {
    if n == 0 || sigma <= 0.0 {
        return vec![1; n];
    }
    let nf = n as f64;
    let w_ideal = (12.0 * sigma * sigma / nf + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.clamp(1, MAX_BOX_WIDTH - 2);
    let wu = wl + 2;

    let wlf = wl as f64;
    let m_ideal = (12.0 * sigma * sigma - nf * wlf * wlf - 4.0 * nf * wlf - 3.0 * nf)
        / (-4.0 * wlf - 4.0);
    let m = (m_ideal.round().max(0.0) as usize).min(n);

    (0..n)
        .map(|i| if i < m { wl as u32 } else { wu as u32 })
        .collect()
}

/// Blur a coverage mask with an approximate Gaussian.
///
/// # Arguments
///
/// * `mask` - Coverage mask to blur
/// * `sigma` - Standard deviation in pixels; 0 returns a copy
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `sigma` is negative or
/// not finite.
pub fn gaussian_blur_mask(mask: &Mask, sigma: f64) -> FilterResult<Mask> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "sigma must be finite and non-negative, got {}",
            sigma
        )));
    }
    let mut out = mask.clone();
    if sigma == 0.0 {
        return Ok(out);
    }
    for width in box_sizes_for_gaussian(sigma, GAUSSIAN_BOX_PASSES) {
        box_blur_mask_in_place(&mut out, (width - 1) / 2)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_sizes_are_odd_and_bracketing() {
        for &sigma in &[0.5, 1.0, 2.5, 5.0, 10.0, 25.0] {
            let sizes = box_sizes_for_gaussian(sigma, 3);
            assert_eq!(sizes.len(), 3);
            assert!(sizes.iter().all(|s| s % 2 == 1));
            let min = *sizes.iter().min().unwrap();
            let max = *sizes.iter().max().unwrap();
            assert!(max - min <= 2);
        }
    }

    #[test]
    fn test_box_sizes_match_variance() {
        // Variance of a box of width w is (w^2 - 1) / 12
        let sigma = 10.0;
        let sizes = box_sizes_for_gaussian(sigma, 3);
        let var: f64 = sizes
            .iter()
            .map(|&w| ((w * w) as f64 - 1.0) / 12.0)
            .sum();
        assert!((var.sqrt() - sigma).abs() < 1.0);
    }

    #[test]
    fn test_box_sizes_saturate() {
        for &sigma in &[1e12, 1e200, f64::MAX] {
            let sizes = box_sizes_for_gaussian(sigma, 3);
            assert!(sizes.iter().all(|s| s % 2 == 1));
            assert!(sizes.iter().all(|&s| s >= u32::MAX - 2));
        }
    }

    #[test]
    fn test_huge_sigma_spreads_evenly() {
        let mut m = Mask::new(8, 8).unwrap();
        m.data_mut()[0] = 1.0;
        let out = gaussian_blur_mask(&m, 1e12).unwrap();
        let first = out.data()[0];
        assert!(out.data().iter().all(|&v| v.is_finite() && v == first));
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        let mut m = Mask::new(4, 4).unwrap();
        m.data_mut()[5] = 1.0;
        assert_eq!(gaussian_blur_mask(&m, 0.0).unwrap(), m);
    }

    #[test]
    fn test_invalid_sigma() {
        let m = Mask::new(4, 4).unwrap();
        assert!(gaussian_blur_mask(&m, -1.0).is_err());
        assert!(gaussian_blur_mask(&m, f64::NAN).is_err());
    }

    #[test]
    fn test_blur_is_symmetric_and_peaked() {
        let mut m = Mask::new(41, 41).unwrap();
        m.data_mut()[20 * 41 + 20] = 1.0;
        let out = gaussian_blur_mask(&m, 3.0).unwrap();
        let c = out.get(20, 20).unwrap();
        assert!(c > out.get(23, 20).unwrap());
        assert!((out.get(17, 20).unwrap() - out.get(23, 20).unwrap()).abs() < 1e-6);
        assert!((out.get(20, 17).unwrap() - out.get(20, 23).unwrap()).abs() < 1e-6);
        assert!((out.sum() - 1.0).abs() < 1e-4);
    }
}
