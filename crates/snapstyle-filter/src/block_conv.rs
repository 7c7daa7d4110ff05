//! Box blur of coverage masks using running sums
//!
//! Each pass runs in O(1) per pixel regardless of the box radius. Samples
//! outside the mask count as zero coverage, so blurred shapes fade out
//! toward the borders instead of smearing edge values.

use crate::FilterResult;
use snapstyle_core::Mask;

/// Horizontal box average of radius `r` (window `2r + 1`), written into `out`.
fn box_pass_h(src: &[f32], out: &mut [f32], w: usize, h: usize, r: usize) {
    let norm = 1.0 / (2 * r + 1) as f32;
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        let dst = &mut out[y * w..(y + 1) * w];
        // Window for x = 0 covers [-r, r]
        let mut acc: f32 = row.iter().take(r + 1).sum();
        for x in 0..w {
            dst[x] = acc * norm;
            if x + r + 1 < w {
                acc += row[x + r + 1];
            }
            if x >= r {
                acc -= row[x - r];
            }
        }
    }
}

/// Vertical box average of radius `r`, written into `out`.
fn box_pass_v(src: &[f32], out: &mut [f32], w: usize, h: usize, r: usize) {
    let norm = 1.0 / (2 * r + 1) as f32;
    for x in 0..w {
        let mut acc: f32 = (0..=r.min(h - 1)).map(|y| src[y * w + x]).sum();
        for y in 0..h {
            out[y * w + x] = acc * norm;
            if y + r + 1 < h {
                acc += src[(y + r + 1) * w + x];
            }
            if y >= r {
                acc -= src[(y - r) * w + x];
            }
        }
    }
}

/// Blur a mask with a separable box filter.
///
/// # Arguments
///
/// * `mask` - Coverage mask to blur
/// * `radius` - Box half-width; the window is `2 * radius + 1` pixels
///
/// A radius of 0 returns a copy. Any radius is accepted; once the window
/// covers the whole mask every output value is the mask sum divided by
/// the window area.
pub fn box_blur_mask(mask: &Mask, radius: u32) -> FilterResult<Mask> {
    let mut out = mask.clone();
    box_blur_mask_in_place(&mut out, radius)?;
    Ok(out)
}

/// In-place variant of [`box_blur_mask`].
pub fn box_blur_mask_in_place(mask: &mut Mask, radius: u32) -> FilterResult<()> {
    if radius == 0 {
        return Ok(());
    }
    let w = mask.width() as usize;
    let h = mask.height() as usize;
    let r = radius as usize;

    let mut tmp = vec![0.0f32; w * h];
    box_pass_h(mask.data(), &mut tmp, w, h, r);
    box_pass_v(&tmp, mask.data_mut(), w, h, r);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse(w: u32, h: u32, x: u32, y: u32) -> Mask {
        let mut m = Mask::new(w, h).unwrap();
        m.data_mut()[(y * w + x) as usize] = 1.0;
        m
    }

    #[test]
    fn test_radius_zero_is_identity() {
        let m = impulse(5, 5, 2, 2);
        assert_eq!(box_blur_mask(&m, 0).unwrap(), m);
    }

    #[test]
    fn test_impulse_spreads_uniformly() {
        let m = box_blur_mask(&impulse(9, 9, 4, 4), 1).unwrap();
        let ninth = 1.0 / 9.0;
        for y in 3..=5 {
            for x in 3..=5 {
                assert!((m.get(x, y).unwrap() - ninth).abs() < 1e-6);
            }
        }
        assert_eq!(m.get(2, 4), Some(0.0));
        assert!((m.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_uniform_interior_unchanged() {
        let mut m = Mask::new(20, 20).unwrap();
        m.data_mut().fill(1.0);
        let out = box_blur_mask(&m, 2).unwrap();
        assert!((out.get(10, 10).unwrap() - 1.0).abs() < 1e-6);
        // Zero padding at the borders
        assert!(out.get(0, 0).unwrap() < 0.5);
    }

    #[test]
    fn test_radius_larger_than_mask() {
        let out = box_blur_mask(&impulse(3, 2, 0, 0), 10).unwrap();
        let expected = 1.0 / (21.0 * 21.0);
        for &v in out.data() {
            assert!((v - expected).abs() < 1e-7);
        }
    }

    #[test]
    fn test_huge_radius() {
        let radius = 1_000_000;
        let out = box_blur_mask(&impulse(3, 2, 0, 0), radius).unwrap();
        let window = (2 * radius + 1) as f32;
        let expected = 1.0 / (window * window);
        for &v in out.data() {
            assert!(v > 0.0);
            assert!((v - expected).abs() <= expected * 1e-3);
        }
        assert!(box_blur_mask(&impulse(2, 2, 1, 1), u32::MAX).is_ok());
    }
}
