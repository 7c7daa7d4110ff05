//! Hollow drop shadow
//!
//! The shadow is drawn on its own layer: the caster shape is rasterized
//! at the shadow offset, blurred, and then the un-offset caster is cut out
//! of it. Only the part of the shadow outside the image remains, so
//! semi-transparent source pixels never show a dark shadow through them.

use crate::ComposeResult;
use crate::settings::Style;
use snapstyle_core::{BlendMode, Mask, Pix, PixMut, RoundedRect};
use snapstyle_filter::gaussian_blur_mask;
use tracing::debug;

/// Shadow blur radius to Gaussian sigma
pub fn blur_sigma(shadow_blur: f64) -> f64 {
    shadow_blur / 2.0
}

/// Render the hollow shadow of `caster` as a `width x height` RGBA layer.
pub fn hollow_shadow_layer(
    width: u32,
    height: u32,
    caster: &RoundedRect,
    style: &Style,
) -> ComposeResult<Pix> {
    let offset = RoundedRect {
        rect: caster
            .rect
            .translate(style.shadow_offset_x, style.shadow_offset_y),
        radius: caster.radius,
    };
    let shape = Mask::from_rounded_rect(width, height, &offset)?;
    let mut shadow = gaussian_blur_mask(&shape, blur_sigma(style.shadow_blur))?;

    let cutout = Mask::from_rounded_rect(width, height, caster)?;
    shadow.erase(&cutout)?;

    Ok(shadow.to_layer(0, 0, 0, style.shadow_opacity as f32)?)
}

/// Composite the hollow shadow of `caster` onto `canvas`.
///
/// Skipped entirely when the shadow opacity is zero.
pub fn draw_hollow_shadow(
    canvas: &mut PixMut,
    caster: &RoundedRect,
    style: &Style,
) -> ComposeResult<()> {
    if style.shadow_opacity <= 0.0 {
        return Ok(());
    }
    debug!(
        blur = style.shadow_blur,
        opacity = style.shadow_opacity,
        "drawing hollow shadow"
    );
    let layer = hollow_shadow_layer(canvas.width(), canvas.height(), caster, style)?;
    canvas.composite(&layer, 0, 0, BlendMode::SourceOver, 1.0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapstyle_core::{RectF, color};

    fn caster() -> RoundedRect {
        RoundedRect::new(RectF::new_unchecked(20.0, 20.0, 40.0, 40.0), 6.0)
    }

    #[test]
    fn test_shadow_is_hollow() {
        let layer = hollow_shadow_layer(80, 80, &caster(), &Style::default()).unwrap();
        assert_eq!(color::alpha(layer.get_pixel(40, 40).unwrap()), 0);
        assert_eq!(color::alpha(layer.get_pixel(30, 30).unwrap()), 0);
    }

    #[test]
    fn test_shadow_falls_below_caster() {
        let layer = hollow_shadow_layer(80, 80, &caster(), &Style::default()).unwrap();
        let below = color::alpha(layer.get_pixel(40, 62).unwrap());
        let above = color::alpha(layer.get_pixel(40, 17).unwrap());
        assert!(below > 0);
        assert!(below > above);
        let (r, g, b, _) = color::extract_rgba(layer.get_pixel(40, 62).unwrap());
        assert_eq!((r, g, b), (0, 0, 0));
    }

    #[test]
    fn test_opacity_bounds_alpha() {
        let style = Style {
            shadow_opacity: 0.2,
            ..Style::default()
        };
        let layer = hollow_shadow_layer(80, 80, &caster(), &style).unwrap();
        let max = layer.data().iter().map(|&p| color::alpha(p)).max().unwrap();
        assert!(max > 0);
        assert!(max <= 51);
    }

    #[test]
    fn test_zero_opacity_leaves_canvas() {
        let fill = color::compose_rgba(255, 255, 255, 255);
        let mut canvas = PixMut::new_filled(80, 80, 4, fill).unwrap();
        let style = Style {
            shadow_opacity: 0.0,
            ..Style::default()
        };
        draw_hollow_shadow(&mut canvas, &caster(), &style).unwrap();
        assert!(canvas.data().iter().all(|&p| p == fill));
    }

    #[test]
    fn test_shadow_darkens_canvas() {
        let fill = color::compose_rgba(255, 255, 255, 255);
        let mut canvas = PixMut::new_filled(80, 80, 4, fill).unwrap();
        draw_hollow_shadow(&mut canvas, &caster(), &Style::default()).unwrap();
        let (r, _, _, a) = color::extract_rgba(canvas.get_pixel(40, 62).unwrap());
        assert!(r < 255);
        assert_eq!(a, 255);
        assert_eq!(canvas.get_pixel(40, 40), Some(fill));
    }
}
