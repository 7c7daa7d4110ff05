//! Source image placement on the canvas
//!
//! The source is contain-fitted into the padded content area and centered,
//! then the user's zoom is applied about the fitted rectangle's own center
//! and the pan offset, rescaled from preview to output pixels, moves it.

use crate::settings::{Position, PreviewViewport};
use crate::{ComposeError, ComposeResult};
use snapstyle_core::RectF;

/// Result of laying out a source image on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Canvas minus padding on every side
    pub content: RectF,
    /// Contain-fit of the source into `content`, before pan and zoom
    pub fitted: RectF,
    /// Final destination rectangle of the source image
    pub placed: RectF,
}

/// The padded content area of a `canvas_w x canvas_h` canvas.
///
/// May be empty when the padding is too large.
pub fn content_area(canvas_w: u32, canvas_h: u32, padding: f64) -> RectF {
    RectF::new_unchecked(0.0, 0.0, canvas_w as f64, canvas_h as f64).inset(padding)
}

/// Factor converting preview pan offsets to export pixels.
pub fn pan_scale(export_width: u32, viewport: &PreviewViewport) -> f64 {
    viewport.pan_scale(export_width)
}

/// Lay out a `src_w x src_h` source on the canvas.
///
/// # Errors
///
/// Returns [`ComposeError::EmptyContentArea`] when the padding leaves no
/// room for the source, and [`ComposeError::InvalidSetting`] when the
/// source itself has no pixels.
pub fn placement(
    canvas_w: u32,
    canvas_h: u32,
    padding: f64,
    src_w: u32,
    src_h: u32,
    position: &Position,
    pan_scale: f64,
) -> ComposeResult<Placement> {
    let content = content_area(canvas_w, canvas_h, padding);
    if content.is_empty() {
        return Err(ComposeError::EmptyContentArea {
            width: canvas_w,
            height: canvas_h,
            padding,
        });
    }
    let fitted = content.contain(src_w as f64, src_h as f64).ok_or_else(|| {
        ComposeError::InvalidSetting(format!("source image is empty: {src_w}x{src_h}"))
    })?;
    let placed = fitted
        .scale_about_center(position.scale)
        .translate(position.x * pan_scale, position.y * pan_scale);
    Ok(Placement {
        content,
        fitted,
        placed,
    })
}
