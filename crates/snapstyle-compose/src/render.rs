//! The compositing pipeline
//!
//! Rendering runs in a fixed order on an RGBA canvas of the output size:
//!
//! 1. Background fill (solid or rotated linear gradient)
//! 2. Grain overlay
//! 3. Source placement (contain-fit, zoom, pan)
//! 4. Hollow shadow
//! 5. Source draw, clipped to the rounded rectangle
//!
//! [`Compositor::export`] additionally decodes the source bytes and
//! encodes the result to PNG.

use crate::ComposeResult;
use crate::export::{Export, export_filename};
use crate::grain::apply_grain;
use crate::layout::{Placement, placement};
use crate::settings::{BackgroundKind, CanvasSettings, PreviewViewport};
use crate::shadow::draw_hollow_shadow;
use snapstyle_core::{LinearGradient, Pix, PixMut, RoundedRect};
use tracing::{debug, info, warn};

/// Source image bytes as supplied by the host
#[derive(Debug, Clone, Copy)]
pub struct SourceFile<'a> {
    /// Encoded image (PNG, JPEG, WebP, GIF or BMP)
    pub bytes: &'a [u8],
    /// Original file name, used to name the export
    pub name: Option<&'a str>,
}

impl<'a> SourceFile<'a> {
    pub fn new(bytes: &'a [u8], name: Option<&'a str>) -> Self {
        Self { bytes, name }
    }
}

/// Renders canvas settings and a source image into a styled picture
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    settings: CanvasSettings,
    viewport: PreviewViewport,
}

impl Compositor {
    pub fn new(settings: CanvasSettings) -> Self {
        Self {
            settings,
            viewport: PreviewViewport::default(),
        }
    }

    /// Use the host's measured preview for pan rescaling.
    pub fn with_viewport(mut self, viewport: PreviewViewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn viewport(&self) -> &PreviewViewport {
        &self.viewport
    }

    /// Validated output size.
    ///
    /// # Errors
    ///
    /// [`ComposeError::InvalidOutputSize`](crate::ComposeError::InvalidOutputSize)
    /// for non-positive or oversized dimensions, then
    /// [`ComposeError::InvalidSetting`](crate::ComposeError::InvalidSetting)
    /// for out-of-range style parameters.
    pub fn output_size(&self) -> ComposeResult<(u32, u32)> {
        let dims = self.settings.output_dimensions()?;
        self.settings.validate()?;
        Ok(dims)
    }

    /// Where a `src_w x src_h` source lands on the output canvas.
    pub fn layout(&self, src_w: u32, src_h: u32) -> ComposeResult<Placement> {
        let (w, h) = self.output_size()?;
        placement(
            w,
            h,
            self.settings.style.padding,
            src_w,
            src_h,
            &self.settings.position,
            self.viewport.pan_scale(w),
        )
    }

    /// Render the background with grain, without any source image.
    pub fn render_background(&self) -> ComposeResult<PixMut> {
        let (w, h) = self.output_size()?;
        let bg = &self.settings.background;
        let mut canvas = match bg.kind {
            BackgroundKind::Solid => PixMut::new_filled(w, h, 4, bg.color1.to_pixel())?,
            BackgroundKind::Gradient => {
                let mut canvas = PixMut::new_rgba(w, h)?;
                let gradient = LinearGradient::rotated(
                    w,
                    h,
                    bg.angle,
                    bg.color1.to_pixel(),
                    bg.color2.to_pixel(),
                );
                canvas.fill_linear_gradient(&gradient);
                canvas
            }
        };
        apply_grain(&mut canvas, bg.grain)?;
        Ok(canvas)
    }

    /// Render the full composition for a decoded source image.
    ///
    /// With no source only the background is rendered.
    pub fn render(&self, source: Option<&Pix>) -> ComposeResult<Pix> {
        let placed = source
            .map(|src| self.layout(src.width(), src.height()))
            .transpose()?;
        let mut canvas = self.render_background()?;

        if let (Some(src), Some(layout)) = (source, placed) {
            let style = &self.settings.style;
            let shape = RoundedRect::new(layout.placed, style.corner_radius);
            debug!(
                x = layout.placed.x,
                y = layout.placed.y,
                w = layout.placed.w,
                h = layout.placed.h,
                "placing source image"
            );
            draw_hollow_shadow(&mut canvas, &shape, style)?;
            canvas.draw_image_clipped(src, layout.placed, &shape)?;
        }
        Ok(canvas.into())
    }

    /// Decode, render and encode the composition.
    ///
    /// A source that fails to decode is skipped with a warning and the
    /// background alone is exported; see [`Export::source_skipped`].
    pub fn export(&self, source: Option<SourceFile<'_>>) -> ComposeResult<Export> {
        let (width, height) = self.output_size()?;
        info!(width, height, "export started");

        let mut source_skipped = false;
        let decoded = match source {
            Some(file) => match snapstyle_io::decode_image(file.bytes) {
                Ok(pix) => Some(pix),
                Err(e) => {
                    warn!(
                        name = file.name.unwrap_or_default(),
                        error = %e,
                        "source image could not be decoded, exporting background only"
                    );
                    source_skipped = true;
                    None
                }
            },
            None => None,
        };

        let pix = self.render(decoded.as_ref())?;
        let png = snapstyle_io::encode_png(&pix)?;
        let filename = export_filename(source.and_then(|f| f.name));
        info!(filename = %filename, bytes = png.len(), "export finished");

        Ok(Export {
            png,
            filename,
            width,
            height,
            source_skipped,
        })
    }
}
