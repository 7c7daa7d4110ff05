//! GIF image format support
//!
//! Reads the first frame of a GIF. Animated GIFs decode to their first
//! frame, composited onto a transparent canvas the size of the logical
//! screen.

use crate::{IoError, IoResult, check_dimensions};
use gif::{ColorOutput, DecodeOptions};
use snapstyle_core::{Pix, PixMut, color};
use std::io::Read;

/// Read a GIF image
pub fn read_gif<R: Read>(reader: R) -> IoResult<Pix> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::RGBA);

    let mut decoder = options
        .read_info(reader)
        .map_err(|e| IoError::DecodeError(format!("GIF decode error: {}", e)))?;

    let screen_w = decoder.width() as u32;
    let screen_h = decoder.height() as u32;
    check_dimensions(screen_w, screen_h)?;

    let frame = decoder
        .read_next_frame()
        .map_err(|e| IoError::DecodeError(format!("GIF frame error: {}", e)))?
        .ok_or_else(|| IoError::InvalidData("no frames in GIF".to_string()))?;

    let mut pix_mut = PixMut::new_rgba(screen_w, screen_h)?;
    let left = frame.left as u32;
    let top = frame.top as u32;
    let fw = frame.width as usize;

    for (i, px) in frame.buffer.chunks_exact(4).enumerate() {
        let x = left + (i % fw) as u32;
        let y = top + (i / fw) as u32;
        if x >= screen_w || y >= screen_h {
            continue;
        }
        pix_mut.set_pixel_unchecked(x, y, color::compose_rgba(px[0], px[1], px[2], px[3]));
    }

    Ok(pix_mut.into())
}
