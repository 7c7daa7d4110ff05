//! JPEG image format support
//!
//! Reads baseline and progressive JPEG images using the `jpeg-decoder`
//! crate. Grayscale, RGB and CMYK sources all decode to opaque RGB.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use snapstyle_core::{Pix, color};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
///
/// # Returns
/// An RGB `Pix` (spp = 3).
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let npixels = width as usize * height as usize;

    let pixels: Vec<u32> = match info.pixel_format {
        PixelFormat::L8 => data
            .iter()
            .take(npixels)
            .map(|&v| color::compose_rgb(v, v, v))
            .collect(),
        PixelFormat::L16 => data
            .chunks_exact(2)
            .take(npixels)
            .map(|c| color::compose_rgb(c[0], c[0], c[0]))
            .collect(),
        PixelFormat::RGB24 => data
            .chunks_exact(3)
            .take(npixels)
            .map(|c| color::compose_rgb(c[0], c[1], c[2]))
            .collect(),
        PixelFormat::CMYK32 => data
            .chunks_exact(4)
            .take(npixels)
            .map(|c| {
                // Adobe CMYK JPEGs store inverted values
                let k = c[3] as u32;
                let ch = |v: u8| ((v as u32 * k + 127) / 255) as u8;
                color::compose_rgb(ch(c[0]), ch(c[1]), ch(c[2]))
            })
            .collect(),
    };

    if pixels.len() != npixels {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} of {} pixels",
            pixels.len(),
            npixels
        )));
    }

    Ok(Pix::from_data(width, height, 3, pixels)?)
}
