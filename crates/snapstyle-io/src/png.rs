//! PNG image format support
//!
//! Reading normalizes every PNG variant (palette, gray, 16-bit) to 8-bit
//! color. Images carrying transparency decode to RGBA, the rest to RGB.

use crate::{IoError, IoResult, check_dimensions};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use snapstyle_core::{Pix, color};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;
    check_dimensions(reader.info().width, reader.info().height)?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let (samples, spp) = match output_info.color_type {
        ColorType::Grayscale => (1, 3),
        ColorType::GrayscaleAlpha => (2, 4),
        ColorType::Rgb => (3, 3),
        ColorType::Rgba => (4, 4),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output format: {:?}",
                other
            )));
        }
    };

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..];
        for x in 0..width as usize {
            let px = &row[x * samples..x * samples + samples];
            let pixel = match samples {
                1 => color::compose_rgb(px[0], px[0], px[0]),
                2 => color::compose_rgba(px[0], px[0], px[0], px[1]),
                3 => color::compose_rgb(px[0], px[1], px[2]),
                _ => color::compose_rgba(px[0], px[1], px[2], px[3]),
            };
            pixels.push(pixel);
        }
    }

    Ok(Pix::from_data(width, height, spp, pixels)?)
}

/// Write a PNG image
///
/// RGBA images (spp = 4) are written with an alpha channel, RGB images
/// without one. Output is 8 bits per channel.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let color_type = if pix.has_alpha() {
        ColorType::Rgba
    } else {
        ColorType::Rgb
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let channels = if pix.has_alpha() { 4 } else { 3 };
    let mut data = Vec::with_capacity(width as usize * height as usize * channels);
    for &pixel in pix.data() {
        let (r, g, b, a) = color::extract_rgba(pixel);
        data.extend_from_slice(&[r, g, b]);
        if channels == 4 {
            data.push(a);
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

/// Encode an image to an in-memory PNG byte buffer
pub fn encode_png(pix: &Pix) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_png(pix, &mut buffer)?;
    Ok(buffer)
}
