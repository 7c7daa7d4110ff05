//! BMP image format support
//!
//! Reads uncompressed Windows Bitmap (BMP) files at 8 (palette), 24 and
//! 32 bits per pixel. Palette images are expanded to RGB. 32-bit images
//! carry alpha only when a BITFIELDS header declares an alpha mask;
//! otherwise the fourth byte is padding and the image is opaque.

use crate::{IoError, IoResult, check_dimensions};
use snapstyle_core::{Pix, PixMut, color};
use std::io::{self, Read};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

fn le_u32(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

fn le_i32(b: &[u8]) -> i32 {
    i32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

fn le_u16(b: &[u8]) -> u16 {
    u16::from_le_bytes([b[0], b[1]])
}

/// BI_RGB compression
const BI_RGB: u32 = 0;

/// BI_BITFIELDS compression
const BI_BITFIELDS: u32 = 3;

/// Offset of the alpha mask within a V3+ info header
const ALPHA_MASK_OFFSET: usize = 52;

/// Discard `n` bytes without buffering them.
fn skip<R: Read>(reader: &mut R, n: u64) -> IoResult<()> {
    let skipped = io::copy(&mut reader.by_ref().take(n), &mut io::sink())?;
    if skipped < n {
        return Err(IoError::InvalidData("BMP data is truncated".to_string()));
    }
    Ok(())
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }
    let pixel_offset = le_u32(&file_header[10..14]) as u64;

    // Read info header (minimum 40 bytes)
    let mut info_header = [0u8; 40];
    reader.read_exact(&mut info_header)?;

    let header_size = le_u32(&info_header[0..4]);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_i32(&info_header[4..8]);
    let height = le_i32(&info_header[8..12]);
    let planes = le_u16(&info_header[12..14]);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }
    let bits_per_pixel = le_u16(&info_header[14..16]);
    let compression = le_u32(&info_header[16..20]);
    let colors_used = le_u32(&info_header[32..36]) as usize;

    // BI_RGB and BI_BITFIELDS with the default masks only
    if compression != BI_RGB && compression != BI_BITFIELDS {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }
    if !matches!(bits_per_pixel, 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    let top_down = height < 0;
    let width = width.unsigned_abs();
    let height = height.unsigned_abs();
    check_dimensions(width, height)?;

    // V3+ headers carry the channel masks inline; keep the alpha mask
    let extra = (header_size - BMP_INFO_HEADER_SIZE) as u64;
    let mut alpha_mask = 0;
    if extra > 0 {
        let mut ext = [0u8; 16];
        let kept = extra.min(ext.len() as u64) as usize;
        reader.read_exact(&mut ext[..kept])?;
        skip(&mut reader, extra - kept as u64)?;
        let at = ALPHA_MASK_OFFSET - BMP_INFO_HEADER_SIZE as usize;
        if kept >= at + 4 {
            alpha_mask = le_u32(&ext[at..at + 4]);
        }
    }
    let has_alpha = bits_per_pixel == 32 && compression == BI_BITFIELDS && alpha_mask != 0;

    let palette = if bits_per_pixel == 8 {
        let num_colors = if colors_used == 0 || colors_used > 256 {
            256
        } else {
            colors_used
        };
        let mut raw = vec![0u8; num_colors * 4];
        reader.read_exact(&mut raw)?;
        raw.chunks_exact(4)
            .map(|c| color::compose_rgb(c[2], c[1], c[0]))
            .collect()
    } else {
        Vec::new()
    };

    // Skip to pixel data
    let current_pos = BMP_FILE_HEADER_SIZE as u64 + header_size as u64 + palette.len() as u64 * 4;
    if pixel_offset > current_pos {
        skip(&mut reader, pixel_offset - current_pos)?;
    }

    let spp = if has_alpha { 4 } else { 3 };
    let mut pix_mut = PixMut::new_filled(width, height, spp, 0)?;

    // BMP rows are 4-byte aligned
    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let mut row_buffer = vec![0u8; row_stride];

    for row in 0..height {
        reader.read_exact(&mut row_buffer)?;
        let y = if top_down { row } else { height - 1 - row };
        let dst = pix_mut.row_data_mut(y);

        match bits_per_pixel {
            8 => {
                for (d, &index) in dst.iter_mut().zip(&row_buffer) {
                    *d = palette
                        .get(index as usize)
                        .copied()
                        .unwrap_or(color::compose_rgb(0, 0, 0));
                }
            }
            24 => {
                for (d, c) in dst.iter_mut().zip(row_buffer.chunks_exact(3)) {
                    *d = color::compose_rgb(c[2], c[1], c[0]);
                }
            }
            _ => {
                for (d, c) in dst.iter_mut().zip(row_buffer.chunks_exact(4)) {
                    let a = if has_alpha { c[3] } else { 255 };
                    *d = color::compose_rgba(c[2], c[1], c[0], a);
                }
            }
        }
    }

    Ok(pix_mut.into())
}
