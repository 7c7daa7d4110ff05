//! snapstyle-io - Image I/O for SnapStyle
//!
//! Decodes source bitmaps supplied by the host as in-memory bytes and
//! encodes finished canvases to PNG.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | yes  | yes   | `png-format` |
//! | JPEG   | yes  | no    | `jpeg` |
//! | WebP   | yes  | no    | `webp-format` |
//! | GIF    | yes  | no    | `gif-format` |
//! | BMP    | yes  | no    | `bmp` |
//!
//! Every decoded image is 8 bits per channel RGB (spp = 3) or RGBA
//! (spp = 4).

mod error;
pub mod format;

#[cfg(feature = "bmp")]
pub mod bmp;
#[cfg(feature = "gif-format")]
pub mod gif;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "webp-format")]
pub mod webp;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format_from_bytes};
#[cfg(feature = "png-format")]
pub use png::{encode_png, write_png};

use snapstyle_core::Pix;
use std::io::Cursor;
use std::path::Path;

/// Largest pixel count a decoder will allocate for (256 megapixels)
pub const MAX_IMAGE_PIXELS: u64 = 1 << 28;

/// Reject header dimensions that are empty or above [`MAX_IMAGE_PIXELS`].
pub(crate) fn check_dimensions(width: u32, height: u32) -> IoResult<()> {
    let pixels = width as u64 * height as u64;
    if pixels == 0 || pixels > MAX_IMAGE_PIXELS {
        return Err(IoError::InvalidData(format!(
            "image dimensions {width}x{height} are out of range"
        )));
    }
    Ok(())
}

/// Decode an image from memory, detecting the format from its header.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unrecognized data or formats
/// whose feature is disabled, and a decode error for corrupt data.
pub fn decode_image(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    let pix = decode_image_format(data, format)?;
    tracing::debug!(
        ?format,
        width = pix.width(),
        height = pix.height(),
        "decoded source image"
    );
    Ok(pix)
}

/// Decode an image from memory in a known format.
pub fn decode_image_format(data: &[u8], format: ImageFormat) -> IoResult<Pix> {
    let cursor = Cursor::new(data);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(cursor),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(cursor),
        #[cfg(feature = "webp-format")]
        ImageFormat::WebP => webp::read_webp(cursor),
        #[cfg(feature = "gif-format")]
        ImageFormat::Gif => gif::read_gif(cursor),
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(cursor),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

/// Read and decode an image file.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let data = std::fs::read(path)?;
    decode_image(&data)
}

/// Encode an image as PNG and write it to a file.
#[cfg(feature = "png-format")]
pub fn write_image_png<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let file = std::fs::File::create(path)?;
    write_png(pix, std::io::BufWriter::new(file))
}
