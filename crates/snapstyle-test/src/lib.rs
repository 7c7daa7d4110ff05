//! snapstyle-test - Regression test framework for SnapStyle
//!
//! This crate provides a small regression harness used by the integration
//! tests of every crate in the workspace, supporting two modes:
//!
//! - **Compare**: check values, images and byte strings (default)
//! - **Display**: additionally write rendered images to `tests/regout`
//!   for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use snapstyle_test::RegParams;
//!
//! let mut rp = RegParams::new("palette");
//! rp.compare_values(5.0, palette.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use snapstyle_core::{Pix, PixMut, color};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // snapstyle-test is at crates/snapstyle-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Create a uniform opaque RGB image.
pub fn make_solid_rgb(r: u8, g: u8, b: u8, w: u32, h: u32) -> Pix {
    PixMut::new_filled(w, h, 3, color::compose_rgb(r, g, b))
        .expect("valid test image size")
        .into()
}

/// Create a two-color checkerboard with square cells of `cell` pixels.
pub fn make_checker(w: u32, h: u32, cell: u32, a: u32, b: u32) -> Pix {
    let mut pm = PixMut::new_filled(w, h, 4, a).expect("valid test image size");
    let cell = cell.max(1);
    for y in 0..h {
        for x in 0..w {
            if ((x / cell) + (y / cell)) % 2 == 1 {
                pm.set_pixel_unchecked(x, y, b);
            }
        }
    }
    pm.into()
}

/// Create a horizontal gray ramp from black (left) to white (right).
pub fn make_gradient(w: u32, h: u32) -> Pix {
    let mut pm = PixMut::new_filled(w, h, 3, 0).expect("valid test image size");
    let denom = (w.max(2) - 1) as f32;
    for y in 0..h {
        for x in 0..w {
            let v = color::to_byte(x as f32 * 255.0 / denom);
            pm.set_pixel_unchecked(x, y, color::compose_rgb(v, v, v));
        }
    }
    pm.into()
}

/// Encode an image as PNG bytes, for tests that feed the decoders.
pub fn encode_png(pix: &Pix) -> Vec<u8> {
    snapstyle_io::encode_png(pix).expect("PNG encoding of test image")
}
