//! Film grain texture
//!
//! A small opaque gray-noise tile is generated from a fixed seed and
//! repeated across the canvas with the overlay blend mode, so mid-gray
//! noise leaves the background unchanged on average while lightening and
//! darkening it locally.

use crate::ComposeResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snapstyle_core::{BlendMode, Pix, PixMut, color};

/// Edge length of the repeated noise tile, in pixels
pub const GRAIN_TILE_SIZE: u32 = 128;

/// Seed of the noise generator; fixed so exports are reproducible
pub const GRAIN_SEED: u64 = 0x5eed_9a1e;

/// Grain intensity is scaled by this factor to get the overlay opacity
pub const GRAIN_OPACITY_FACTOR: f64 = 0.5;

/// Generate an opaque `size x size` gray noise tile.
pub fn noise_tile(size: u32, seed: u64) -> ComposeResult<Pix> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tile = PixMut::new_filled(size, size, 4, 0)?;
    for p in tile.data_mut() {
        let v = (rng.next_u32() >> 24) as u8;
        *p = color::compose_rgba(v, v, v, 255);
    }
    Ok(tile.into())
}

/// Overlay grain onto `canvas` at `intensity` in `[0, 1]`.
///
/// Does nothing when the intensity is zero.
pub fn apply_grain(canvas: &mut PixMut, intensity: f64) -> ComposeResult<()> {
    if intensity <= 0.0 {
        return Ok(());
    }
    let tile = noise_tile(GRAIN_TILE_SIZE, GRAIN_SEED)?;
    let opacity = (intensity * GRAIN_OPACITY_FACTOR) as f32;
    canvas.composite_tiled(&tile, BlendMode::Overlay, opacity)?;
    Ok(())
}
