//! SnapStyle - Color harmonies and styled image compositing
//!
//! # Overview
//!
//! SnapStyle provides the algorithmic core of two creative tools:
//!
//! - Color conversion between hex, RGB, HSV and HSL
//! - Harmony palettes generated from a single base color
//! - Color picker pointer and text input mapping
//! - Swatch copy to a clipboard
//! - Screenshot compositing onto a styled background with padding,
//!   rounded corners, a drop shadow and pan/zoom, exported as PNG
//!
//! # Example
//!
//! ```
//! use snapstyle::color::generate_all_from_hex;
//! use snapstyle::compose::{CanvasSettings, Compositor, OutputSize};
//!
//! let palettes = generate_all_from_hex("#3B82F6");
//! assert_eq!(palettes[0].hexes().len(), 2);
//!
//! let mut settings = CanvasSettings::default();
//! settings.output = OutputSize::Custom { width: 32, height: 32 };
//! settings.style.padding = 4.0;
//! let pix = Compositor::new(settings).render(None).unwrap();
//! assert_eq!(pix.width(), 32);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use snapstyle_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use snapstyle_color as color;
pub use snapstyle_compose as compose;
pub use snapstyle_filter as filter;
pub use snapstyle_io as io;
