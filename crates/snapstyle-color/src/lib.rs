//! SnapStyle Color - Color conversion, harmonies and picker input
//!
//! This crate provides the color side of SnapStyle:
//!
//! - **Color space conversion** ([`colorspace`]): hex <-> RGB <-> HSV / HSL,
//!   contrast text color
//! - **Palettes** ([`palette`]): nine named harmonies from one base color
//! - **Picker** ([`picker`]): pointer and hex-field input mapped to HSV
//! - **Clipboard** ([`clipboard`]): swatch copy with failure notices
//!
//! # Example
//!
//! ```
//! use snapstyle_color::{hex_to_hsv, generate_all_from_hex};
//!
//! let hsv = hex_to_hsv("#3B82F6");
//! assert!((hsv.h - 217.0).abs() < 1.0);
//!
//! let palettes = generate_all_from_hex("#3B82F6");
//! assert_eq!(palettes.len(), 9);
//! ```

pub mod clipboard;
pub mod colorspace;
pub mod error;
pub mod palette;
pub mod picker;

pub use error::{ColorError, ColorResult};

pub use colorspace::{
    // Types
    Hsl,
    Hsv,
    Rgb,
    // Constants
    CONTRAST_DARK,
    CONTRAST_LIGHT,
    FALLBACK_HSV,
    // Conversions
    contrast_color,
    contrast_for,
    fallback_rgb,
    hex_to_hsl,
    hex_to_hsv,
    hex_to_rgb,
    hsl_to_hex,
    hsl_to_rgb,
    hsv_to_hex,
    hsv_to_rgb,
    rgb_to_hex,
    rgb_to_hsl,
    rgb_to_hsv,
    wrap_hue,
};
pub use palette::{
    Harmony, Palette, generate, generate_all, generate_all_from_hex, generate_all_from_rgb,
};
pub use picker::{ColorPicker, ControlBounds, DragState, PickerChange, PickerControl, Point};

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{ClipboardSink, CopyOutcome, MemoryClipboard, copy_swatch};
