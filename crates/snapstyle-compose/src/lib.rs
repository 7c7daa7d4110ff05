//! SnapStyle Compose - Canvas compositing and PNG export
//!
//! Places a source image onto a styled background and rasterizes the
//! result at a fixed output size:
//!
//! - **Settings** ([`settings`]): background, frame style, output size and
//!   pan/zoom, loadable from JSON
//! - **Layout** ([`layout`]): contain-fit placement with pan and zoom
//! - **Grain** ([`grain`]): seeded noise overlay
//! - **Shadow** ([`shadow`]): blurred hollow drop shadow
//! - **Render** ([`render`]): the full pipeline and export
//!
//! # Example
//!
//! ```
//! use snapstyle_compose::{CanvasSettings, Compositor, OutputSize};
//!
//! let mut settings = CanvasSettings::default();
//! settings.output = OutputSize::Custom { width: 64, height: 48 };
//! settings.style.padding = 8.0;
//!
//! let export = Compositor::new(settings).export(None).unwrap();
//! assert_eq!((export.width, export.height), (64, 48));
//! assert_eq!(export.filename, "image-snapstyle.png");
//! ```

mod error;
pub mod export;
pub mod grain;
pub mod layout;
pub mod render;
pub mod settings;
pub mod shadow;

pub use error::{ComposeError, ComposeResult};

pub use export::{Export, ExportGate, ExportGuard, export_filename};
pub use layout::{Placement, content_area, pan_scale, placement};
pub use render::{Compositor, SourceFile};
pub use settings::{
    Background, BackgroundKind, CanvasSettings, MAX_OUTPUT_DIMENSION, OutputSize, Position, Preset,
    PreviewViewport, Style,
};
