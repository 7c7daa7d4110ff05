//! Error types for snapstyle-compose

use thiserror::Error;

/// Errors that can occur while composing or exporting a canvas
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] snapstyle_core::Error),

    /// Filter error
    #[error("filter error: {0}")]
    Filter(#[from] snapstyle_filter::FilterError),

    /// Image I/O error
    #[error("io error: {0}")]
    Io(#[from] snapstyle_io::IoError),

    /// Settings could not be parsed or serialized
    #[error("settings json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output width or height is not positive or exceeds the size limit
    #[error("invalid output size: {width}x{height}")]
    InvalidOutputSize { width: i32, height: i32 },

    /// Padding leaves no room for the source image
    #[error("padding {padding} leaves no content area on a {width}x{height} canvas")]
    EmptyContentArea {
        width: u32,
        height: u32,
        padding: f64,
    },

    /// A background or style parameter is out of range
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

/// Result type for compose operations
pub type ComposeResult<T> = Result<T, ComposeError>;
