//! Error types for snapstyle-color

use thiserror::Error;

/// Errors that can occur during color operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Text is not a 6-digit hex color
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    /// The clipboard rejected a write
    #[error("clipboard error: {0}")]
    Clipboard(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
