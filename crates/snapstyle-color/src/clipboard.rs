//! Swatch copy to a clipboard
//!
//! Copying a swatch writes its uppercase `#RRGGBB` label. A failed write
//! produces a user-facing notice and leaves every color and palette
//! untouched.

use crate::colorspace::Rgb;
use crate::ColorResult;
#[cfg(feature = "system-clipboard")]
use crate::ColorError;

/// Destination for copied text
pub trait ClipboardSink {
    /// Replace the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> ColorResult<()>;
}

/// Result of a swatch copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The text that was copied
    Copied(String),
    /// Notice to show the user
    Failed(String),
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied(_))
    }
}

/// Copy a swatch's `#RRGGBB` label to `sink`.
pub fn copy_swatch<S: ClipboardSink + ?Sized>(sink: &mut S, color: Rgb) -> CopyOutcome {
    let text = color.to_hex_upper();
    match sink.set_text(&text) {
        Ok(()) => {
            tracing::debug!(color = %text, "copied swatch");
            CopyOutcome::Copied(text)
        }
        Err(e) => {
            tracing::warn!(color = %text, error = %e, "failed to copy swatch");
            CopyOutcome::Failed(format!("Could not copy {} to the clipboard", text))
        }
    }
}

/// In-memory clipboard, for hosts without a system clipboard
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> ColorResult<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// The operating system clipboard
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    /// Connect to the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Clipboard`] if no clipboard is available (for
    /// example on a headless machine).
    pub fn new() -> ColorResult<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| ColorError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "system-clipboard")]
impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> ColorResult<()> {
        self.inner
            .set_text(text)
            .map_err(|e| ColorError::Clipboard(e.to_string()))
    }
}
