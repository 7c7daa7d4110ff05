//! Export results, file naming and trigger serialization

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Suffix appended to the source base name of exported files
pub const EXPORT_SUFFIX: &str = "-snapstyle";

/// Base name used when the source has no file name
pub const DEFAULT_BASE_NAME: &str = "image";

/// A finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Encoded PNG bytes
    pub png: Vec<u8>,
    /// Suggested download file name
    pub filename: String,
    pub width: u32,
    pub height: u32,
    /// The source bitmap could not be decoded and only the background was
    /// rendered
    pub source_skipped: bool,
}

/// Download file name for a source file name.
///
/// Any directory part and the last extension are dropped:
/// `shots/screen.final.jpg` becomes `screen.final-snapstyle.png`.
pub fn export_filename(source_name: Option<&str>) -> String {
    let base = source_name
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or(name))
        .map(|file| match file.rfind('.') {
            Some(dot) if dot > 0 => &file[..dot],
            _ => file,
        })
        .filter(|base| !base.is_empty())
        .unwrap_or(DEFAULT_BASE_NAME);
    format!("{base}{EXPORT_SUFFIX}.png")
}

/// Serializes export triggers
///
/// Clones share the same state, so a host can hand one to every button
/// that starts an export.
#[derive(Debug, Clone, Default)]
pub struct ExportGate {
    busy: Arc<AtomicBool>,
}

/// Held while an export is running; dropping it re-opens the gate
#[derive(Debug)]
pub struct ExportGuard {
    busy: Arc<AtomicBool>,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an export, or return `None` if one is already running.
    pub fn try_begin(&self) -> Option<ExportGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
