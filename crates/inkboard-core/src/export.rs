//! Client-side file export.
//!
//! The controller never touches the filesystem or the network itself; it
//! hands encoded bytes to an [`ExportSink`] supplied by the host.

use inkboard_render::RenderError;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// MIME type of exported boards.
pub const PNG_MIME: &str = "image/png";

/// File extension of exported boards.
pub const PNG_EXTENSION: &str = "png";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The host cannot save files (no download or filesystem capability).
    #[error("export_unavailable: {0}")]
    Unavailable(String),
    #[error("Export encoding failed: {0}")]
    Encode(#[from] RenderError),
}

impl ExportError {
    /// Stable code for the UI layer.
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::Unavailable(_) => "export_unavailable",
            ExportError::Encode(_) => "export_encode_failed",
        }
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// A host capability that saves a file on the user's side.
pub trait ExportSink {
    /// Save `bytes` under `file_name`.
    fn save_file(&self, file_name: &str, mime_type: &str, bytes: &[u8]) -> ExportResult<()>;
}

/// A sink for hosts without any save capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSink;

impl ExportSink for UnavailableSink {
    fn save_file(&self, file_name: &str, _mime_type: &str, _bytes: &[u8]) -> ExportResult<()> {
        Err(ExportError::Unavailable(format!(
            "no download capability to save {file_name}"
        )))
    }
}

/// A file handed to a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// In-memory sink for testing and embedding. Clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Rc<RefCell<Vec<ExportedFile>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything saved so far, oldest first.
    pub fn files(&self) -> Vec<ExportedFile> {
        self.files.borrow().clone()
    }

    /// The most recently saved file.
    pub fn last(&self) -> Option<ExportedFile> {
        self.files.borrow().last().cloned()
    }
}

impl ExportSink for MemorySink {
    fn save_file(&self, file_name: &str, mime_type: &str, bytes: &[u8]) -> ExportResult<()> {
        self.files.borrow_mut().push(ExportedFile {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

/// Sink that writes into a directory (native only).
///
/// Names containing path separators or `..` are rejected, so nothing is
/// written outside the directory.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectorySink {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ExportSink for DirectorySink {
    fn save_file(&self, file_name: &str, _mime_type: &str, bytes: &[u8]) -> ExportResult<()> {
        // Titles are free text; only plain names may land in the directory
        if std::path::Path::new(file_name).file_name() != Some(std::ffi::OsStr::new(file_name)) {
            log::warn!("Refusing to export to {:?}", file_name);
            return Err(ExportError::Unavailable(format!(
                "{file_name} is not a plain file name"
            )));
        }
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)
            .map_err(|e| ExportError::Unavailable(format!("{}: {}", path.display(), e)))?;
        log::info!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}

/// Turn a board title into a file stem: lowercase, with every run of
/// whitespace collapsed into one hyphen.
pub fn file_stem(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_space = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('-');
            }
            in_space = true;
        } else {
            stem.extend(c.to_lowercase());
            in_space = false;
        }
    }
    stem
}

/// Full export file name for a title.
pub fn export_file_name(title: &str) -> String {
    format!("{}.{}", file_stem(title), PNG_EXTENSION)
}
