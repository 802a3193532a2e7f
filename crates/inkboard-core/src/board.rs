//! Board metadata and user-facing notices.

use crate::export;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Metadata of the board being drawn.
///
/// The title is cosmetic; it only names exported files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Unique per session, used in log lines.
    pub id: Uuid,
    pub title: String,
}

impl Board {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
        }
    }

    /// Stem of the exported file name.
    pub fn file_stem(&self) -> String {
        export::file_stem(&self.title)
    }

    /// Exported file name, e.g. `untitled-whiteboard.png`.
    pub fn export_file_name(&self) -> String {
        export::export_file_name(&self.title)
    }
}

/// Success message for the UI to show as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Cleared,
    Saved,
    Downloaded { file_name: String },
    ShareLinkCopied,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Cleared => "Whiteboard cleared",
            Notice::Saved => "Whiteboard saved",
            Notice::Downloaded { .. } => "Whiteboard downloaded",
            Notice::ShareLinkCopied => "Share link copied to clipboard",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
