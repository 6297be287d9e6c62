//! The markdown buffer being edited

use std::fs;
use std::path::{Path, PathBuf};

use super::error::FileError;

/// Fixture picked up from the working directory when no file is given
pub const STARTUP_DOCUMENT: &str = "test-doc.md";

/// Buffer contents when there is nothing to load
pub const WELCOME_TEXT: &str = "# Welcome to Writ\n\nStart writing...";

/// Name shown for a buffer without a file
pub const UNTITLED: &str = "untitled";

/// A markdown document, optionally bound to a file
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// File path, `None` until first saved
    pub path: Option<PathBuf>,
    /// Document content
    pub content: String,
    /// Whether the document has unsaved changes
    pub modified: bool,
}

impl Document {
    /// Create an unsaved document
    pub fn untitled(content: impl Into<String>) -> Self {
        Self {
            path: None,
            content: content.into(),
            modified: false,
        }
    }

    /// Open a document from a file
    pub fn open(path: &Path) -> Result<Self, FileError> {
        let content = fs::read_to_string(path).map_err(|e| FileError::read(path, e))?;
        tracing::info!("Opened document: {}", path.display());

        Ok(Self {
            path: Some(path.to_path_buf()),
            content,
            modified: false,
        })
    }

    /// Save to the bound path
    pub fn save(&mut self) -> Result<(), FileError> {
        let path = self.path.clone().ok_or(FileError::NoPath)?;
        fs::write(&path, &self.content).map_err(|e| FileError::write(&path, e))?;
        self.modified = false;
        tracing::info!("Saved document: {}", path.display());
        Ok(())
    }

    /// Save to a new path, creating parent directories, and bind to it
    pub fn save_to(&mut self, path: &Path) -> Result<(), FileError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| FileError::write(parent, e))?;
        }
        fs::write(path, &self.content).map_err(|e| FileError::write(path, e))?;

        self.path = Some(path.to_path_buf());
        self.modified = false;
        tracing::info!("Saved document as: {}", path.display());
        Ok(())
    }

    /// File name, or `untitled`
    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Update content and mark as modified
    pub fn set_content(&mut self, content: String) {
        if self.content != content {
            self.content = content;
            self.modified = true;
        }
    }

    /// Get content without frontmatter for preview
    ///
    /// Frontmatter opens and closes with a line that is exactly `---`.
    pub fn content_without_frontmatter(&self) -> &str {
        let Some(rest) = self
            .content
            .strip_prefix("---\n")
            .or_else(|| self.content.strip_prefix("---\r\n"))
        else {
            return &self.content;
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            offset += line.len();
            if line.trim_end_matches(['\r', '\n']) == "---" {
                return rest[offset..].trim_start();
            }
        }

        &self.content
    }
}

/// Text the editor starts with when no file was requested
pub fn initial_text(dir: &Path) -> String {
    let candidate = dir.join(STARTUP_DOCUMENT);
    match fs::read_to_string(&candidate) {
        Ok(text) => {
            tracing::info!("Loaded startup document: {}", candidate.display());
            text
        }
        Err(_) => WELCOME_TEXT.to_string(),
    }
}
