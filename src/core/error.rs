//! Errors for document and directory operations

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure while touching the filesystem on behalf of the editor
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("document has no file path")]
    NoPath,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// Classify a read failure
    pub fn read(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Read {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Classify a write failure
    pub fn write(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Write {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}
