//! Directory listing and path handling for the open/save workflows

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::FileError;

/// Extensions the file browser offers
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "txt", "markdown"];

/// Extension appended to save-as names that have none
pub const DEFAULT_EXTENSION: &str = "md";

/// A directory or document file inside a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Check if a path has a document extension
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            DOCUMENT_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// List the directories and document files directly inside `dir`, sorted by name
pub fn list_directory(dir: &Path) -> Result<Vec<DirEntry>, FileError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(match e.into_io_error() {
                    Some(io) => FileError::read(dir, io),
                    None => FileError::NotFound(dir.to_path_buf()),
                });
            }
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path().to_path_buf();
        let is_dir = path.is_dir();
        if !is_dir && !is_markdown(&path) {
            continue;
        }

        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            path,
            is_dir,
        });
    }

    Ok(entries)
}

/// Turn the name typed into the save-as dialog into a full path
pub fn resolve_save_path(input: &str, current_dir: &Path) -> Option<PathBuf> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut path = PathBuf::from(input);
    if path.extension().is_none() {
        path.set_extension(DEFAULT_EXTENSION);
    }

    if path.is_relative() {
        path = current_dir.join(path);
    }

    Some(path)
}

/// Anchor a path to the working directory
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|e| {
        tracing::warn!("Cannot make {} absolute: {}", path.display(), e);
        path.to_path_buf()
    })
}

/// Directory holding a file, `.` for a bare file name
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_absolute_path() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute_path(Path::new("notes.md")), cwd.join("notes.md"));
        assert!(absolute_path(Path::new("notes.md")).is_absolute());
        assert_eq!(absolute_path(&cwd.join("a.md")), cwd.join("a.md"));
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("notes.md")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("docs/notes.md")), PathBuf::from("docs"));
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("a.md")));
        assert!(is_markdown(Path::new("a.MARKDOWN")));
        assert!(is_markdown(Path::new("notes.txt")));
        assert!(!is_markdown(Path::new("main.rs")));
        assert!(!is_markdown(Path::new("README")));
    }

    #[test]
    fn test_list_directory_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("b.md"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("image.png"), "").unwrap();

        let entries = list_directory(dir.path()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.md", "drafts"]);
        assert!(entries[2].is_dir);
    }

    #[test]
    fn test_list_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_directory(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
    }

    #[test]
    fn test_resolve_save_path() {
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_save_path("notes", cwd),
            Some(PathBuf::from("/work/notes.md"))
        );
        assert_eq!(
            resolve_save_path(" todo.txt ", cwd),
            Some(PathBuf::from("/work/todo.txt"))
        );
        assert_eq!(
            resolve_save_path("/abs/file", cwd),
            Some(PathBuf::from("/abs/file.md"))
        );
        assert_eq!(resolve_save_path("   ", cwd), None);
    }
}
