//! State behind the file browser dialog

use std::path::{Path, PathBuf};

use super::file_system::{list_directory, DirEntry};

/// One row of the browser list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEntry {
    /// `..`
    Parent,
    Directory(DirEntry),
    File(DirEntry),
    /// Directory could not be listed
    Error(String),
}

impl BrowserEntry {
    /// Text shown in the list
    pub fn label(&self) -> String {
        match self {
            BrowserEntry::Parent => "..".to_string(),
            BrowserEntry::Directory(entry) => format!("\u{1F4C1} {}", entry.name),
            BrowserEntry::File(entry) => format!("\u{1F4C4} {}", entry.name),
            BrowserEntry::Error(message) => message.clone(),
        }
    }
}

/// Navigable directory listing that yields a chosen file
#[derive(Debug, Clone)]
pub struct FileBrowser {
    pub title: String,
    pub current_dir: PathBuf,
    pub entries: Vec<BrowserEntry>,
    pub highlighted: Option<usize>,
}

impl FileBrowser {
    /// Create a browser rooted at `dir`
    pub fn new(title: impl Into<String>, dir: &Path) -> Self {
        let mut browser = Self {
            title: title.into(),
            current_dir: dir.to_path_buf(),
            entries: Vec::new(),
            highlighted: None,
        };
        browser.refresh();
        browser
    }

    /// Re-read the current directory
    pub fn refresh(&mut self) {
        self.entries.clear();
        self.highlighted = None;

        if self.current_dir.parent().is_some() {
            self.entries.push(BrowserEntry::Parent);
        }

        match list_directory(&self.current_dir) {
            Ok(listing) => {
                self.entries.extend(listing.into_iter().map(|entry| {
                    if entry.is_dir {
                        BrowserEntry::Directory(entry)
                    } else {
                        BrowserEntry::File(entry)
                    }
                }));
            }
            Err(e) => {
                tracing::warn!("Cannot list {}: {}", self.current_dir.display(), e);
                self.entries
                    .push(BrowserEntry::Error("Permission denied".to_string()));
            }
        }
    }

    /// Act on a row: enter directories, return files
    pub fn activate(&mut self, index: usize) -> Option<PathBuf> {
        match self.entries.get(index)?.clone() {
            BrowserEntry::Parent => {
                if let Some(parent) = self.current_dir.parent() {
                    self.current_dir = parent.to_path_buf();
                    self.refresh();
                }
                None
            }
            BrowserEntry::Directory(entry) => {
                self.current_dir = entry.path;
                self.refresh();
                None
            }
            BrowserEntry::File(entry) => Some(entry.path),
            BrowserEntry::Error(_) => None,
        }
    }

    /// Path of the highlighted row if it is a file
    pub fn select_highlighted(&self) -> Option<PathBuf> {
        match self.entries.get(self.highlighted?)? {
            BrowserEntry::File(entry) if entry.path.is_file() => Some(entry.path.clone()),
            _ => None,
        }
    }

    pub fn highlight_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        self.highlighted = Some(match self.highlighted {
            Some(idx) => (idx + 1).min(last),
            None => 0,
        });
    }

    pub fn highlight_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(idx) => idx.saturating_sub(1),
            None => 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("inner.md"), "inner").unwrap();
        fs::write(dir.path().join("top.md"), "top").unwrap();
        fs::write(dir.path().join("skip.bin"), "").unwrap();
        dir
    }

    #[test]
    fn test_entries() {
        let dir = sample_dir();
        let browser = FileBrowser::new("Open File", dir.path());

        let labels: Vec<_> = browser.entries.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["..", "\u{1F4C1} sub", "\u{1F4C4} top.md"]);
        assert_eq!(browser.highlighted, None);
    }

    #[test]
    fn test_navigate_and_choose() {
        let dir = sample_dir();
        let mut browser = FileBrowser::new("Open File", dir.path());

        assert_eq!(browser.activate(1), None);
        assert_eq!(browser.current_dir, dir.path().join("sub"));
        assert_eq!(browser.entries.len(), 2);

        let chosen = browser.activate(1);
        assert_eq!(chosen, Some(dir.path().join("sub").join("inner.md")));

        assert_eq!(browser.activate(0), None);
        assert_eq!(browser.current_dir, dir.path());
    }

    #[test]
    fn test_unreadable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut browser = FileBrowser::new("Open File", &dir.path().join("gone"));

        assert_eq!(
            browser.entries,
            vec![
                BrowserEntry::Parent,
                BrowserEntry::Error("Permission denied".to_string())
            ]
        );
        assert_eq!(browser.activate(1), None);
    }

    #[test]
    fn test_select_highlighted_only_files() {
        let dir = sample_dir();
        let mut browser = FileBrowser::new("Open File", dir.path());
        assert_eq!(browser.select_highlighted(), None);

        browser.highlight_next();
        assert_eq!(browser.highlighted, Some(0));
        assert_eq!(browser.select_highlighted(), None);

        browser.highlight_next();
        assert_eq!(browser.select_highlighted(), None);

        browser.highlight_next();
        assert_eq!(browser.select_highlighted(), Some(dir.path().join("top.md")));

        browser.highlight_next();
        assert_eq!(browser.highlighted, Some(2));

        browser.highlight_previous();
        browser.highlight_previous();
        browser.highlight_previous();
        assert_eq!(browser.highlighted, Some(0));
    }
}
