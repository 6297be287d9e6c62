//! Editing session: the document plus the new/open/save/quit workflows
//!
//! Workflows that need an answer from the user park themselves in a
//! [`Dialog`]. The UI shows the dialog and feeds the answer back through
//! [`Session::confirm`], [`Session::submit_input`] or
//! [`Session::choose_file`], which resume the parked [`Pending`] step.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::browser::FileBrowser;
use super::document::Document;
use super::error::FileError;
use super::file_system::{absolute_path, parent_dir, resolve_save_path};
use super::fixture::FIXTURE;
use super::format::{self, FormatAction};

/// How long a notice stays on screen
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(3);

const UNSAVED_TITLE: &str = "Unsaved Changes";
const UNSAVED_CONTINUE: &str = "You have unsaved changes. Continue?";
const SAVE_AS_TITLE: &str = "Save As (Markdown file):";
const SAVE_AS_HINT: &str = "(.md extension will be added automatically)";

/// Something the user asked for, from a key binding or a menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Quit,
    TogglePreview,
    Format(FormatAction),
}

/// Step to run once a confirmation is accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    NewDocument,
    ShowOpen,
    OpenPath(PathBuf),
    LoadSample,
    Overwrite(PathBuf),
    Quit,
}

/// The dialog currently waiting on the user
#[derive(Debug, Clone)]
pub enum Dialog {
    Confirm {
        title: String,
        message: String,
        then: Pending,
    },
    Input {
        title: String,
        placeholder: String,
        hint: Option<String>,
        value: String,
    },
    Browser(FileBrowser),
}

/// Whether the app should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Transient message for the user
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub created: Instant,
}

/// Editor session state
#[derive(Debug)]
pub struct Session {
    /// The buffer and its file binding
    pub document: Document,
    /// Cursor as a character offset into the buffer
    pub cursor: usize,
    /// Whether the preview panel is shown
    pub preview: bool,
    /// Directory for the file browser and relative save-as names
    pub current_dir: PathBuf,
    /// Active dialog, at most one
    pub dialog: Option<Dialog>,
    /// Notices not yet expired
    pub notices: Vec<Notice>,
    /// Files opened or saved since the last call to `take_touched_files`
    touched_files: Vec<PathBuf>,
    /// The buffer was swapped for another document; editor history is stale
    document_replaced: bool,
}

impl Session {
    /// Create a session around a document
    pub fn new(document: Document, current_dir: PathBuf) -> Self {
        Self {
            document,
            cursor: 0,
            preview: false,
            current_dir,
            dialog: None,
            notices: Vec::new(),
            touched_files: Vec::new(),
            document_replaced: false,
        }
    }

    /// Run a command
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        tracing::debug!("Command: {:?}", command);
        match command {
            Command::New => self.guard_unsaved(UNSAVED_CONTINUE, Pending::NewDocument),
            Command::Open => self.guard_unsaved(UNSAVED_CONTINUE, Pending::ShowOpen),
            Command::Save => {
                self.save();
                Outcome::Continue
            }
            Command::SaveAs => {
                self.start_save_as();
                Outcome::Continue
            }
            Command::Quit => self.guard_unsaved("You have unsaved changes. Exit anyway?", Pending::Quit),
            Command::TogglePreview => {
                self.preview = !self.preview;
                Outcome::Continue
            }
            Command::Format(action) => {
                self.format(action);
                Outcome::Continue
            }
        }
    }

    /// Ask before discarding changes, or go straight on
    fn guard_unsaved(&mut self, message: &str, then: Pending) -> Outcome {
        if self.document.modified {
            self.dialog = Some(Dialog::Confirm {
                title: UNSAVED_TITLE.to_string(),
                message: message.to_string(),
                then,
            });
            Outcome::Continue
        } else {
            self.resume(then)
        }
    }

    fn resume(&mut self, pending: Pending) -> Outcome {
        match pending {
            Pending::NewDocument => self.replace_document(Document::untitled("")),
            Pending::ShowOpen => {
                self.dialog = Some(Dialog::Browser(FileBrowser::new("Open File", &self.current_dir)));
            }
            Pending::OpenPath(path) => self.open_file(&path),
            Pending::LoadSample => self.replace_document(Document::untitled(FIXTURE)),
            Pending::Overwrite(path) => self.write_to(&path),
            Pending::Quit => return Outcome::Exit,
        }
        Outcome::Continue
    }

    /// Open a known path, such as a recent file, asking first if there are changes
    pub fn request_open_path(&mut self, path: PathBuf) {
        self.guard_unsaved(UNSAVED_CONTINUE, Pending::OpenPath(path));
    }

    /// Replace the buffer with the bundled sample document
    pub fn request_sample(&mut self) {
        self.guard_unsaved(UNSAVED_CONTINUE, Pending::LoadSample);
    }

    /// Answer the active confirmation
    pub fn confirm(&mut self, accepted: bool) -> Outcome {
        match self.dialog.take() {
            Some(Dialog::Confirm { then, .. }) if accepted => self.resume(then),
            Some(Dialog::Confirm { .. }) => Outcome::Continue,
            other => {
                self.dialog = other;
                Outcome::Continue
            }
        }
    }

    /// Answer the active input dialog; `None` cancels
    pub fn submit_input(&mut self, value: Option<String>) {
        let Some(Dialog::Input { .. }) = self.dialog else {
            return;
        };
        self.dialog = None;

        let Some(path) = value.and_then(|v| resolve_save_path(&v, &self.current_dir)) else {
            return;
        };

        if path.exists() {
            let name = path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            self.dialog = Some(Dialog::Confirm {
                title: "File Exists".to_string(),
                message: format!("File {} exists. Overwrite?", name),
                then: Pending::Overwrite(path),
            });
        } else {
            self.write_to(&path);
        }
    }

    /// Answer the active file browser; `None` cancels
    pub fn choose_file(&mut self, path: Option<PathBuf>) {
        if !matches!(self.dialog, Some(Dialog::Browser(_))) {
            return;
        }
        self.dialog = None;

        if let Some(path) = path {
            self.open_file(&path);
        }
    }

    /// Close whatever dialog is open without acting on it
    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.cursor = 0;
        self.document_replaced = true;
    }

    /// Load a file into the buffer, replacing it
    pub fn open_file(&mut self, path: &Path) {
        let path = absolute_path(path);
        match Document::open(&path) {
            Ok(document) => {
                let name = document.name();
                self.replace_document(document);
                self.current_dir = parent_dir(&path);
                self.touched_files.push(path.clone());
                self.notify(format!("Opened: {}", name));
            }
            Err(FileError::NotFound(_)) => {
                self.notify(format!("File not found: {}", path.display()));
            }
            Err(e) => {
                tracing::error!("Failed to open document: {}", e);
                self.notify(format!("Error opening file: {}", e));
            }
        }
    }

    fn save(&mut self) {
        if self.document.path.is_none() {
            self.start_save_as();
            return;
        }

        match self.document.save() {
            Ok(()) => {
                if let Some(path) = self.document.path.clone() {
                    self.touched_files.push(path);
                }
                self.notify(format!("Saved: {}", self.document.name()));
            }
            Err(e) => {
                tracing::error!("Failed to save document: {}", e);
                self.notify(format!("Error saving file: {}", e));
            }
        }
    }

    fn start_save_as(&mut self) {
        self.dialog = Some(Dialog::Input {
            title: SAVE_AS_TITLE.to_string(),
            placeholder: "filename".to_string(),
            hint: Some(SAVE_AS_HINT.to_string()),
            value: String::new(),
        });
    }

    fn write_to(&mut self, path: &Path) {
        let path = absolute_path(path);
        match self.document.save_to(&path) {
            Ok(()) => {
                self.current_dir = parent_dir(&path);
                self.touched_files.push(path.clone());
                self.notify(format!("Saved: {}", self.document.name()));
            }
            Err(e) => {
                tracing::error!("Failed to save document: {}", e);
                self.notify(format!("Error saving file: {}", e));
            }
        }
    }

    fn format(&mut self, action: FormatAction) {
        let (text, cursor) = format::apply(action, &self.document.content, self.cursor);
        self.document.set_content(text);
        self.cursor = cursor;
    }

    /// Replace the buffer after an edit in the editor
    pub fn edit(&mut self, text: String) {
        self.document.set_content(text);
    }

    /// `name[ •] | Preview: ON/OFF`
    pub fn status_text(&self) -> String {
        let modified = if self.document.modified { " \u{2022}" } else { "" };
        let preview = if self.preview { "ON" } else { "OFF" };
        format!("{}{} | Preview: {}", self.document.name(), modified, preview)
    }

    /// Window title
    pub fn window_title(&self) -> String {
        let modified = if self.document.modified { " \u{2022}" } else { "" };
        format!("Writ \u{2014} {}{}", self.document.name(), modified)
    }

    /// Queue a notice
    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.notices.push(Notice {
            message,
            created: Instant::now(),
        });
    }

    /// Whether the buffer was replaced by another document since the last call
    pub fn take_document_replaced(&mut self) -> bool {
        std::mem::take(&mut self.document_replaced)
    }

    /// Drop notices older than [`NOTICE_LIFETIME`]
    pub fn prune_notices(&mut self, now: Instant) {
        self.notices
            .retain(|notice| now.saturating_duration_since(notice.created) < NOTICE_LIFETIME);
    }

    /// Files opened or saved since the last call
    pub fn take_touched_files(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.touched_files)
    }
}
