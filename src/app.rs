//! Main application state and UI coordination

use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui::{self, Key, Modifiers};

use crate::core::config::AppConfig;
use crate::core::document::{self, Document};
use crate::core::format::FormatAction;
use crate::core::position;
use crate::core::session::{Command, Outcome, Session};
use crate::ui::{
    dialogs::DialogLayer,
    editor::EditorPanel,
    outline::OutlinePanel,
    preview::PreviewPanel,
    status_bar::{NoticeOverlay, StatusBar},
};

const CTRL: Modifiers = Modifiers::CTRL;
const CTRL_SHIFT: Modifiers = Modifiers {
    shift: true,
    ..Modifiers::CTRL
};
const NONE: Modifiers = Modifiers::NONE;

/// Key bindings, checked in order; Ctrl+Shift+S must come before Ctrl+S
const SHORTCUTS: &[(Modifiers, Key, Command)] = &[
    (CTRL_SHIFT, Key::S, Command::SaveAs),
    (CTRL, Key::N, Command::New),
    (CTRL, Key::O, Command::Open),
    (CTRL, Key::S, Command::Save),
    (CTRL, Key::Q, Command::Quit),
    (NONE, Key::F12, Command::TogglePreview),
    (CTRL, Key::J, Command::Format(FormatAction::Bold)),
    (CTRL, Key::K, Command::Format(FormatAction::Italic)),
    (CTRL, Key::U, Command::Format(FormatAction::Link)),
    (NONE, Key::F7, Command::Format(FormatAction::CodeBlock)),
    (NONE, Key::F8, Command::Format(FormatAction::InlineCode)),
    (NONE, Key::F9, Command::Format(FormatAction::ListItem)),
    (NONE, Key::F1, Command::Format(FormatAction::Heading(1))),
    (NONE, Key::F2, Command::Format(FormatAction::Heading(2))),
    (NONE, Key::F3, Command::Format(FormatAction::Heading(3))),
    (NONE, Key::F4, Command::Format(FormatAction::Heading(4))),
    (NONE, Key::F5, Command::Format(FormatAction::Heading(5))),
    (NONE, Key::F6, Command::Format(FormatAction::Heading(6))),
];

/// Formatting entries of the Format menu
const FORMAT_MENU: &[FormatAction] = &[
    FormatAction::Bold,
    FormatAction::Italic,
    FormatAction::InlineCode,
    FormatAction::Link,
    FormatAction::CodeBlock,
    FormatAction::ListItem,
];

/// Human-readable shortcut for a command
fn shortcut_text(command: Command) -> Option<String> {
    let (modifiers, key, _) = SHORTCUTS.iter().find(|(_, _, c)| *c == command)?;
    let prefix = match (modifiers.ctrl, modifiers.shift) {
        (true, true) => "Ctrl+Shift+",
        (true, false) => "Ctrl+",
        _ => "",
    };
    Some(format!("{}{}", prefix, key.name()))
}

/// Main application state
pub struct WritApp {
    /// Document, workflows and notices
    pub session: Session,
    /// Application configuration
    pub config: AppConfig,
    /// Commonmark cache for preview
    pub commonmark_cache: egui_commonmark::CommonMarkCache,
    /// Heading outline side panel
    outline: OutlinePanel,
    /// Whether the outline panel is visible
    outline_visible: bool,
    /// Push the session cursor into the editor on the next frame
    place_cursor: bool,
    /// Give the editor keyboard focus on the next frame
    focus_editor: bool,
    /// Quit was confirmed; let the close request through
    exiting: bool,
    /// Last title sent to the window
    window_title: String,
}

impl WritApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, file: Option<PathBuf>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let browse_dir = config
            .last_dir
            .clone()
            .filter(|dir| dir.is_dir())
            .unwrap_or_else(|| cwd.clone());

        let mut session = Session::new(Document::untitled(""), browse_dir);
        match file {
            Some(path) => session.open_file(&path),
            None => session.document = Document::untitled(document::initial_text(&cwd)),
        }
        session.preview = config.ui.preview_on_start;

        Self {
            session,
            config,
            commonmark_cache: egui_commonmark::CommonMarkCache::default(),
            outline: OutlinePanel::default(),
            outline_visible: false,
            place_cursor: false,
            focus_editor: true,
            exiting: false,
            window_title: String::new(),
        }
    }

    /// Run a command and act on its outcome
    fn run(&mut self, ctx: &egui::Context, command: Command) {
        if let Command::Format(_) = command {
            self.place_cursor = true;
            self.focus_editor = true;
        }

        if self.session.dispatch(command) == Outcome::Exit {
            self.exit(ctx);
        }
    }

    fn exit(&mut self, ctx: &egui::Context) {
        tracing::info!("Exiting");
        self.exiting = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    /// Collect key bindings pressed this frame, consuming them so the editor never sees them
    fn read_shortcuts(&self, ctx: &egui::Context) -> Vec<Command> {
        if self.session.dialog.is_some() {
            return Vec::new();
        }

        ctx.input_mut(|i| {
            SHORTCUTS
                .iter()
                .filter(|(modifiers, key, _)| i.consume_key(*modifiers, *key))
                .map(|(_, _, command)| *command)
                .collect()
        })
    }

    /// Record opened and saved files in the config
    fn remember_files(&mut self) {
        let touched = self.session.take_touched_files();
        if touched.is_empty() {
            return;
        }

        for path in touched {
            self.config.add_recent_file(path);
        }
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {:#}", e);
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) -> Vec<Command> {
        let mut commands = Vec::new();
        let mut open_recent = None;
        let mut load_sample = false;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    for (label, command) in [
                        ("New", Command::New),
                        ("Open...", Command::Open),
                        ("Save", Command::Save),
                        ("Save As...", Command::SaveAs),
                    ] {
                        if menu_item(ui, label, command) {
                            commands.push(command);
                            ui.close();
                        }
                    }

                    ui.menu_button("Open Recent", |ui| {
                        if self.config.recent_files.is_empty() {
                            ui.label("No recent files");
                        }
                        for path in &self.config.recent_files {
                            if ui.button(path.display().to_string()).clicked() {
                                open_recent = Some(path.clone());
                                ui.close();
                            }
                        }
                    });

                    ui.separator();
                    if menu_item(ui, "Quit", Command::Quit) {
                        commands.push(Command::Quit);
                        ui.close();
                    }
                });

                ui.menu_button("Format", |ui| {
                    for action in FORMAT_MENU {
                        let command = Command::Format(*action);
                        if menu_item(ui, &action.label(), command) {
                            commands.push(command);
                            ui.close();
                        }
                    }
                    ui.separator();
                    for level in 1..=6 {
                        let command = Command::Format(FormatAction::Heading(level));
                        if menu_item(ui, &format!("H{}", level), command) {
                            commands.push(command);
                            ui.close();
                        }
                    }
                });

                ui.menu_button("View", |ui| {
                    let label = if self.session.preview {
                        "Hide Preview"
                    } else {
                        "Show Preview"
                    };
                    if menu_item(ui, label, Command::TogglePreview) {
                        commands.push(Command::TogglePreview);
                        ui.close();
                    }
                    if ui.checkbox(&mut self.outline_visible, "Outline").clicked() {
                        ui.close();
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("Open Sample Document").clicked() {
                        load_sample = true;
                        ui.close();
                    }
                });
            });
        });

        if let Some(path) = open_recent {
            self.session.request_open_path(path);
        }
        if load_sample {
            self.session.request_sample();
        }
        commands
    }

    fn sync_window_title(&mut self, ctx: &egui::Context) {
        let title = self.session.window_title();
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }
    }
}

/// A menu button labelled with its shortcut
fn menu_item(ui: &mut egui::Ui, label: &str, command: Command) -> bool {
    let mut button = egui::Button::new(label);
    if let Some(shortcut) = shortcut_text(command) {
        button = button.shortcut_text(shortcut);
    }
    ui.add(button).clicked()
}

impl eframe::App for WritApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Window close goes through the same unsaved-changes check as Quit
        if ctx.input(|i| i.viewport().close_requested()) && !self.exiting {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.session.cancel_dialog();
            self.run(ctx, Command::Quit);
        }

        let had_dialog = self.session.dialog.is_some();

        for command in self.read_shortcuts(ctx) {
            self.run(ctx, command);
        }
        for command in self.render_menu_bar(ctx) {
            self.run(ctx, command);
        }

        StatusBar::show(ctx, &self.session);

        if self.outline_visible {
            egui::SidePanel::left("outline_panel")
                .resizable(true)
                .default_width(220.0)
                .min_width(150.0)
                .show(ctx, |ui| {
                    if let Some(line) = self.outline.show(ui, &self.session.document.content) {
                        self.session.cursor = position::offset_of(&self.session.document.content, line, 0);
                        self.place_cursor = true;
                        self.focus_editor = true;
                    }
                });
        }

        if self.session.take_document_replaced() {
            EditorPanel::reset(ctx);
        }

        let place_cursor = std::mem::take(&mut self.place_cursor);
        let focus = std::mem::take(&mut self.focus_editor);

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.preview {
                // Split view: editor on left, preview on right
                let available_width = ui.available_width();
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(available_width / 2.0 - 4.0);
                        EditorPanel::show(ui, &mut self.session, &self.config.editor, place_cursor, focus);
                    });

                    ui.separator();

                    ui.vertical(|ui| {
                        ui.set_width(available_width / 2.0 - 4.0);
                        PreviewPanel::show(ui, &self.session.document, &mut self.commonmark_cache);
                    });
                });
            } else {
                EditorPanel::show(ui, &mut self.session, &self.config.editor, place_cursor, focus);
            }
        });

        if DialogLayer::show(ctx, &mut self.session) == Outcome::Exit {
            self.exit(ctx);
        }
        if had_dialog && self.session.dialog.is_none() {
            self.focus_editor = true;
        }

        self.session.prune_notices(Instant::now());
        NoticeOverlay::show(ctx, &self.session.notices);
        if !self.session.notices.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        self.remember_files();
        self.sync_window_title(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_text() {
        assert_eq!(shortcut_text(Command::SaveAs).as_deref(), Some("Ctrl+Shift+S"));
        assert_eq!(shortcut_text(Command::Save).as_deref(), Some("Ctrl+S"));
        assert_eq!(shortcut_text(Command::TogglePreview).as_deref(), Some("F12"));
        assert_eq!(
            shortcut_text(Command::Format(FormatAction::Heading(3))).as_deref(),
            Some("F3")
        );
    }

    #[test]
    fn test_every_format_action_has_a_binding() {
        let mut actions: Vec<_> = FORMAT_MENU.to_vec();
        actions.extend((1..=6).map(FormatAction::Heading));
        for action in actions {
            assert!(
                shortcut_text(Command::Format(action)).is_some(),
                "{:?} has no shortcut",
                action
            );
        }
    }
}
