//! Modal dialogs for the file workflows

use std::path::PathBuf;

use eframe::egui::{self, Key, RichText};

use crate::core::browser::FileBrowser;
use crate::core::session::{Dialog, Outcome, Session};

/// What the user answered this frame
enum Answer {
    Confirm(bool),
    Input(Option<String>),
    Choose(Option<PathBuf>),
}

/// Draws whichever dialog the session is waiting on
pub struct DialogLayer;

impl DialogLayer {
    /// Show the active dialog and feed the answer back to the session
    pub fn show(ctx: &egui::Context, session: &mut Session) -> Outcome {
        let answer = match session.dialog.as_mut() {
            None => return Outcome::Continue,
            Some(Dialog::Confirm { title, message, .. }) => Self::confirm(ctx, title, message),
            Some(Dialog::Input {
                title,
                placeholder,
                hint,
                value,
            }) => Self::input(ctx, title, placeholder, hint.as_deref(), value),
            Some(Dialog::Browser(browser)) => Self::browser(ctx, browser),
        };

        match answer {
            None => Outcome::Continue,
            Some(Answer::Confirm(accepted)) => session.confirm(accepted),
            Some(Answer::Input(value)) => {
                session.submit_input(value);
                Outcome::Continue
            }
            Some(Answer::Choose(path)) => {
                session.choose_file(path);
                Outcome::Continue
            }
        }
    }

    fn confirm(ctx: &egui::Context, title: &str, message: &str) -> Option<Answer> {
        let modal = egui::Modal::new(egui::Id::new("confirm_dialog")).show(ctx, |ui| {
            ui.set_width(320.0);
            ui.vertical_centered(|ui| {
                ui.heading(title);
                ui.add_space(8.0);
                ui.label(message);
                ui.add_space(12.0);
            });

            let mut answer = None;
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() || ui.input(|i| i.key_pressed(Key::Enter)) {
                    answer = Some(Answer::Confirm(true));
                }
                if ui.button("No").clicked() {
                    answer = Some(Answer::Confirm(false));
                }
            });
            answer
        });

        if modal.should_close() {
            return Some(Answer::Confirm(false));
        }
        modal.inner
    }

    fn input(
        ctx: &egui::Context,
        title: &str,
        placeholder: &str,
        hint: Option<&str>,
        value: &mut String,
    ) -> Option<Answer> {
        let modal = egui::Modal::new(egui::Id::new("input_dialog")).show(ctx, |ui| {
            ui.set_width(400.0);
            ui.vertical_centered(|ui| {
                ui.heading(title);
            });
            ui.add_space(8.0);

            let response = ui.add(
                egui::TextEdit::singleline(value)
                    .hint_text(placeholder)
                    .desired_width(f32::INFINITY),
            );
            response.request_focus();

            if let Some(hint) = hint {
                ui.add_space(4.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(hint).weak());
                });
            }

            if ui.input(|i| i.key_pressed(Key::Enter)) {
                Some(Answer::Input(Some(value.clone())))
            } else {
                None
            }
        });

        if modal.should_close() {
            return Some(Answer::Input(None));
        }
        modal.inner
    }

    fn browser(ctx: &egui::Context, browser: &mut FileBrowser) -> Option<Answer> {
        let modal = egui::Modal::new(egui::Id::new("file_browser")).show(ctx, |ui| {
            ui.set_width(640.0);
            ui.vertical_centered(|ui| {
                ui.heading(&browser.title);
            });
            ui.label(format!("Current: {}", browser.current_dir.display()));
            ui.separator();

            let mut answer = None;

            ui.input(|i| {
                if i.key_pressed(Key::ArrowDown) {
                    browser.highlight_next();
                }
                if i.key_pressed(Key::ArrowUp) {
                    browser.highlight_previous();
                }
            });
            if ui.input(|i| i.key_pressed(Key::Enter)) {
                if let Some(idx) = browser.highlighted {
                    answer = browser.activate(idx).map(|p| Answer::Choose(Some(p)));
                }
            }

            let mut activated = None;
            egui::ScrollArea::vertical()
                .id_salt("file_browser_scroll")
                .max_height(360.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for (idx, entry) in browser.entries.iter().enumerate() {
                        let selected = browser.highlighted == Some(idx);
                        let response = ui.selectable_label(selected, entry.label());
                        if response.clicked() {
                            browser.highlighted = Some(idx);
                        }
                        if response.double_clicked() {
                            activated = Some(idx);
                        }
                    }
                });

            if let Some(idx) = activated {
                answer = browser.activate(idx).map(|p| Answer::Choose(Some(p)));
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Select").clicked() {
                    if let Some(path) = browser.select_highlighted() {
                        answer = Some(Answer::Choose(Some(path)));
                    }
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(Answer::Choose(None));
                }
            });

            answer
        });

        if modal.should_close() {
            return Some(Answer::Choose(None));
        }
        modal.inner
    }
}
