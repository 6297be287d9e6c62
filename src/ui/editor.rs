//! Markdown editor panel

use eframe::egui::{self, Color32, FontId, TextFormat};
use egui::text::{CCursor, CCursorRange, LayoutJob};
use egui::text_edit::TextEditState;

use crate::core::config::EditorConfig;
use crate::core::session::Session;

/// Markdown editor panel
pub struct EditorPanel;

impl EditorPanel {
    fn id() -> egui::Id {
        egui::Id::new("markdown_editor")
    }

    /// Forget cursor and undo history, after the buffer was replaced by another document
    pub fn reset(ctx: &egui::Context) {
        TextEditState::default().store(ctx, Self::id());
    }

    /// Show the editor panel
    ///
    /// `place_cursor` pushes `session.cursor` into the widget before drawing,
    /// after a formatting command moved it. `focus` grabs keyboard focus.
    pub fn show(
        ui: &mut egui::Ui,
        session: &mut Session,
        config: &EditorConfig,
        place_cursor: bool,
        focus: bool,
    ) {
        let id = Self::id();
        let font_id = FontId::monospace(config.font_size);

        if place_cursor {
            let mut state = TextEditState::load(ui.ctx(), id).unwrap_or_default();
            let cursor = CCursor::new(session.cursor);
            state.cursor.set_char_range(Some(CCursorRange::one(cursor)));
            state.store(ui.ctx(), id);
        }

        let mut text = session.document.content.clone();
        let word_wrap = config.word_wrap;
        let mut layouter = |ui: &egui::Ui, buf: &dyn egui::TextBuffer, wrap_width: f32| {
            let mut job = MarkdownHighlighter::layout_job(buf.as_str(), font_id.clone());
            job.wrap.max_width = if word_wrap { wrap_width } else { f32::INFINITY };
            ui.fonts(|f| f.layout_job(job))
        };

        let scroll = if word_wrap {
            egui::ScrollArea::vertical()
        } else {
            egui::ScrollArea::both()
        };

        scroll
            .id_salt("editor_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    if config.show_line_numbers {
                        Self::show_gutter(ui, &text, config.font_size);
                    }

                    let output = egui::TextEdit::multiline(&mut text)
                        .id(id)
                        .font(FontId::monospace(config.font_size))
                        .code_editor()
                        .lock_focus(true)
                        .desired_width(f32::INFINITY)
                        .desired_rows(30)
                        .layouter(&mut layouter)
                        .show(ui);

                    if focus {
                        output.response.request_focus();
                    }
                    if let Some(range) = output.cursor_range {
                        session.cursor = range.primary.index;
                    }
                    if output.response.changed() {
                        session.edit(text.clone());
                    }
                });
            });
    }

    /// Line numbers, right aligned to the widest number
    fn show_gutter(ui: &mut egui::Ui, text: &str, font_size: f32) {
        let lines = text.split('\n').count();
        let width = lines.to_string().len();
        let numbers = (1..=lines)
            .map(|n| format!("{:>width$}", n, width = width))
            .collect::<Vec<_>>()
            .join("\n");

        ui.add(
            egui::Label::new(
                egui::RichText::new(numbers)
                    .font(FontId::monospace(font_size))
                    .color(Color32::from_rgb(92, 99, 112)),
            )
            .selectable(false),
        );
    }
}

/// Markdown role of a source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Fence,
    Code,
    ListItem,
    Quote,
    Text,
}

impl LineKind {
    fn color(self) -> Color32 {
        match self {
            LineKind::Heading => Color32::from_rgb(129, 162, 190),
            LineKind::Fence | LineKind::Code => Color32::from_rgb(152, 195, 121),
            LineKind::ListItem => Color32::from_rgb(224, 108, 117),
            LineKind::Quote => Color32::from_rgb(198, 120, 221),
            LineKind::Text => Color32::from_rgb(171, 178, 191),
        }
    }
}

/// Line-based syntax coloring for markdown source
pub struct MarkdownHighlighter;

impl MarkdownHighlighter {
    /// Classify one line outside a code fence
    pub fn classify_line(line: &str) -> LineKind {
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") {
            return LineKind::Fence;
        }

        let hashes = line.chars().take_while(|c| *c == '#').count();
        if (1..=6).contains(&hashes) && line[hashes..].starts_with([' ', '\t']) {
            return LineKind::Heading;
        }
        if line.len() == hashes && hashes > 0 && hashes <= 6 {
            return LineKind::Heading;
        }

        if trimmed.starts_with('>') {
            return LineKind::Quote;
        }

        if ["- ", "* ", "+ "].iter().any(|m| trimmed.starts_with(m)) || is_ordered_marker(trimmed) {
            return LineKind::ListItem;
        }

        LineKind::Text
    }

    /// Classify every line, tracking code fences
    pub fn classify(text: &str) -> Vec<LineKind> {
        let mut in_fence = false;
        text.split('\n')
            .map(|line| {
                let kind = Self::classify_line(line);
                if kind == LineKind::Fence {
                    in_fence = !in_fence;
                    LineKind::Fence
                } else if in_fence {
                    LineKind::Code
                } else {
                    kind
                }
            })
            .collect()
    }

    /// Build a colored layout for the editor
    pub fn layout_job(text: &str, font_id: FontId) -> LayoutJob {
        let mut job = LayoutJob::default();
        for (line, kind) in text.split_inclusive('\n').zip(Self::classify(text)) {
            job.append(line, 0.0, TextFormat::simple(font_id.clone(), kind.color()));
        }
        job
    }
}

/// `1. ` or `1) ` style marker
fn is_ordered_marker(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && (line[digits..].starts_with(". ") || line[digits..].starts_with(") "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reset_drops_history_of_previous_document() {
        let ctx = egui::Context::default();
        let previous = (CCursorRange::one(CCursor::new(3)), "old text".to_string());
        let current = (CCursorRange::one(CCursor::new(0)), "new".to_string());

        let mut state = TextEditState::default();
        let mut undoer = state.undoer();
        undoer.add_undo(&previous);
        state.set_undoer(undoer);
        state.cursor.set_char_range(Some(previous.0));
        state.store(&ctx, EditorPanel::id());
        let stored = TextEditState::load(&ctx, EditorPanel::id()).unwrap();
        assert!(stored.undoer().has_undo(&current));

        EditorPanel::reset(&ctx);
        let state = TextEditState::load(&ctx, EditorPanel::id()).unwrap();
        assert!(!state.undoer().has_undo(&current));
        assert!(state.cursor.char_range().is_none());
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(MarkdownHighlighter::classify_line("# Title"), LineKind::Heading);
        assert_eq!(MarkdownHighlighter::classify_line("###### Six"), LineKind::Heading);
        assert_eq!(MarkdownHighlighter::classify_line("####### Seven"), LineKind::Text);
        assert_eq!(MarkdownHighlighter::classify_line("#hashtag"), LineKind::Text);
        assert_eq!(MarkdownHighlighter::classify_line("```rust"), LineKind::Fence);
        assert_eq!(MarkdownHighlighter::classify_line("  - nested"), LineKind::ListItem);
        assert_eq!(MarkdownHighlighter::classify_line("12. twelfth"), LineKind::ListItem);
        assert_eq!(MarkdownHighlighter::classify_line("> quoted"), LineKind::Quote);
        assert_eq!(MarkdownHighlighter::classify_line("plain"), LineKind::Text);
    }

    #[test]
    fn test_classify_tracks_fences() {
        let kinds = MarkdownHighlighter::classify("# A\n```\n# not a heading\n```\n- b");
        assert_eq!(
            kinds,
            vec![
                LineKind::Heading,
                LineKind::Fence,
                LineKind::Code,
                LineKind::Fence,
                LineKind::ListItem,
            ]
        );
    }

    #[test]
    fn test_layout_job_covers_text() {
        let text = "# A\n\nbody\n";
        let job = MarkdownHighlighter::layout_job(text, FontId::monospace(14.0));
        assert_eq!(job.text, text);
        assert_eq!(job.sections.len(), 3);
    }
}
