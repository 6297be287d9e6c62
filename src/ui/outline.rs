//! Document outline side panel

use eframe::egui::{self, RichText};

use crate::core::fixture::{inspect, DocumentOutline};

/// Heading tree and construct counts for the current buffer
#[derive(Default)]
pub struct OutlinePanel {
    /// Content the cached outline was built from
    cached_content: String,
    outline: DocumentOutline,
}

impl OutlinePanel {
    /// Re-inspect only when the buffer changed
    fn update(&mut self, content: &str) {
        if content != self.cached_content {
            self.outline = inspect(content);
            self.cached_content = content.to_string();
        }
    }

    /// Show the outline panel, returning the line of a clicked heading
    pub fn show(&mut self, ui: &mut egui::Ui, content: &str) -> Option<usize> {
        self.update(content);
        let outline = &self.outline;
        let mut clicked = None;

        ui.heading("Outline");
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("outline_scroll")
            .show(ui, |ui| {
                if outline.headings.is_empty() {
                    ui.label(RichText::new("No headings").weak());
                }
                for heading in &outline.headings {
                    ui.horizontal(|ui| {
                        ui.add_space(12.0 * f32::from(heading.level.saturating_sub(1)));
                        let text = RichText::new(&heading.text);
                        let text = if heading.level == 1 { text.strong() } else { text };
                        if ui.link(text).clicked() {
                            clicked = Some(heading.line);
                        }
                    });
                }

                ui.add_space(12.0);
                ui.separator();

                let tagged = outline
                    .code_blocks
                    .iter()
                    .filter(|block| block.language.is_some())
                    .count();
                let rows = [
                    ("Titles", outline.headings_at(1).len().to_string()),
                    ("Tables", outline.tables.len().to_string()),
                    (
                        "Code blocks",
                        format!("{} ({} tagged)", outline.code_blocks.len(), tagged),
                    ),
                    (
                        "Lists",
                        format!(
                            "{} (depth {})",
                            outline.ordered_lists + outline.unordered_lists,
                            outline.max_list_depth
                        ),
                    ),
                    ("Tasks", outline.task_items.to_string()),
                    ("Blockquotes", outline.blockquotes.to_string()),
                    ("Links", outline.links.to_string()),
                    ("Images", outline.images.to_string()),
                    ("Rules", outline.rules.to_string()),
                ];

                egui::Grid::new("outline_counts")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for (label, value) in rows {
                            ui.label(label);
                            ui.label(value);
                            ui.end_row();
                        }
                    });

                if !outline.all_code_blocks_tagged() {
                    ui.label(RichText::new("Some code blocks have no language tag").weak());
                }
                for table in &outline.tables {
                    ui.label(
                        RichText::new(format!("table: {} columns x {} rows", table.columns, table.rows))
                            .weak(),
                    );
                }
            });

        clicked
    }
}
