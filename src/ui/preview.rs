//! Markdown preview panel using egui_commonmark

use eframe::egui;
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

use crate::core::document::Document;

/// Markdown preview panel
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show the preview panel
    pub fn show(ui: &mut egui::Ui, document: &Document, cache: &mut CommonMarkCache) {
        let content = document.content_without_frontmatter();

        egui::ScrollArea::vertical()
            .id_salt("preview_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // Blank buffers render nothing
                if !content.trim().is_empty() {
                    CommonMarkViewer::new().show(ui, cache, content);
                }
            });
    }
}
