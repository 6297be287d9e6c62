//! Status line and notification overlay

use eframe::egui::{self, Color32, RichText};

use crate::core::position::location_of;
use crate::core::session::{Notice, Session};

/// Single-line status bar at the bottom of the window
pub struct StatusBar;

impl StatusBar {
    pub fn show(ctx: &egui::Context, session: &Session) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(RichText::new(session.status_text()).monospace());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let (row, col) = location_of(&session.document.content, session.cursor);
                        ui.label(RichText::new(format!("Ln {}, Col {}", row + 1, col + 1)).weak());
                    });
                });
            });
    }
}

/// Stack of transient notices in the bottom-right corner
pub struct NoticeOverlay;

impl NoticeOverlay {
    pub fn show(ctx: &egui::Context, notices: &[Notice]) {
        if notices.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notices"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -32.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                for notice in notices {
                    egui::Frame::new()
                        .fill(Color32::from_rgb(45, 45, 50))
                        .stroke(egui::Stroke::new(1.0, Color32::from_rgb(90, 90, 110)))
                        .inner_margin(egui::Margin::same(8))
                        .corner_radius(4)
                        .show(ui, |ui| {
                            ui.label(&notice.message);
                        });
                    ui.add_space(4.0);
                }
            });
    }
}
