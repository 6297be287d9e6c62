//! Writ - minimal markdown editor
//!
//! A Rust-based markdown editor with formatting shortcuts and a live preview panel.

mod app;
mod core;
mod ui;

use std::path::PathBuf;

use app::WritApp;
use crate::core::config::AppConfig;
use crate::core::file_system::absolute_path;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Writ...");

    // Optional file to open
    let file = std::env::args_os()
        .nth(1)
        .map(|arg| absolute_path(&PathBuf::from(arg)));
    let config = AppConfig::load_or_default();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Writ"),
        ..Default::default()
    };

    eframe::run_native(
        "Writ",
        native_options,
        Box::new(|cc| Ok(Box::new(WritApp::new(cc, config, file)))),
    )
}
