//! UI components for Writ

pub mod dialogs;
pub mod editor;
pub mod outline;
pub mod preview;
pub mod status_bar;
