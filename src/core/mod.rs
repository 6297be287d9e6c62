//! Core functionality: the document, formatting, file workflows and configuration

pub mod browser;
pub mod config;
pub mod document;
pub mod error;
pub mod file_system;
pub mod fixture;
pub mod format;
pub mod position;
pub mod session;
