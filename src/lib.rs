//! Fuel cost calculation core as a library, shared by the CLI and the desktop GUI.

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod form;
pub mod format;
pub mod fuel;
pub mod i18n;
pub mod report;
pub mod ui_cli;
