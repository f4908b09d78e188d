//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod data;
pub mod record;
pub mod settings;

pub use data::{handle_export_command, handle_import_command};
pub use record::{handle_record_command, RecordCommands};
pub use settings::{handle_settings_command, SettingsCommands};
