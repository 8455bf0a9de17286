pub mod card_store;
pub mod card_view;
pub mod commands;
pub mod config;
pub mod domains;
pub mod error;
pub mod iced_ui;
pub mod interfaces;
pub mod logging;
pub mod native_dialogs;
pub mod providers;
pub mod runtime_paths;
pub mod services;
pub mod ui;
pub mod workbench;

pub use error::{CardForgeError, Result};
