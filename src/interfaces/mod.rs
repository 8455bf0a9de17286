pub mod dialogs;
pub mod providers;
