use async_trait::async_trait;
use rfd::AsyncFileDialog;
use std::path::PathBuf;

use crate::interfaces::dialogs::PathPicker;

/// File choosers from the desktop environment, filtered to `.json` by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePathPicker;

fn card_file_dialog() -> AsyncFileDialog {
    AsyncFileDialog::new()
        .add_filter("JSON files", &["json"])
        .add_filter("All files", &["*"])
}

#[async_trait]
impl PathPicker for NativePathPicker {
    async fn pick_open_path(&self) -> Option<PathBuf> {
        card_file_dialog()
            .set_title("Load card")
            .pick_file()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    async fn pick_save_path(&self, suggested_name: &str) -> Option<PathBuf> {
        card_file_dialog()
            .set_title("Save card as")
            .set_file_name(suggested_name)
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
    }
}
