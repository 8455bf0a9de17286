use async_trait::async_trait;
use std::path::PathBuf;

/// Interactive path prompts. `None` means the user cancelled.
#[async_trait]
pub trait PathPicker: Send + Sync {
    async fn pick_open_path(&self) -> Option<PathBuf>;
    async fn pick_save_path(&self, suggested_name: &str) -> Option<PathBuf>;
}
