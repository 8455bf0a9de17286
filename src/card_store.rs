use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domains::card::CardRecord;
use crate::error::Result;
use crate::interfaces::dialogs::PathPicker;

/// Writes `<dir>/<name>.json`, creating `dir` first. Same-name cards overwrite.
pub fn save_to_dir(card: &CardRecord, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(card.file_name());
    save_to_path(card, &path)?;
    Ok(path)
}

pub fn save_to_path(card: &CardRecord, path: &Path) -> Result<()> {
    let encoded = card.serialize()?;
    fs::write(path, encoded)?;
    info!(path = %path.display(), card = %card.name, "card saved");
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<CardRecord> {
    let raw = fs::read_to_string(path)?;
    let card = CardRecord::parse(&raw)?;
    info!(path = %path.display(), card = %card.name, "card loaded");
    Ok(card)
}

/// Saves silently into `dir` when given, otherwise asks for a path.
/// `Ok(None)` means the prompt was cancelled.
pub async fn save(
    card: &CardRecord,
    dir: Option<&Path>,
    picker: &dyn PathPicker,
) -> Result<Option<PathBuf>> {
    if let Some(dir) = dir {
        return save_to_dir(card, dir).map(Some);
    }
    let Some(path) = picker.pick_save_path(&card.file_name()).await else {
        return Ok(None);
    };
    save_to_path(card, &path)?;
    Ok(Some(path))
}

/// Asks for a card file and reads it. `Ok(None)` means the prompt was cancelled.
pub async fn load(picker: &dyn PathPicker) -> Result<Option<CardRecord>> {
    let Some(path) = picker.pick_open_path().await else {
        return Ok(None);
    };
    load_from_path(&path).map(Some)
}
