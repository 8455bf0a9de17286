use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;
use std::sync::{OnceLock, RwLock};

fn config_root_override_lock() -> &'static RwLock<Option<PathBuf>> {
    static OVERRIDE: OnceLock<RwLock<Option<PathBuf>>> = OnceLock::new();
    OVERRIDE.get_or_init(|| RwLock::new(None))
}

fn config_root_override() -> Option<PathBuf> {
    let lock = config_root_override_lock();
    match lock.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

#[cfg(test)]
pub(crate) fn set_config_root_override_for_tests(path: Option<PathBuf>) {
    let lock = config_root_override_lock();
    match lock.write() {
        Ok(mut guard) => *guard = path,
        Err(poisoned) => *poisoned.into_inner() = path,
    }
}

fn platform_config_root() -> PathBuf {
    if let Some(project_dirs) = ProjectDirs::from("", "", "card-forge") {
        return project_dirs.config_dir().to_path_buf();
    }

    if let Some(base_dirs) = BaseDirs::new() {
        return base_dirs.config_dir().join("card-forge");
    }

    std::env::temp_dir().join("card-forge")
}

pub fn config_root() -> PathBuf {
    config_root_override().unwrap_or_else(platform_config_root)
}

pub fn default_config_path() -> PathBuf {
    config_root().join("config.json")
}
