// src/paths.rs
// Single source of truth for where the panel keeps its files: everything
// lives beside the executable (config, Music, Intros, logs, compiler).

use std::path::{Path, PathBuf};

use autovid_core::assets::LOGS_DIR_NAME;
use autovid_core::config::CONFIG_FILE_NAME;

/// Directory containing the running executable, or the working directory
/// when that cannot be determined.
pub fn app_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn config_path(app_dir: &Path) -> PathBuf {
    app_dir.join(CONFIG_FILE_NAME)
}

pub fn logs_dir(app_dir: &Path) -> PathBuf {
    app_dir.join(LOGS_DIR_NAME)
}
