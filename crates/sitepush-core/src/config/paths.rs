//! Config path resolution helpers.

use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "sitepush.toml";

/// Overrides the global config directory (used by tests and CI).
pub const CONFIG_DIR_ENV: &str = "SITEPUSH_CONFIG_DIR";

pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|p| p.join("sitepush"))
}

pub fn global_config_path(global_dir: &Path) -> PathBuf {
    global_dir.join(CONFIG_FILE_NAME)
}

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}
