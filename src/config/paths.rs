use directories::ProjectDirs;
use std::path::PathBuf;

const CONFIG_FILE: &str = "engine.json";

pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sieve-engine").map(|d| d.config_dir().to_path_buf())
}

/// Where [`crate::store::config_store::load_config`] looks by default.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CONFIG_FILE))
}
