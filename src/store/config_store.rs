use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::{paths, EngineConfig};
use crate::store::StoreError;

/// Reads the configuration at `path`. Unlike [`load_config`], a missing or
/// malformed file is an error.
pub fn read_config(path: &Path) -> Result<EngineConfig, StoreError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// The per-user configuration, or the defaults when there is none.
pub fn load_config() -> EngineConfig {
    let Some(path) = paths::config_file() else {
        return EngineConfig::default();
    };
    if !path.exists() {
        debug!(path = %path.display(), "no configuration file, using defaults");
        return EngineConfig::default();
    }
    read_config(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring unreadable configuration");
        EngineConfig::default()
    })
}
