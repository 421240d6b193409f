//! Engine configuration.
pub mod paths;

use serde::{Deserialize, Serialize};

/// Settings a host applies when building an [`crate::Engine`].
///
/// Every field is optional in the JSON form; missing ones take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Extensions scripts may `require`. `None` enables every built-in one.
    pub extensions: Option<Vec<String>>,
    /// Whether a message nothing else disposed of is kept.
    pub implicit_keep: bool,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            extensions: None,
            implicit_keep: true,
            log_filter: "info".to_string(),
        }
    }
}
