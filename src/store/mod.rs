//! Loading scripts, messages and configuration from disk.
pub mod config_store;
pub mod script_io;

use crate::sieve::lexer::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid script: {0}")]
    Parse(#[from] ParseError),
}
