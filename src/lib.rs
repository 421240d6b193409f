//! Execution engine for SIEVE mail filtering scripts (RFC 5228).
//!
//! A script is parsed with [`sieve::parse`] and run against a message with
//! [`Engine::evaluate`]. The engine appends the resulting [`Action`]s to the
//! message through the host's [`MailAdapter`]; it never delivers anything
//! itself.
pub mod commands;
pub mod comparator;
pub mod conditions;
pub mod config;
pub mod engine;
pub mod error;
pub mod mail;
pub mod model;
pub mod sieve;
pub mod store;

pub use config::EngineConfig;
pub use engine::{Engine, ExecutionState};
pub use error::{Error, ErrorKind, Result};
pub use mail::{Envelope, MailAdapter, Message};
pub use model::action::{Action, Vacation};
