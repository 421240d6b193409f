use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sieve_engine::mail::Envelope;
use sieve_engine::store::{config_store, script_io};
use sieve_engine::Engine;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT"),
    ", built ",
    env!("BUILD_DATE"),
    ")"
);

/// Runs a SIEVE script against a message and prints the resulting actions.
#[derive(Parser)]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
struct Cli {
    /// SIEVE script to run
    script: PathBuf,

    /// RFC 5322 message file
    message: PathBuf,

    /// Envelope sender (MAIL FROM)
    #[arg(long)]
    from: Option<String>,

    /// Envelope recipient (RCPT TO), may be repeated
    #[arg(long)]
    to: Vec<String>,

    /// Configuration file instead of the per-user engine.json
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config_store::read_config(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => config_store::load_config(),
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!(?config, "configuration loaded");

    let script = script_io::load_script(&cli.script)
        .with_context(|| format!("failed to load {}", cli.script.display()))?;
    let mut message = script_io::load_message(&cli.message)
        .with_context(|| format!("failed to load {}", cli.message.display()))?;
    if cli.from.is_some() || !cli.to.is_empty() {
        message = message.with_envelope(Envelope {
            from: cli.from.clone(),
            to: cli.to.clone(),
        });
    }

    let engine = Engine::with_config(config);
    engine.validate(&script)?;
    engine.evaluate(&script, &mut message)?;

    let actions = message.take_actions();
    for action in &actions {
        debug!(%action, "action");
    }
    info!(count = actions.len(), "evaluation finished");
    println!("{}", serde_json::to_string_pretty(&actions)?);
    Ok(())
}
