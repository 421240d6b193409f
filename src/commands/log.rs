/// The `log` command: writes a message from the script to the host's log.
use tracing::{debug, error, info, trace, warn};

use crate::engine::{Arguments, CommandHandler, Context, Engine};
use crate::error::{Error, Result};
use crate::model::enums::LogLevel;
use crate::sieve::ast::{Argument, Command};

pub struct Log;

impl Log {
    /// Reads `[:level] "message"` in order. The classifier would bind the
    /// level tag to the message, so the raw arguments are used.
    fn parse<'a>(args: &Arguments<'a>) -> Result<(LogLevel, &'a str)> {
        let mut level = None;
        let mut message = None;

        for argument in args.raw() {
            match argument {
                Argument::Tag(tag) if level.is_none() && message.is_none() => {
                    let parsed = LogLevel::from_sieve(tag)
                        .ok_or_else(|| Error::Syntax(format!("Unknown log level {tag}")))?;
                    level = Some(parsed);
                }
                Argument::StringList(list) if message.is_none() => match list.as_slice() {
                    [single] => message = Some(single.as_str()),
                    _ => return Err(Error::syntax("log expects a single message string")),
                },
                other => {
                    return Err(Error::Syntax(format!(
                        "Unexpected {} in log",
                        other.describe()
                    )))
                }
            }
        }

        let message = message.ok_or_else(|| Error::syntax("log expects a message"))?;
        Ok((level.unwrap_or_default(), message))
    }
}

impl CommandHandler for Log {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        Self::parse(args).map(|_| ())
    }

    fn apply(&self, _ctx: &mut Context<'_>, args: &Arguments<'_>, _: Option<&[Command]>) -> Result<()> {
        let (level, message) = Self::parse(args)?;
        match level {
            LogLevel::Fatal | LogLevel::Error => error!(target: "sieve", "{message}"),
            LogLevel::Warn => warn!(target: "sieve", "{message}"),
            LogLevel::Info => info!(target: "sieve", "{message}"),
            LogLevel::Debug => debug!(target: "sieve", "{message}"),
            LogLevel::Trace => trace!(target: "sieve", "{message}"),
        }
        Ok(())
    }
}
