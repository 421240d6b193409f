//! The SIEVE execution engine.
//!
//! [`Engine`] owns three registries (commands, tests, comparators) and is
//! read-only once built, so one instance can serve concurrent evaluations.
//! Each evaluation brings its own [`ExecutionState`].
pub mod address;
pub mod arguments;
pub mod registry;
pub mod state;

use tracing::debug;

use crate::comparator::{AsciiCasemap, AsciiNumeric, Comparator, Octet};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::mail::MailAdapter;
use crate::model::action::Action;
use crate::sieve::ast::{Argument, Command, Script, Test};
use crate::{commands, conditions};

pub use arguments::Arguments;
pub use registry::Registry;
pub use state::ExecutionState;

/// A script command such as `fileinto` or `if`.
///
/// `execute` validates before applying, so a handler whose arguments are
/// malformed never touches the state or the action list.
pub trait CommandHandler: Send + Sync {
    /// Whether the command is followed by a `{ ... }` block instead of `;`.
    fn takes_block(&self) -> bool {
        false
    }

    /// Commands that must precede all others (`require`).
    fn is_prolog(&self) -> bool {
        false
    }

    /// `elsif` and `else`, which continue the preceding `if`.
    fn continues_conditional(&self) -> bool {
        false
    }

    fn validate(&self, engine: &Engine, args: &Arguments<'_>) -> Result<()>;

    fn apply(
        &self,
        ctx: &mut Context<'_>,
        args: &Arguments<'_>,
        block: Option<&[Command]>,
    ) -> Result<()>;

    fn execute(
        &self,
        ctx: &mut Context<'_>,
        args: &Arguments<'_>,
        block: Option<&[Command]>,
    ) -> Result<()> {
        self.validate(ctx.engine, args)?;
        self.apply(ctx, args, block)
    }
}

/// A script test such as `header` or `not`.
pub trait TestHandler: Send + Sync {
    fn validate(&self, engine: &Engine, args: &Arguments<'_>) -> Result<()>;

    fn test(&self, ctx: &mut Context<'_>, args: &Arguments<'_>) -> Result<bool>;

    fn evaluate(&self, ctx: &mut Context<'_>, args: &Arguments<'_>) -> Result<bool> {
        self.validate(ctx.engine, args)?;
        self.test(ctx, args)
    }
}

/// What a handler sees while executing: the engine, the message and the
/// state of the current evaluation.
pub struct Context<'a> {
    pub engine: &'a Engine,
    pub mail: &'a mut dyn MailAdapter,
    pub state: &'a mut ExecutionState,
}

impl<'a> Context<'a> {
    pub fn new(
        engine: &'a Engine,
        mail: &'a mut dyn MailAdapter,
        state: &'a mut ExecutionState,
    ) -> Self {
        Self {
            engine,
            mail,
            state,
        }
    }

    /// Runs commands in order until the block ends or `stop` is executed.
    pub fn run_block(&mut self, block: &[Command]) -> Result<()> {
        for command in block {
            if self.state.is_stopped() {
                break;
            }
            self.run_command(command)?;
        }
        Ok(())
    }

    pub fn run_command(&mut self, command: &Command) -> Result<()> {
        self.dispatch_command(&command.name, &command.arguments, command.block.as_deref())
    }

    pub fn run_test(&mut self, test: &Test) -> Result<bool> {
        self.dispatch_test(&test.name, &test.arguments)
    }

    fn dispatch_command(
        &mut self,
        name: &str,
        arguments: &[Argument],
        block: Option<&[Command]>,
    ) -> Result<()> {
        let engine = self.engine;
        let handler = engine.commands.resolve(name, self.state)?;
        debug!(command = name, "executing");

        check_block(name, handler, block.is_some())?;

        if handler.is_prolog() {
            if !self.state.in_prolog() {
                return Err(Error::Syntax(format!(
                    "{name} must come before any other command"
                )));
            }
        } else {
            self.state.end_prolog();
        }
        if !handler.continues_conditional() {
            self.state.clear_conditional();
        }

        let args = Arguments::classify(arguments);
        handler.execute(self, &args, block)
    }

    fn dispatch_test(&mut self, name: &str, arguments: &[Argument]) -> Result<bool> {
        let engine = self.engine;
        let handler = engine.tests.resolve(name, self.state)?;
        let args = Arguments::classify(arguments);
        let result = handler.evaluate(self, &args)?;
        debug!(test = name, result, "evaluated");
        Ok(result)
    }

    /// Resolves a comparator named in the script, enforcing its `require`.
    pub fn comparator(&self, name: &str) -> Result<&'a dyn Comparator> {
        let engine = self.engine;
        engine.comparators.resolve(name, self.state)
    }

    /// Queues an action after checking the exclusivity rules.
    pub fn queue_action(&mut self, action: Action) -> Result<bool> {
        self.state.begin_action(action.kind())?;
        Ok(self.state.record_action(&mut *self.mail, action))
    }
}

fn check_block(name: &str, handler: &dyn CommandHandler, has_block: bool) -> Result<()> {
    match (handler.takes_block(), has_block) {
        (true, false) => Err(Error::Syntax(format!("{name} requires a block"))),
        (false, true) => Err(Error::Syntax(format!("{name} does not take a block"))),
        _ => Ok(()),
    }
}

pub struct Engine {
    commands: Registry<dyn CommandHandler>,
    tests: Registry<dyn TestHandler>,
    comparators: Registry<dyn Comparator>,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with every built-in command, test and comparator.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// An engine with the built-ins, minus any extension `config` does not enable.
    pub fn with_config(config: EngineConfig) -> Self {
        let mut engine = Self::empty(config);
        commands::register_builtins(&mut engine);
        conditions::register_builtins(&mut engine);
        engine.register_comparator(AsciiCasemap::NAME, AsciiCasemap);
        engine.register_comparator(Octet::NAME, Octet);
        engine.register_comparator_extension(
            AsciiNumeric::NAME,
            "comparator-i;ascii-numeric",
            AsciiNumeric,
        );

        if let Some(enabled) = engine.config.extensions.clone() {
            let allowed = |ext: &str| enabled.iter().any(|e| e.eq_ignore_ascii_case(ext));
            engine.commands.retain_extensions(allowed);
            engine.tests.retain_extensions(allowed);
            engine.comparators.retain_extensions(allowed);
        }
        engine
    }

    /// An engine with no handlers at all, for hosts assembling their own set.
    pub fn empty(config: EngineConfig) -> Self {
        Self {
            commands: Registry::new(Error::UnknownCommand),
            tests: Registry::new(Error::UnknownTest),
            comparators: Registry::new(Error::UnknownComparator),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn register_command(&mut self, name: &str, handler: impl CommandHandler + 'static) {
        self.commands.register(name, Box::new(handler));
    }

    pub fn register_command_extension(
        &mut self,
        name: &str,
        extension: &str,
        handler: impl CommandHandler + 'static,
    ) {
        self.commands
            .register_extension(name, extension, Box::new(handler));
    }

    pub fn register_test(&mut self, name: &str, handler: impl TestHandler + 'static) {
        self.tests.register(name, Box::new(handler));
    }

    pub fn register_test_extension(
        &mut self,
        name: &str,
        extension: &str,
        handler: impl TestHandler + 'static,
    ) {
        self.tests.register_extension(name, extension, Box::new(handler));
    }

    pub fn register_comparator(&mut self, name: &str, comparator: impl Comparator + 'static) {
        self.comparators.register(name, Box::new(comparator));
    }

    pub fn register_comparator_extension(
        &mut self,
        name: &str,
        extension: &str,
        comparator: impl Comparator + 'static,
    ) {
        self.comparators
            .register_extension(name, extension, Box::new(comparator));
    }

    /// Whether `require` accepts `extension`.
    pub fn supports_extension(&self, extension: &str) -> bool {
        self.commands
            .extensions()
            .chain(self.tests.extensions())
            .chain(self.comparators.extensions())
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Comparator lookup at validation time: the name must exist, whether or
    /// not it has been declared yet.
    pub fn comparator(&self, name: &str) -> Result<&dyn Comparator> {
        self.comparators.get(name)
    }

    pub fn validate_command(&self, name: &str, arguments: &[Argument]) -> Result<()> {
        self.commands
            .get(name)?
            .validate(self, &Arguments::classify(arguments))
    }

    pub fn validate_test(&self, name: &str, arguments: &[Argument]) -> Result<()> {
        self.tests
            .get(name)?
            .validate(self, &Arguments::classify(arguments))
    }

    /// Validates every command and nested test of `script` without running it.
    pub fn validate(&self, script: &Script) -> Result<()> {
        self.validate_block(&script.commands)
    }

    fn validate_block(&self, block: &[Command]) -> Result<()> {
        for command in block {
            check_block(
                &command.name,
                self.commands.get(&command.name)?,
                command.block.is_some(),
            )?;
            self.validate_command(&command.name, &command.arguments)?;
            self.validate_nested(&command.arguments)?;
            if let Some(inner) = &command.block {
                self.validate_block(inner)?;
            }
        }
        Ok(())
    }

    fn validate_nested(&self, arguments: &[Argument]) -> Result<()> {
        for argument in arguments {
            if let Argument::Test(test) = argument {
                self.validate_test(&test.name, &test.arguments)?;
                self.validate_nested(&test.arguments)?;
            }
        }
        Ok(())
    }

    /// Executes a single command against `mail` with the caller's state.
    pub fn execute_command(
        &self,
        name: &str,
        mail: &mut dyn MailAdapter,
        arguments: &[Argument],
        state: &mut ExecutionState,
    ) -> Result<()> {
        Context::new(self, mail, state).dispatch_command(name, arguments, None)
    }

    /// Evaluates a single test against `mail` with the caller's state.
    pub fn evaluate_test(
        &self,
        name: &str,
        mail: &mut dyn MailAdapter,
        arguments: &[Argument],
        state: &mut ExecutionState,
    ) -> Result<bool> {
        Context::new(self, mail, state).dispatch_test(name, arguments)
    }

    /// Runs a whole script against `mail`, leaving the resulting actions in
    /// the message's action list. Adds the implicit `keep` when nothing
    /// cancelled it.
    pub fn evaluate(&self, script: &Script, mail: &mut dyn MailAdapter) -> Result<()> {
        let mut state = ExecutionState::new();
        Context::new(self, mail, &mut state).run_block(&script.commands)?;

        if self.config.implicit_keep && state.is_implicit_keep() {
            debug!("implicit keep");
            state.record_action(mail, Action::Keep);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::Message;
    use crate::sieve::parser::parse;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;

    const SCRIPT: &str = r#"
        require ["fileinto", "reject"];
        if header :contains "Subject" "offer" {
            fileinto "Spam";
            stop;
        }
        if address :domain :is "From" "example.org" {
            fileinto "Work";
        }
    "#;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_shareable() {
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_evaluate_with_implicit_keep() {
        let script = parse(SCRIPT).unwrap();
        let mut mail = Message::new()
            .with_header("From", "someone@elsewhere.net")
            .with_header("Subject", "Lunch");
        Engine::new().evaluate(&script, &mut mail).unwrap();
        assert_eq!(mail.actions(), &[Action::Keep]);
    }

    #[test]
    fn test_evaluate_files_and_stops() {
        let script = parse(SCRIPT).unwrap();
        let mut mail = Message::new()
            .with_header("From", "boss@example.org")
            .with_header("Subject", "Special offer");
        Engine::new().evaluate(&script, &mut mail).unwrap();
        assert_eq!(mail.actions(), &[Action::file_into("Spam")]);
    }

    #[test]
    fn test_each_evaluation_starts_fresh() {
        let engine = Engine::new();
        let script = parse(SCRIPT).unwrap();
        for _ in 0..2 {
            let mut mail = Message::new().with_header("From", "boss@example.org");
            engine.evaluate(&script, &mut mail).unwrap();
            assert_eq!(mail.actions(), &[Action::file_into("Work")]);
        }
    }

    #[test]
    fn test_concurrent_evaluations() {
        let engine = Arc::new(Engine::new());
        let script = Arc::new(parse(SCRIPT).unwrap());
        let handles: Vec<_> = ["boss@example.org", "friend@elsewhere.net"]
            .into_iter()
            .map(|from| {
                let engine = Arc::clone(&engine);
                let script = Arc::clone(&script);
                thread::spawn(move || {
                    let mut mail = Message::new().with_header("From", from);
                    engine.evaluate(&script, &mut mail).unwrap();
                    mail.take_actions()
                })
            })
            .collect();
        let results: Vec<Vec<Action>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(
            results,
            vec![vec![Action::file_into("Work")], vec![Action::Keep]]
        );
    }

    #[test]
    fn test_validate_walks_blocks_and_nested_tests() {
        let engine = Engine::new();
        assert!(engine.validate(&parse(SCRIPT).unwrap()).is_ok());

        let script = parse("if true { frobnicate; }").unwrap();
        assert_eq!(
            engine.validate(&script).unwrap_err(),
            Error::UnknownCommand("frobnicate".to_string())
        );

        let script = parse("if anyof (true, bogus) { keep; }").unwrap();
        assert_eq!(
            engine.validate(&script).unwrap_err(),
            Error::UnknownTest("bogus".to_string())
        );

        let script = parse("keep { stop; }").unwrap();
        assert_eq!(
            engine.validate(&script).unwrap_err(),
            Error::syntax("keep does not take a block")
        );
    }

    #[test]
    fn test_custom_command_registration() {
        struct Flag;

        impl CommandHandler for Flag {
            fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
                args.validate_empty("flag takes no arguments")
            }

            fn apply(
                &self,
                ctx: &mut Context<'_>,
                _args: &Arguments<'_>,
                _block: Option<&[Command]>,
            ) -> Result<()> {
                ctx.queue_action(Action::file_into("Flagged"))?;
                Ok(())
            }
        }

        let mut engine = Engine::new();
        engine.register_command_extension("flag", "x-flag", Flag);
        assert!(engine.supports_extension("x-flag"));

        let mut mail = Message::new();
        engine
            .evaluate(&parse(r#"require "x-flag"; flag;"#).unwrap(), &mut mail)
            .unwrap();
        assert_eq!(
            mail.actions(),
            &[Action::file_into("Flagged"), Action::Keep]
        );
    }

    #[test]
    fn test_execute_command_uses_callers_state() {
        let engine = Engine::new();
        let mut mail = Message::new();
        let mut state = ExecutionState::new();
        engine
            .execute_command("require", &mut mail, &[Argument::string("fileinto")], &mut state)
            .unwrap();
        assert!(state.is_declared("fileinto"));
        engine
            .execute_command("fileinto", &mut mail, &[Argument::string("A")], &mut state)
            .unwrap();
        assert!(!state.is_implicit_keep());
    }
}
