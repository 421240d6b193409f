/// Commands that decide where the message goes.
///
/// Each of them cancels the implicit keep, but only once its action has
/// been accepted: a command that fails leaves the state untouched.
use crate::engine::{Arguments, CommandHandler, Context, Engine};
use crate::error::Result;
use crate::model::action::Action;
use crate::sieve::ast::Command;

/// Validation shared by the commands taking exactly one string.
fn single_string<'a>(args: &Arguments<'a>, message: &str) -> Result<&'a str> {
    args.validate_no_tags()?;
    args.required_single_string(message)
}

fn queue(ctx: &mut Context<'_>, action: Action) -> Result<()> {
    ctx.queue_action(action)?;
    ctx.state.cancel_implicit_keep();
    Ok(())
}

pub struct Keep;

impl CommandHandler for Keep {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        args.validate_empty("keep takes no arguments")
    }

    fn apply(&self, ctx: &mut Context<'_>, _: &Arguments<'_>, _: Option<&[Command]>) -> Result<()> {
        queue(ctx, Action::Keep)
    }
}

/// Cancels the implicit keep without queuing anything.
pub struct Discard;

impl CommandHandler for Discard {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        args.validate_empty("discard takes no arguments")
    }

    fn apply(&self, ctx: &mut Context<'_>, _: &Arguments<'_>, _: Option<&[Command]>) -> Result<()> {
        ctx.state.cancel_implicit_keep();
        Ok(())
    }
}

pub struct Redirect;

impl Redirect {
    const USAGE: &'static str = "redirect expects exactly one address";
}

impl CommandHandler for Redirect {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        single_string(args, Self::USAGE).map(|_| ())
    }

    fn apply(&self, ctx: &mut Context<'_>, args: &Arguments<'_>, _: Option<&[Command]>) -> Result<()> {
        let address = single_string(args, Self::USAGE)?;
        queue(ctx, Action::redirect(address))
    }
}

/// Files the message into a mailbox. Filing into the same mailbox twice
/// queues one action.
pub struct FileInto;

impl FileInto {
    const USAGE: &'static str = "fileinto expects exactly one mailbox name";
}

impl CommandHandler for FileInto {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        single_string(args, Self::USAGE).map(|_| ())
    }

    fn apply(&self, ctx: &mut Context<'_>, args: &Arguments<'_>, _: Option<&[Command]>) -> Result<()> {
        let destination = single_string(args, Self::USAGE)?;
        queue(ctx, Action::file_into(destination))
    }
}

/// Refuses delivery. Cannot be combined with any other action.
pub struct Reject;

impl Reject {
    const USAGE: &'static str = "reject expects exactly one reason";
}

impl CommandHandler for Reject {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        single_string(args, Self::USAGE).map(|_| ())
    }

    fn apply(&self, ctx: &mut Context<'_>, args: &Arguments<'_>, _: Option<&[Command]>) -> Result<()> {
        let message = single_string(args, Self::USAGE)?;
        queue(ctx, Action::reject(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ExecutionState;
    use crate::error::{Error, ErrorKind};
    use crate::mail::{MailAdapter, Message};
    use crate::sieve::ast::Argument;
    use crate::sieve::parser::parse;
    use pretty_assertions::assert_eq;

    fn declared(extensions: &[&str]) -> ExecutionState {
        let mut state = ExecutionState::new();
        for extension in extensions {
            state.declare(extension);
        }
        state
    }

    #[test]
    fn test_fileinto_twice_queues_once() {
        let engine = Engine::new();
        let mut mail = Message::new();
        let mut state = declared(&["fileinto"]);
        let args = [Argument::string("X")];
        engine.execute_command("fileinto", &mut mail, &args, &mut state).unwrap();
        engine.execute_command("fileinto", &mut mail, &args, &mut state).unwrap();
        assert_eq!(mail.actions(), &[Action::file_into("X")]);
        assert!(!state.is_implicit_keep());
    }

    #[test]
    fn test_reject_alone() {
        let engine = Engine::new();
        let mut mail = Message::new();
        let mut state = declared(&["reject"]);
        engine
            .execute_command("reject", &mut mail, &[Argument::string("no thanks")], &mut state)
            .unwrap();
        assert_eq!(mail.actions(), &[Action::reject("no thanks")]);
    }

    #[test]
    fn test_reject_after_keep_fails_without_side_effects() {
        let engine = Engine::new();
        let mut mail = Message::new();
        let mut state = declared(&["reject", "fileinto"]);
        engine.execute_command("keep", &mut mail, &[], &mut state).unwrap();
        let err = engine
            .execute_command("reject", &mut mail, &[Argument::string("no")], &mut state)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(mail.actions(), &[Action::Keep]);
    }

    #[test]
    fn test_fileinto_after_reject_fails() {
        let engine = Engine::new();
        let mut mail = Message::new();
        let mut state = declared(&["reject", "fileinto"]);
        engine
            .execute_command("reject", &mut mail, &[Argument::string("no")], &mut state)
            .unwrap();
        let err = engine
            .execute_command("fileinto", &mut mail, &[Argument::string("Junk")], &mut state)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(mail.actions().len(), 1);
    }

    #[test]
    fn test_failed_validation_keeps_implicit_keep() {
        let engine = Engine::new();
        let mut mail = Message::new();
        let mut state = ExecutionState::new();
        let err = engine
            .execute_command(
                "redirect",
                &mut mail,
                &[Argument::strings(["a@example.org", "b@example.org"])],
                &mut state,
            )
            .unwrap_err();
        assert_eq!(err, Error::syntax(Redirect::USAGE));
        assert!(state.is_implicit_keep());
        assert!(mail.actions().is_empty());
    }

    #[test]
    fn test_unexpected_tag() {
        let engine = Engine::new();
        let err = engine
            .validate_command("redirect", &[Argument::tag("copy"), Argument::string("a@x.org")])
            .unwrap_err();
        assert_eq!(err, Error::Syntax("Unexpected tag(s): :copy".to_string()));
    }

    #[test]
    fn test_keep_rejects_arguments() {
        let engine = Engine::new();
        let err = engine
            .validate_command("keep", &[Argument::string("INBOX")])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_discard_cancels_implicit_keep() {
        let script = parse("discard;").unwrap();
        let mut mail = Message::new();
        Engine::new().evaluate(&script, &mut mail).unwrap();
        assert!(mail.actions().is_empty());
    }

    #[test]
    fn test_script_with_reject_and_fileinto() {
        let script = parse(r#"
            require ["reject", "fileinto"];
            fileinto "Spam";
            reject "go away";
        "#)
        .unwrap();
        let mut mail = Message::new();
        let err = Engine::new().evaluate(&script, &mut mail).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(mail.actions(), &[Action::file_into("Spam")]);
    }
}
