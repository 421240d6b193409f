/// The `vacation` auto-reply command (RFC 5230).
use crate::engine::{Arguments, CommandHandler, Context, Engine};
use crate::error::{Error, Result};
use crate::model::action::{Action, Vacation};
use crate::sieve::ast::{Argument, Command};

const VALUE_TAGS: [&str; 6] = [":days", ":subject", ":from", ":addresses", ":handle", ":mime"];

pub struct VacationCommand;

impl VacationCommand {
    fn build(args: &Arguments<'_>) -> Result<Vacation> {
        args.validate_single_tags(&[":mime"])?;
        args.validate_tags_with_value(&VALUE_TAGS)?;
        let (reason, mime) = Self::reason(args)?;

        let mut builder = Vacation::builder().reason(reason).mime(mime);
        if let Some(days) = args.number_for_tag(":days", "vacation :days expects a number")? {
            builder = builder.duration(days);
        }
        if let Some(subject) = args.string_for_tag(":subject", "vacation :subject expects a string")? {
            builder = builder.subject(subject);
        }
        if let Some(from) = args.string_for_tag(":from", "vacation :from expects a string")? {
            builder = builder.from(from);
        }
        if let Some(addresses) =
            args.string_list_for_tag(":addresses", "vacation :addresses expects a string list")?
        {
            builder = builder.addresses(addresses.to_vec());
        }
        if let Some(handle) = args.string_for_tag(":handle", "vacation :handle expects a string")? {
            builder = builder.handle(handle);
        }
        Ok(builder.build())
    }

    /// The reason string and whether `:mime` was given.
    ///
    /// `:mime` has no value, but written right before the reason it classifies
    /// as a tag bound to it.
    fn reason<'a>(args: &Arguments<'a>) -> Result<(&'a str, bool)> {
        const USAGE: &str = "vacation expects exactly one reason string";
        let bound = args
            .tags_with_value()
            .find(|(tag, _)| *tag == ":mime")
            .map(|(_, value)| value);

        match bound {
            None => Ok((args.required_single_string(USAGE)?, args.has_single_tag(":mime"))),
            Some(Argument::StringList(reason)) if args.positional().is_empty() => {
                match reason.as_slice() {
                    [reason] => Ok((reason.as_str(), true)),
                    _ => Err(Error::syntax(USAGE)),
                }
            }
            Some(_) => Err(Error::syntax(":mime takes no value")),
        }
    }
}

impl CommandHandler for VacationCommand {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        Self::build(args).map(|_| ())
    }

    fn apply(&self, ctx: &mut Context<'_>, args: &Arguments<'_>, _: Option<&[Command]>) -> Result<()> {
        let vacation = Self::build(args)?;
        ctx.queue_action(Action::Vacation(vacation))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ExecutionState;
    use crate::error::ErrorKind;
    use crate::mail::{MailAdapter, Message};
    use crate::sieve::parser::parse;
    use pretty_assertions::assert_eq;

    fn vacation(source: &str) -> Result<Vec<Action>> {
        let script = parse(&format!("require \"vacation\";\n{source}")).unwrap();
        let mut mail = Message::new();
        Engine::new().evaluate(&script, &mut mail)?;
        Ok(mail.take_actions())
    }

    #[test]
    fn test_defaults() {
        let actions = vacation(r#"vacation "Out of office";"#).unwrap();
        let expected = Vacation::builder().reason("Out of office").build();
        assert_eq!(expected.duration(), Vacation::DEFAULT_DURATION);
        // vacation leaves the implicit keep in place
        assert_eq!(actions, vec![Action::Vacation(expected), Action::Keep]);
    }

    #[test]
    fn test_all_tags() {
        let actions = vacation(
            r#"vacation :days 3 :subject "Away" :from "me@example.org"
                :addresses ["me@example.org", "alias@example.org"]
                :handle "summer" :mime "Away for the summer";"#,
        )
        .unwrap();
        let expected = Vacation::builder()
            .duration(3)
            .subject("Away")
            .from("me@example.org")
            .addresses(vec![
                "me@example.org".to_string(),
                "alias@example.org".to_string(),
            ])
            .handle("summer")
            .mime(true)
            .reason("Away for the summer")
            .build();
        assert_eq!(actions[0], Action::Vacation(expected));
    }

    #[test]
    fn test_mime_before_other_tags() {
        let actions = vacation(r#"vacation :mime :days 2 "Away";"#).unwrap();
        match &actions[0] {
            Action::Vacation(v) => {
                assert!(v.is_mime());
                assert_eq!(v.duration(), 2);
                assert_eq!(v.reason(), "Away");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_zero_days_is_raised_to_one() {
        let actions = vacation(r#"vacation :days 0 "Away";"#).unwrap();
        match &actions[0] {
            Action::Vacation(v) => assert_eq!(v.duration(), Vacation::MIN_DURATION),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_missing_reason() {
        let err = vacation(r#"vacation :days 3;"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_days_must_be_number() {
        let err = vacation(r#"vacation :days "three" "Away";"#).unwrap_err();
        assert_eq!(err, Error::syntax("vacation :days expects a number"));
    }

    #[test]
    fn test_unknown_tag() {
        let engine = Engine::new();
        let err = engine
            .validate_command(
                "vacation",
                &[Argument::tag("seconds"), Argument::Number(5), Argument::string("Away")],
            )
            .unwrap_err();
        assert_eq!(err, Error::Syntax("Unexpected tag(s): :seconds".to_string()));
    }

    #[test]
    fn test_not_allowed_with_reject() {
        let engine = Engine::new();
        let mut mail = Message::new();
        let mut state = ExecutionState::new();
        state.declare("vacation");
        state.declare("reject");
        engine
            .execute_command("reject", &mut mail, &[Argument::string("no")], &mut state)
            .unwrap();
        let err = engine
            .execute_command("vacation", &mut mail, &[Argument::string("Away")], &mut state)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(mail.actions().len(), 1);
    }
}
