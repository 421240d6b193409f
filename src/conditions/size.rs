/// `size :over <n>` / `size :under <n>`. Both bounds are strict.
use crate::engine::{Arguments, Context, Engine, TestHandler};
use crate::error::{Error, Result};
use crate::model::enums::SizeComparator;

pub struct Size;

impl Size {
    fn limit(args: &Arguments<'_>) -> Result<(SizeComparator, u64)> {
        const USAGE: &str = "size expects :over or :under followed by a number";
        args.validate_single_tags(&[])
            .and_then(|_| args.validate_tags_with_value(&[":over", ":under"]))
            .map_err(|_| Error::syntax(USAGE))?;
        if !args.positional().is_empty() {
            return Err(Error::syntax(USAGE));
        }

        let mut limit = None;
        for comparator in [SizeComparator::Over, SizeComparator::Under] {
            if let Some(n) = args.number_for_tag(comparator.as_sieve(), USAGE)? {
                if limit.replace((comparator, n)).is_some() {
                    return Err(Error::syntax(USAGE));
                }
            }
        }
        limit.ok_or_else(|| Error::syntax(USAGE))
    }
}

impl TestHandler for Size {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        Self::limit(args).map(|_| ())
    }

    fn test(&self, ctx: &mut Context<'_>, args: &Arguments<'_>) -> Result<bool> {
        let (comparator, limit) = Self::limit(args)?;
        Ok(comparator.holds(ctx.mail.size(), limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ExecutionState;
    use crate::error::ErrorKind;
    use crate::mail::Message;
    use crate::sieve::ast::Argument;

    fn evaluate(arguments: Vec<Argument>) -> Result<bool> {
        let raw = format!("Subject: x\r\n\r\n{}", "a".repeat(100));
        let mut mail = Message::parse(&raw);
        let mut state = ExecutionState::new();
        Engine::new().evaluate_test("size", &mut mail, &arguments, &mut state)
    }

    #[test]
    fn test_over_and_under() {
        assert!(evaluate(vec![Argument::tag("over"), Argument::Number(50)]).unwrap());
        assert!(!evaluate(vec![Argument::tag("over"), Argument::Number(1024)]).unwrap());
        assert!(evaluate(vec![Argument::tag("under"), Argument::Number(1024)]).unwrap());
        assert!(!evaluate(vec![Argument::tag("under"), Argument::Number(50)]).unwrap());
    }

    #[test]
    fn test_bounds_are_strict() {
        // 14 header bytes + 100 body bytes
        assert!(!evaluate(vec![Argument::tag("over"), Argument::Number(114)]).unwrap());
        assert!(!evaluate(vec![Argument::tag("under"), Argument::Number(114)]).unwrap());
    }

    #[test]
    fn test_wrong_shapes() {
        for arguments in [
            vec![],
            vec![Argument::Number(10)],
            vec![Argument::tag("over")],
            vec![Argument::tag("over"), Argument::string("10")],
            vec![Argument::tag("above"), Argument::Number(10)],
            vec![
                Argument::tag("over"),
                Argument::Number(10),
                Argument::tag("under"),
                Argument::Number(20),
            ],
        ] {
            let err = evaluate(arguments).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Syntax);
        }
    }
}
