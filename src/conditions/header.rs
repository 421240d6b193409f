/// `exists` and `header`.
use crate::conditions::matching::MatchArguments;
use crate::engine::{Arguments, Context, Engine, TestHandler};
use crate::error::{Error, Result};
use crate::sieve::ast::Argument;

/// True when every named header is present.
pub struct Exists;

impl Exists {
    fn names<'a>(args: &Arguments<'a>) -> Result<&'a [String]> {
        args.validate_no_tags()?;
        match args.positional() {
            [Argument::StringList(names)] => Ok(names.as_slice()),
            _ => Err(Error::syntax("exists expects one list of header names")),
        }
    }
}

impl TestHandler for Exists {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        Self::names(args).map(|_| ())
    }

    fn test(&self, ctx: &mut Context<'_>, args: &Arguments<'_>) -> Result<bool> {
        Ok(Self::names(args)?
            .iter()
            .all(|name| !ctx.mail.matching_headers(name).is_empty()))
    }
}

pub struct Header;

impl TestHandler for Header {
    fn validate(&self, engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        MatchArguments::parse("header", args, false)?.check_comparator(engine)
    }

    fn test(&self, ctx: &mut Context<'_>, args: &Arguments<'_>) -> Result<bool> {
        let matching = MatchArguments::parse("header", args, false)?;
        let comparator = ctx.comparator(matching.comparator)?;
        for name in matching.names {
            let values = ctx.mail.matching_headers(name);
            if matching.any_value_matches(comparator, &values)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
