/// `true`, `false`, `not`, `allof` and `anyof`.
use crate::engine::{Arguments, Context, Engine, TestHandler};
use crate::error::{Error, Result};
use crate::sieve::ast::Test;

pub struct True;

impl TestHandler for True {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        args.validate_empty("true takes no arguments")
    }

    fn test(&self, _ctx: &mut Context<'_>, _args: &Arguments<'_>) -> Result<bool> {
        Ok(true)
    }
}

pub struct False;

impl TestHandler for False {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        args.validate_empty("false takes no arguments")
    }

    fn test(&self, _ctx: &mut Context<'_>, _args: &Arguments<'_>) -> Result<bool> {
        Ok(false)
    }
}

pub struct Not;

impl Not {
    fn inner<'a>(args: &Arguments<'a>) -> Result<&'a Test> {
        const USAGE: &str = "not expects exactly one test";
        args.validate_no_tags()?;
        match args.tests(USAGE)?.as_slice() {
            [test] => Ok(*test),
            _ => Err(Error::syntax(USAGE)),
        }
    }
}

impl TestHandler for Not {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        Self::inner(args).map(|_| ())
    }

    fn test(&self, ctx: &mut Context<'_>, args: &Arguments<'_>) -> Result<bool> {
        let inner = Self::inner(args)?;
        Ok(!ctx.run_test(inner)?)
    }
}

/// Tests of `allof`/`anyof`: a non-empty test list.
fn test_list<'a>(name: &str, args: &Arguments<'a>) -> Result<Vec<&'a Test>> {
    let message = format!("{name} expects a list of tests");
    args.validate_no_tags()?;
    let tests = args.tests(&message)?;
    if tests.is_empty() {
        return Err(Error::Syntax(message));
    }
    Ok(tests)
}

/// True when every test holds. Stops at the first false one.
pub struct AllOf;

impl TestHandler for AllOf {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        test_list("allof", args).map(|_| ())
    }

    fn test(&self, ctx: &mut Context<'_>, args: &Arguments<'_>) -> Result<bool> {
        for test in test_list("allof", args)? {
            if !ctx.run_test(test)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// True when any test holds. Stops at the first true one.
pub struct AnyOf;

impl TestHandler for AnyOf {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        test_list("anyof", args).map(|_| ())
    }

    fn test(&self, ctx: &mut Context<'_>, args: &Arguments<'_>) -> Result<bool> {
        for test in test_list("anyof", args)? {
            if ctx.run_test(test)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
