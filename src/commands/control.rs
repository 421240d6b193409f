/// `require`, the `if`/`elsif`/`else` chain and `stop`.
use crate::engine::{Arguments, CommandHandler, Context, Engine};
use crate::error::{Error, Result};
use crate::sieve::ast::{Argument, Command, Test};

pub struct Require;

impl Require {
    fn extensions<'a>(args: &Arguments<'a>) -> Result<&'a [String]> {
        args.validate_no_tags()?;
        match args.positional() {
            [Argument::StringList(names)] if !names.is_empty() => Ok(names.as_slice()),
            _ => Err(Error::syntax("require expects a list of extension names")),
        }
    }
}

impl CommandHandler for Require {
    fn is_prolog(&self) -> bool {
        true
    }

    fn validate(&self, engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        for name in Self::extensions(args)? {
            if !engine.supports_extension(name) {
                return Err(Error::UnsupportedExtension(name.clone()));
            }
        }
        Ok(())
    }

    fn apply(&self, ctx: &mut Context<'_>, args: &Arguments<'_>, _: Option<&[Command]>) -> Result<()> {
        for name in Self::extensions(args)? {
            ctx.state.declare(name);
        }
        Ok(())
    }
}

/// The one nested test of `if` and `elsif`.
fn condition<'a>(name: &str, args: &Arguments<'a>) -> Result<&'a Test> {
    let message = format!("{name} expects exactly one test");
    args.validate_no_tags()?;
    match args.tests(&message)?.as_slice() {
        [test] => Ok(*test),
        _ => Err(Error::Syntax(message)),
    }
}

/// Evaluates `test` and runs `block` if it holds. Records the outcome so a
/// following `elsif`/`else` knows whether a branch already ran.
fn branch(ctx: &mut Context<'_>, test: &Test, block: Option<&[Command]>) -> Result<()> {
    let fired = ctx.run_test(test)?;
    if fired {
        ctx.run_block(block.unwrap_or_default())?;
    }
    ctx.state.set_conditional(fired);
    Ok(())
}

pub struct If;

impl CommandHandler for If {
    fn takes_block(&self) -> bool {
        true
    }

    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        condition("if", args).map(|_| ())
    }

    fn apply(
        &self,
        ctx: &mut Context<'_>,
        args: &Arguments<'_>,
        block: Option<&[Command]>,
    ) -> Result<()> {
        let test = condition("if", args)?;
        branch(ctx, test, block)
    }
}

pub struct ElsIf;

impl CommandHandler for ElsIf {
    fn takes_block(&self) -> bool {
        true
    }

    fn continues_conditional(&self) -> bool {
        true
    }

    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        condition("elsif", args).map(|_| ())
    }

    fn apply(
        &self,
        ctx: &mut Context<'_>,
        args: &Arguments<'_>,
        block: Option<&[Command]>,
    ) -> Result<()> {
        let test = condition("elsif", args)?;
        match ctx.state.conditional() {
            None => Err(Error::syntax("elsif must follow if or elsif")),
            // an earlier branch ran; the test is not evaluated
            Some(true) => Ok(()),
            Some(false) => branch(ctx, test, block),
        }
    }
}

pub struct Else;

impl CommandHandler for Else {
    fn takes_block(&self) -> bool {
        true
    }

    fn continues_conditional(&self) -> bool {
        true
    }

    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        args.validate_empty("else takes no arguments")
    }

    fn apply(
        &self,
        ctx: &mut Context<'_>,
        _args: &Arguments<'_>,
        block: Option<&[Command]>,
    ) -> Result<()> {
        let fired = ctx
            .state
            .conditional()
            .ok_or_else(|| Error::syntax("else must follow if or elsif"))?;
        ctx.state.clear_conditional();
        if !fired {
            ctx.run_block(block.unwrap_or_default())?;
            // the block shares this state; its own chains end with it
            ctx.state.clear_conditional();
        }
        Ok(())
    }
}

pub struct Stop;

impl CommandHandler for Stop {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        args.validate_empty("stop takes no arguments")
    }

    fn apply(&self, ctx: &mut Context<'_>, _: &Arguments<'_>, _: Option<&[Command]>) -> Result<()> {
        ctx.state.stop();
        Ok(())
    }
}
