/// `body :contains <phrases>` over the text of a `text/*` message.
use crate::engine::{Arguments, Context, Engine, TestHandler};
use crate::error::{Error, Result};
use crate::sieve::ast::Argument;

pub struct Body;

impl Body {
    fn phrases<'a>(args: &Arguments<'a>) -> Result<&'a [String]> {
        match args.raw() {
            [Argument::Tag(tag), Argument::StringList(phrases)] if tag == ":contains" => {
                Ok(phrases.as_slice())
            }
            [Argument::Tag(tag), Argument::StringList(_)] => {
                Err(Error::Syntax(format!("body only supports :contains, not {tag}")))
            }
            _ => Err(Error::syntax("body expects :contains and a list of phrases")),
        }
    }
}

impl TestHandler for Body {
    fn validate(&self, _engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        Self::phrases(args).map(|_| ())
    }

    fn test(&self, ctx: &mut Context<'_>, args: &Arguments<'_>) -> Result<bool> {
        let phrases = Self::phrases(args)?;
        let content_type = ctx.mail.content_type();
        if !content_type.starts_with("text/") {
            return Err(Error::Domain(format!(
                "body test needs a text message, got {content_type}"
            )));
        }

        let body = ctx.mail.body_text().to_lowercase();
        Ok(phrases
            .iter()
            .any(|phrase| body.contains(&phrase.to_lowercase())))
    }
}
