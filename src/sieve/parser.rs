/// Recursive descent SIEVE parser.
///
/// Implements the generic RFC 5228 grammar only. Whether `fileinto` takes one
/// string or `size` wants a number is decided later by the engine handlers.
use crate::sieve::ast::{Argument, Command, Script, Test};
use crate::sieve::lexer::{tokenize, ParseError, Span, Token};

pub fn parse(input: &str) -> Result<Script, ParseError> {
    let spans = tokenize(input)?;
    let mut parser = Parser { spans: &spans, pos: 0 };
    let commands = parser.commands(false)?;
    Ok(Script { commands })
}

struct Parser<'a> {
    spans: &'a [Span],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.spans.get(self.pos).map(|s| &s.token)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.spans.get(self.pos) {
            Some(span) => ParseError::UnexpectedToken {
                found: format!("{:?}", span.token),
                expected,
                offset: span.offset,
            },
            None => ParseError::UnexpectedEnd(expected),
        }
    }

    fn identifier(&mut self, expected: &'static str) -> Result<String, ParseError> {
        match self.peek() {
            Some(Token::Identifier(name)) => {
                self.pos += 1;
                Ok(name.to_ascii_lowercase())
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn commands(&mut self, in_block: bool) -> Result<Vec<Command>, ParseError> {
        let mut commands = Vec::new();
        loop {
            match self.peek() {
                None if in_block => return Err(ParseError::UnexpectedEnd("'}'")),
                None => break,
                Some(Token::RBrace) if in_block => {
                    self.pos += 1;
                    break;
                }
                Some(_) => commands.push(self.command()?),
            }
        }
        Ok(commands)
    }

    fn command(&mut self) -> Result<Command, ParseError> {
        let name = self.identifier("command name")?;
        let arguments = self.arguments()?;

        let block = match self.peek() {
            Some(Token::Semicolon) => {
                self.pos += 1;
                None
            }
            Some(Token::LBrace) => {
                self.pos += 1;
                Some(self.commands(true)?)
            }
            _ => return Err(self.unexpected("';' or '{'")),
        };

        Ok(Command {
            name,
            arguments,
            block,
        })
    }

    /// `*argument [test / test-list]`
    fn arguments(&mut self) -> Result<Vec<Argument>, ParseError> {
        let mut arguments = Vec::new();

        loop {
            match self.peek() {
                Some(Token::Tag(tag)) => {
                    arguments.push(Argument::Tag(tag.clone()));
                    self.pos += 1;
                }
                Some(Token::QuotedString(s) | Token::MultiLineString(s)) => {
                    arguments.push(Argument::StringList(vec![s.clone()]));
                    self.pos += 1;
                }
                Some(Token::Number(n)) => {
                    arguments.push(Argument::Number(*n));
                    self.pos += 1;
                }
                Some(Token::LBracket) => {
                    self.pos += 1;
                    arguments.push(Argument::StringList(self.string_list()?));
                }
                _ => break,
            }
        }

        match self.peek() {
            Some(Token::Identifier(_)) => arguments.push(Argument::Test(self.test()?)),
            Some(Token::LParen) => {
                self.pos += 1;
                arguments.extend(self.test_list()?.into_iter().map(Argument::Test));
            }
            _ => {}
        }

        Ok(arguments)
    }

    fn test(&mut self) -> Result<Test, ParseError> {
        let name = self.identifier("test name")?;
        let arguments = self.arguments()?;
        Ok(Test { name, arguments })
    }

    /// Called after the opening `(`.
    fn test_list(&mut self) -> Result<Vec<Test>, ParseError> {
        let mut tests = vec![self.test()?];
        loop {
            match self.peek() {
                Some(Token::Comma) => {
                    self.pos += 1;
                    tests.push(self.test()?);
                }
                Some(Token::RParen) => {
                    self.pos += 1;
                    return Ok(tests);
                }
                _ => return Err(self.unexpected("',' or ')'")),
            }
        }
    }

    /// Called after the opening `[`.
    fn string_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                Some(Token::QuotedString(s) | Token::MultiLineString(s)) => {
                    items.push(s.clone());
                    self.pos += 1;
                }
                _ => return Err(self.unexpected("string")),
            }
            match self.peek() {
                Some(Token::Comma) => self.pos += 1,
                Some(Token::RBracket) => {
                    self.pos += 1;
                    return Ok(items);
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }
    }
}
