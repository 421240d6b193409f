/// AST node types for SIEVE scripts (RFC 5228).
///
/// The tree is deliberately generic: every command and test is a name plus an
/// ordered argument list. Meaning is attached by the handlers registered with
/// the engine, not by the parser.

/// A complete SIEVE script is a list of commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    pub commands: Vec<Command>,
}

/// `identifier *argument [test / test-list] (";" / block)`
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub name: String,
    pub arguments: Vec<Argument>,
    /// `{ ... }` body, present for control commands such as `if`.
    pub block: Option<Vec<Command>>,
}

impl Command {
    pub fn new(name: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            arguments,
            block: None,
        }
    }
}

/// `identifier *argument [test / test-list]`
#[derive(Debug, Clone, PartialEq)]
pub struct Test {
    pub name: String,
    pub arguments: Vec<Argument>,
}

impl Test {
    pub fn new(name: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// `:tag`, stored lower-case including the leading colon.
    Tag(String),
    /// A string list. A lone quoted string is a one-element list.
    StringList(Vec<String>),
    /// A number with any `K`/`M`/`G` quantifier already applied.
    Number(u64),
    /// A nested test, either the single test of `not`/`if` or one member of a test-list.
    Test(Test),
}

impl Argument {
    pub fn tag(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.starts_with(':') {
            Self::Tag(name)
        } else {
            Self::Tag(format!(":{name}"))
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::StringList(vec![value.into()])
    }

    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StringList(values.into_iter().map(Into::into).collect())
    }

    /// Short human-readable kind, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Tag(_) => "tag",
            Self::StringList(_) => "string list",
            Self::Number(_) => "number",
            Self::Test(_) => "test",
        }
    }
}
