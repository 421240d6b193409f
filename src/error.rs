/// Errors raised while validating or executing SIEVE commands and tests.
///
/// Every failure is terminal for the node being executed; the caller walking
/// the script decides whether evaluation as a whole is aborted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Syntax error: {0}")]
    Syntax(String),
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("Unknown test '{0}'")]
    UnknownTest(String),
    #[error("Unknown comparator '{0}'")]
    UnknownComparator(String),
    #[error("Extension '{0}' is not supported")]
    UnsupportedExtension(String),
    #[error("Extension '{0}' has not been declared with require")]
    NotDeclared(String),
    #[error("Comparator '{comparator}' does not support {operation}")]
    Capability {
        comparator: String,
        operation: &'static str,
    },
    #[error("Mail error: {0}")]
    Domain(String),
    #[error("State error: {0}")]
    State(String),
}

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Configuration,
    Capability,
    Domain,
    State,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::UnknownCommand(_)
            | Self::UnknownTest(_)
            | Self::UnknownComparator(_)
            | Self::UnsupportedExtension(_)
            | Self::NotDeclared(_) => ErrorKind::Configuration,
            Self::Capability { .. } => ErrorKind::Capability,
            Self::Domain(_) => ErrorKind::Domain,
            Self::State(_) => ErrorKind::State,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
