use serde::{Deserialize, Serialize};
use std::fmt;

/// A deferred delivery instruction. The host carries these out once the
/// script has finished; the engine only accumulates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    #[serde(rename = "fileinto")]
    FileInto { destination: String },
    Redirect { address: String },
    Reject { message: String },
    Vacation(Vacation),
    Keep,
}

impl Action {
    pub fn file_into(destination: impl Into<String>) -> Self {
        Self::FileInto {
            destination: destination.into(),
        }
    }

    pub fn redirect(address: impl Into<String>) -> Self {
        Self::Redirect {
            address: address.into(),
        }
    }

    pub fn reject(message: impl Into<String>) -> Self {
        Self::Reject {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::FileInto { .. } => ActionKind::FileInto,
            Self::Redirect { .. } => ActionKind::Redirect,
            Self::Reject { .. } => ActionKind::Reject,
            Self::Vacation(_) => ActionKind::Vacation,
            Self::Keep => ActionKind::Keep,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileInto { destination } => write!(f, "fileinto \"{destination}\""),
            Self::Redirect { address } => write!(f, "redirect \"{address}\""),
            Self::Reject { message } => write!(f, "reject \"{message}\""),
            Self::Vacation(v) => write!(f, "vacation :days {} \"{}\"", v.duration, v.reason),
            Self::Keep => f.write_str("keep"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    FileInto,
    Redirect,
    Reject,
    Vacation,
    Keep,
}

/// Auto-reply request (RFC 5230).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vacation {
    subject: Option<String>,
    from: Option<String>,
    addresses: Vec<String>,
    handle: Option<String>,
    reason: String,
    mime: bool,
    duration: u64,
}

impl Vacation {
    pub const DEFAULT_DURATION: u64 = 7;
    pub const MIN_DURATION: u64 = 1;

    pub fn builder() -> VacationBuilder {
        VacationBuilder::default()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn is_mime(&self) -> bool {
        self.mime
    }

    /// Days between replies to the same sender.
    pub fn duration(&self) -> u64 {
        self.duration
    }
}

#[derive(Debug, Clone, Default)]
pub struct VacationBuilder {
    subject: Option<String>,
    from: Option<String>,
    addresses: Vec<String>,
    handle: Option<String>,
    reason: String,
    mime: bool,
    duration: Option<u64>,
}

impl VacationBuilder {
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn addresses(mut self, addresses: Vec<String>) -> Self {
        self.addresses = addresses;
        self
    }

    pub fn handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn mime(mut self, mime: bool) -> Self {
        self.mime = mime;
        self
    }

    /// Values below one day are raised to one day.
    pub fn duration(mut self, days: u64) -> Self {
        self.duration = Some(days.max(Vacation::MIN_DURATION));
        self
    }

    pub fn build(self) -> Vacation {
        Vacation {
            subject: self.subject,
            from: self.from,
            addresses: self.addresses,
            handle: self.handle,
            reason: self.reason,
            mime: self.mime,
            duration: self.duration.unwrap_or(Vacation::DEFAULT_DURATION),
        }
    }
}
