use std::cmp::Ordering;

use crate::comparator::Comparator;
use crate::error::{Error, Result};

/// `i;ascii-numeric`: compares the leading decimal digits of each string as
/// an unbounded non-negative integer.
///
/// Leading zeros and anything after the first non-digit are ignored. A string
/// that does not start with a digit stands for positive infinity: equal to
/// every other such string and greater than any number. Substring and
/// wildcard matching are not defined for this comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiNumeric;

impl AsciiNumeric {
    pub const NAME: &'static str = "i;ascii-numeric";

    /// Total order consistent with [`Comparator::equals`].
    pub fn compare(a: &str, b: &str) -> Ordering {
        match (numeric_value(a), numeric_value(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        }
    }

    fn unsupported(operation: &'static str) -> Error {
        Error::Capability {
            comparator: Self::NAME.to_string(),
            operation,
        }
    }
}

/// Significant digits of the leading number, `""` for zero, `None` for infinity.
fn numeric_value(s: &str) -> Option<&str> {
    let end = s
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        None
    } else {
        Some(s[..end].trim_start_matches('0'))
    }
}

impl Comparator for AsciiNumeric {
    fn equals(&self, a: &str, b: &str) -> Result<bool> {
        Ok(Self::compare(a, b) == Ordering::Equal)
    }

    fn contains(&self, _container: &str, _content: &str) -> Result<bool> {
        Err(Self::unsupported("substring matching"))
    }

    fn matches(&self, _text: &str, _pattern: &str) -> Result<bool> {
        Err(Self::unsupported("wildcard matching"))
    }
}
