//! Comparators (RFC 4790) used by `:is`, `:contains` and `:matches`.
pub mod ascii_casemap;
pub mod ascii_numeric;
pub mod glob;
pub mod octet;

pub use ascii_casemap::AsciiCasemap;
pub use ascii_numeric::AsciiNumeric;
pub use octet::Octet;

use tracing::trace;

use crate::error::Result;
use crate::model::enums::MatchType;

/// Used when a test has no `:comparator` argument.
pub const DEFAULT_COMPARATOR: &str = AsciiCasemap::NAME;

/// A named string comparison strategy.
///
/// An implementation that cannot perform an operation returns
/// [`crate::Error::Capability`] instead of guessing.
pub trait Comparator: Send + Sync {
    fn equals(&self, a: &str, b: &str) -> Result<bool>;

    /// Whether `content` occurs somewhere in `container`.
    fn contains(&self, container: &str, content: &str) -> Result<bool>;

    /// Whether `text` matches the wildcard `pattern` (see [`glob`]).
    fn matches(&self, text: &str, pattern: &str) -> Result<bool>;
}

/// Runs the operation selected by `match_type` with `value` from the message
/// and `key` from the script.
pub fn compare(
    comparator: &dyn Comparator,
    match_type: MatchType,
    value: &str,
    key: &str,
) -> Result<bool> {
    let result = match match_type {
        MatchType::Is => comparator.equals(value, key),
        MatchType::Contains => comparator.contains(value, key),
        MatchType::Matches => comparator.matches(value, key),
    }?;
    trace!(%match_type, value, key, result, "compared");
    Ok(result)
}
