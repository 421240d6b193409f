use crate::comparator::{glob, Comparator};
use crate::error::Result;

/// `i;ascii-casemap`: ASCII letters compare case-insensitively, everything
/// else byte-for-byte. Independent of locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiCasemap;

impl AsciiCasemap {
    pub const NAME: &'static str = "i;ascii-casemap";
}

impl Comparator for AsciiCasemap {
    fn equals(&self, a: &str, b: &str) -> Result<bool> {
        Ok(a.eq_ignore_ascii_case(b))
    }

    fn contains(&self, container: &str, content: &str) -> Result<bool> {
        Ok(container
            .to_ascii_uppercase()
            .contains(&content.to_ascii_uppercase()))
    }

    fn matches(&self, text: &str, pattern: &str) -> Result<bool> {
        glob::is_match(&text.to_ascii_uppercase(), &pattern.to_ascii_uppercase())
    }
}
