use crate::comparator::{glob, Comparator};
use crate::error::Result;

/// `i;octet`: byte-for-byte comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct Octet;

impl Octet {
    pub const NAME: &'static str = "i;octet";
}

impl Comparator for Octet {
    fn equals(&self, a: &str, b: &str) -> Result<bool> {
        Ok(a == b)
    }

    fn contains(&self, container: &str, content: &str) -> Result<bool> {
        Ok(container.contains(content))
    }

    fn matches(&self, text: &str, pattern: &str) -> Result<bool> {
        glob::is_match(text, pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octet_is_case_sensitive() {
        assert!(Octet.equals("Junk", "Junk").unwrap());
        assert!(!Octet.equals("Junk", "junk").unwrap());
        assert!(Octet.contains("Buy CHEAP now", "CHEAP").unwrap());
        assert!(!Octet.contains("Buy CHEAP now", "cheap").unwrap());
        assert!(Octet.matches("Re: hello", "Re:*").unwrap());
        assert!(!Octet.matches("re: hello", "Re:*").unwrap());
    }

    #[test]
    fn test_empty_key() {
        assert!(Octet.contains("anything", "").unwrap());
        assert!(Octet.equals("", "").unwrap());
    }
}
