/// `:matches` wildcard patterns.
///
/// `?` matches exactly one character and `*` any run of characters. A
/// backslash in front of `?` or `*` makes that character literal; any other
/// backslash is itself literal. The pattern always has to cover the whole text.
use regex::Regex;

use crate::error::{Error, Result};

/// Translates a wildcard pattern into an anchored regular expression.
pub fn to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 8);
    out.push_str("(?s)^");

    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '\\' => match chars.peek() {
                Some(&next @ ('?' | '*')) => {
                    chars.next();
                    push_literal(&mut out, next);
                }
                _ => push_literal(&mut out, '\\'),
            },
            other => push_literal(&mut out, other),
        }
    }

    out.push('$');
    out
}

fn push_literal(out: &mut String, ch: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
}

pub fn is_match(text: &str, pattern: &str) -> Result<bool> {
    let regex = Regex::new(&to_regex(pattern))
        .map_err(|e| Error::Syntax(format!("Invalid match pattern '{pattern}': {e}")))?;
    Ok(regex.is_match(text))
}

/// The pattern that matches `literal` and nothing else. Backslashes need no
/// escaping: one in front of an escaped `?` or `*` still reads as literal.
pub fn escape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for ch in literal.chars() {
        if matches!(ch, '?' | '*') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wildcards() {
        assert!(is_match("hello", "h?llo").unwrap());
        assert!(!is_match("hllo", "h?llo").unwrap());
        assert!(is_match("hello world", "hello*").unwrap());
        assert!(is_match("", "*").unwrap());
        assert!(is_match("abc", "a*c").unwrap());
        assert!(!is_match("abcd", "a*c").unwrap());
    }

    #[test]
    fn test_pattern_is_anchored() {
        assert!(!is_match("xhello", "hello").unwrap());
        assert!(!is_match("hellox", "hello").unwrap());
        assert!(is_match("hello", "hello").unwrap());
    }

    #[test]
    fn test_escaped_wildcards_are_literal() {
        assert!(is_match("what?", "what\\?").unwrap());
        assert!(!is_match("whatX", "what\\?").unwrap());
        assert!(is_match("5*3", "5\\*3").unwrap());
        assert!(!is_match("513", "5\\*3").unwrap());
    }

    #[test]
    fn test_double_backslash_is_two_literals() {
        assert!(is_match("a\\\\b", "a\\\\b").unwrap());
        assert!(!is_match("a\\b", "a\\\\b").unwrap());
        assert_eq!(to_regex("a\\\\b"), "(?s)^a\\\\\\\\b$");
    }

    #[test]
    fn test_backslash_before_escaped_star() {
        // literal backslash, then a literal star
        assert!(is_match("\\*", "\\\\*").unwrap());
        assert!(!is_match("\\xyz", "\\\\*").unwrap());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("what?*"), "what\\?\\*");
        assert_eq!(escape("a\\b"), "a\\b");
    }

    #[test]
    fn test_lone_backslash_is_literal() {
        assert!(is_match("path\\", "path\\").unwrap());
        assert!(is_match("a\\b", "a\\b").unwrap());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(is_match("a.b", "a.b").unwrap());
        assert!(!is_match("axb", "a.b").unwrap());
        assert!(is_match("[x]+(y)|$^{2}", "[x]+(y)|$^{2}").unwrap());
    }

    #[test]
    fn test_wildcards_span_newlines() {
        assert!(is_match("line one\nline two", "line*two").unwrap());
    }

    #[test]
    fn test_to_regex() {
        assert_eq!(to_regex("a*b?"), "(?s)^a.*b.$");
        assert_eq!(to_regex("a.b"), "(?s)^a\\.b$");
        assert_eq!(to_regex("\\*"), "(?s)^\\*$");
    }

    proptest! {
        #[test]
        fn test_escaped_literal_matches_itself(literal in "\\PC*") {
            prop_assert!(is_match(&literal, &escape(&literal)).unwrap());
        }

        #[test]
        fn test_escaped_literal_with_backslashes_matches_itself(literal in "[ab\\\\?*]*") {
            prop_assert!(is_match(&literal, &escape(&literal)).unwrap());
        }

        #[test]
        fn test_wildcard_free_pattern_matches_itself(literal in "[a-zA-Z0-9 .+()\\[\\]{}|^$@\\\\-]*") {
            prop_assert!(is_match(&literal, &literal).unwrap());
        }
    }
}
