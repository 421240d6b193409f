/// Address part extraction and matching for `address` and `envelope`.
use crate::comparator::{compare, Comparator};
use crate::error::Result;
use crate::model::enums::{AddressPart, MatchType};

/// An address split at its first `@`. Without an `@` the whole value is the
/// local part and the domain is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address<'a> {
    pub local_part: &'a str,
    pub domain: &'a str,
}

impl<'a> Address<'a> {
    pub fn parse(value: &'a str) -> Self {
        match value.split_once('@') {
            Some((local_part, domain)) => Self { local_part, domain },
            None => Self {
                local_part: value,
                domain: "",
            },
        }
    }
}

/// The piece of `value` an address test compares.
pub fn select(part: AddressPart, value: &str) -> &str {
    match part {
        AddressPart::All => value,
        AddressPart::Localpart => Address::parse(value).local_part,
        AddressPart::Domain => Address::parse(value).domain,
    }
}

/// True if any value, reduced to `part`, matches any key.
///
/// Domains always compare case-insensitively, whatever the comparator.
pub fn matches(
    part: AddressPart,
    comparator: &dyn Comparator,
    match_type: MatchType,
    values: &[String],
    keys: &[String],
) -> Result<bool> {
    for value in values {
        let selected = select(part, value);
        for key in keys {
            let hit = if part == AddressPart::Domain {
                compare(
                    comparator,
                    match_type,
                    &selected.to_lowercase(),
                    &key.to_lowercase(),
                )?
            } else {
                compare(comparator, match_type, selected, key)?
            };
            if hit {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Pulls bare addresses out of a header value such as
/// `"Doe, Jane" <jane@example.org>, bob@example.org`.
pub fn extract_addresses(value: &str) -> Vec<String> {
    let mut addresses = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_angle = false;
    let mut angle = None::<String>;

    for ch in value.chars() {
        match ch {
            '"' if !in_angle => in_quotes = !in_quotes,
            '<' if !in_quotes => {
                in_angle = true;
                angle = Some(String::new());
            }
            '>' if in_angle => in_angle = false,
            ',' if !in_quotes && !in_angle => {
                push_address(&mut addresses, &current, angle.take());
                current.clear();
            }
            _ if in_angle => {
                if let Some(a) = angle.as_mut() {
                    a.push(ch);
                }
            }
            _ if in_quotes => {}
            _ => current.push(ch),
        }
    }
    push_address(&mut addresses, &current, angle);
    addresses
}

fn push_address(addresses: &mut Vec<String>, bare: &str, angle: Option<String>) {
    let address = angle.unwrap_or_else(|| bare.to_string());
    let address = address.trim();
    if !address.is_empty() {
        addresses.push(address.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{AsciiCasemap, AsciiNumeric, Octet};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_address_split() {
        assert_eq!(
            Address::parse("user@example.org"),
            Address {
                local_part: "user",
                domain: "example.org"
            }
        );
        assert_eq!(
            Address::parse("nodomain"),
            Address {
                local_part: "nodomain",
                domain: ""
            }
        );
        // first @ wins
        assert_eq!(Address::parse("a@b@c").domain, "b@c");
    }

    #[test]
    fn test_select() {
        assert_eq!(select(AddressPart::All, "User@Example.org"), "User@Example.org");
        assert_eq!(select(AddressPart::Localpart, "User@Example.org"), "User");
        assert_eq!(select(AddressPart::Domain, "User@Example.org"), "Example.org");
        assert_eq!(select(AddressPart::Domain, "nodomain"), "");
    }

    #[test]
    fn test_domain_is_case_insensitive_under_any_comparator() {
        let values = strings(&["someone@Example.ORG"]);
        let keys = strings(&["example.org"]);
        assert!(matches(AddressPart::Domain, &Octet, MatchType::Is, &values, &keys).unwrap());
        assert!(
            matches(AddressPart::Domain, &AsciiCasemap, MatchType::Is, &values, &keys).unwrap()
        );
        assert!(
            matches(AddressPart::Domain, &AsciiNumeric, MatchType::Is, &values, &keys).unwrap()
        );
    }

    #[test]
    fn test_localpart_respects_comparator() {
        let values = strings(&["Boss@example.org"]);
        let keys = strings(&["boss"]);
        assert!(!matches(AddressPart::Localpart, &Octet, MatchType::Is, &values, &keys).unwrap());
        assert!(
            matches(AddressPart::Localpart, &AsciiCasemap, MatchType::Is, &values, &keys).unwrap()
        );
    }

    #[test]
    fn test_any_value_any_key() {
        let values = strings(&["a@x.org", "b@y.org"]);
        let keys = strings(&["z.org", "*.org"]);
        assert!(
            matches(AddressPart::Domain, &AsciiCasemap, MatchType::Matches, &values, &keys)
                .unwrap()
        );
        assert!(
            !matches(AddressPart::All, &AsciiCasemap, MatchType::Is, &values, &strings(&["c@z.org"]))
                .unwrap()
        );
    }

    #[test]
    fn test_no_values_is_false() {
        assert!(!matches(
            AddressPart::All,
            &AsciiCasemap,
            MatchType::Contains,
            &[],
            &strings(&["x"])
        )
        .unwrap());
    }

    #[test]
    fn test_extract_addresses() {
        assert_eq!(
            extract_addresses("\"Doe, Jane\" <jane@example.org>, bob@example.org"),
            vec!["jane@example.org", "bob@example.org"]
        );
        assert_eq!(extract_addresses("Alice <alice@x.org>"), vec!["alice@x.org"]);
        assert_eq!(extract_addresses("plain@x.org"), vec!["plain@x.org"]);
        assert!(extract_addresses("  ").is_empty());
    }
}
