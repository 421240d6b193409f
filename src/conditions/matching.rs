/// Argument grammar shared by `header`, `address` and `envelope`:
///
/// ```text
/// [:comparator <name>] [match-type] [address-part] <names> <keys>
/// ```
///
/// Read in order from the raw arguments. The classifier cannot be used here
/// because `:is "From"` would bind the match type to the header names.
use crate::comparator::{self, Comparator};
use crate::engine::{Arguments, Engine};
use crate::error::{Error, Result};
use crate::model::enums::{AddressPart, MatchType};
use crate::sieve::ast::Argument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchArguments<'a> {
    pub comparator: &'a str,
    pub match_type: MatchType,
    pub address_part: AddressPart,
    pub names: &'a [String],
    pub keys: &'a [String],
}

impl<'a> MatchArguments<'a> {
    /// Parses the arguments of test `test`. Address parts are only accepted
    /// when `with_address_part` is set.
    pub fn parse(test: &str, args: &Arguments<'a>, with_address_part: bool) -> Result<Self> {
        let mut comparator = None;
        let mut match_type = None;
        let mut address_part = None;
        let mut lists: Vec<&'a [String]> = Vec::new();

        let mut raw = args.raw().iter();
        while let Some(argument) = raw.next() {
            match argument {
                Argument::Tag(tag) if !lists.is_empty() => {
                    return Err(Error::Syntax(format!(
                        "{test}: tag {tag} must come before the string lists"
                    )));
                }
                Argument::Tag(tag) if tag == ":comparator" => {
                    let name = match raw.next() {
                        Some(Argument::StringList(list)) => match list.as_slice() {
                            [name] => name.as_str(),
                            _ => return Err(comparator_usage(test)),
                        },
                        _ => return Err(comparator_usage(test)),
                    };
                    if comparator.replace(name).is_some() {
                        return Err(duplicate(test, "comparator"));
                    }
                }
                Argument::Tag(tag) => {
                    if let Some(parsed) = MatchType::from_sieve(tag) {
                        if match_type.replace(parsed).is_some() {
                            return Err(duplicate(test, "match type"));
                        }
                    } else if let Some(parsed) =
                        AddressPart::from_sieve(tag).filter(|_| with_address_part)
                    {
                        if address_part.replace(parsed).is_some() {
                            return Err(duplicate(test, "address part"));
                        }
                    } else {
                        return Err(Error::Syntax(format!("Unexpected tag(s): {tag}")));
                    }
                }
                Argument::StringList(list) => lists.push(list.as_slice()),
                other => {
                    return Err(Error::Syntax(format!(
                        "{test} does not accept a {}",
                        other.describe()
                    )));
                }
            }
        }

        let [names, keys] = lists[..] else {
            return Err(Error::Syntax(format!(
                "{test} expects a list of names and a list of keys"
            )));
        };

        Ok(Self {
            comparator: comparator.unwrap_or(comparator::DEFAULT_COMPARATOR),
            match_type: match_type.unwrap_or_default(),
            address_part: address_part.unwrap_or_default(),
            names,
            keys,
        })
    }

    /// Validation-time check that the comparator exists.
    pub fn check_comparator(&self, engine: &Engine) -> Result<()> {
        engine.comparator(self.comparator).map(|_| ())
    }

    /// True if any of `values` matches any key.
    pub fn any_value_matches(&self, comparator: &dyn Comparator, values: &[String]) -> Result<bool> {
        for value in values {
            for key in self.keys {
                if comparator::compare(comparator, self.match_type, value, key)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

fn comparator_usage(test: &str) -> Error {
    Error::Syntax(format!("{test}: :comparator expects a single comparator name"))
}

fn duplicate(test: &str, what: &str) -> Error {
    Error::Syntax(format!("{test} accepts at most one {what}"))
}
