/// Argument classification for one command or test invocation.
///
/// A tag directly followed by a non-tag argument owns that argument as its
/// value. A tag followed by another tag (or by nothing) is a simple tag. All
/// other arguments are positional, in their original order.
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::sieve::ast::{Argument, Test};

#[derive(Debug, Clone)]
pub struct Arguments<'a> {
    all: &'a [Argument],
    single_tags: BTreeSet<&'a str>,
    tagged: BTreeMap<&'a str, &'a Argument>,
    positional: Vec<&'a Argument>,
}

impl<'a> Arguments<'a> {
    pub fn classify(all: &'a [Argument]) -> Self {
        let mut single_tags = BTreeSet::new();
        let mut tagged = BTreeMap::new();
        let mut positional = Vec::new();
        let mut pending: Option<&'a str> = None;

        for argument in all {
            match argument {
                Argument::Tag(tag) => {
                    if let Some(previous) = pending.replace(tag.as_str()) {
                        single_tags.insert(previous);
                    }
                }
                other => match pending.take() {
                    Some(tag) => {
                        tagged.insert(tag, other);
                    }
                    None => positional.push(other),
                },
            }
        }
        if let Some(tag) = pending {
            single_tags.insert(tag);
        }

        Self {
            all,
            single_tags,
            tagged,
            positional,
        }
    }

    /// The arguments exactly as written, for handlers that read them in order.
    pub fn raw(&self) -> &'a [Argument] {
        self.all
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn has_single_tag(&self, tag: &str) -> bool {
        self.single_tags.contains(tag)
    }

    pub fn single_tags(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.single_tags.iter().copied()
    }

    pub fn tags_with_value(&self) -> impl Iterator<Item = (&'a str, &'a Argument)> + '_ {
        self.tagged.iter().map(|(tag, value)| (*tag, *value))
    }

    pub fn positional(&self) -> &[&'a Argument] {
        &self.positional
    }

    /// The value bound to `tag`, failing if the tag appeared without one.
    fn tag_value(&self, tag: &str, message: &str) -> Result<Option<&'a Argument>> {
        if self.single_tags.contains(tag) {
            return Err(Error::syntax(message));
        }
        Ok(self.tagged.get(tag).copied())
    }

    pub fn string_for_tag(&self, tag: &str, message: &str) -> Result<Option<&'a str>> {
        self.tag_value(tag, message)?
            .map(|value| single_string(value, message))
            .transpose()
    }

    pub fn number_for_tag(&self, tag: &str, message: &str) -> Result<Option<u64>> {
        match self.tag_value(tag, message)? {
            None => Ok(None),
            Some(Argument::Number(n)) => Ok(Some(*n)),
            Some(_) => Err(Error::syntax(message)),
        }
    }

    pub fn string_list_for_tag(&self, tag: &str, message: &str) -> Result<Option<&'a [String]>> {
        match self.tag_value(tag, message)? {
            None => Ok(None),
            Some(Argument::StringList(list)) => Ok(Some(list.as_slice())),
            Some(_) => Err(Error::syntax(message)),
        }
    }

    pub fn remaining_single_string(&self, message: &str) -> Result<Option<&'a str>> {
        match self.positional.as_slice() {
            [] => Ok(None),
            [single] => single_string(*single, message).map(Some),
            _ => Err(Error::syntax(message)),
        }
    }

    /// Like [`Self::remaining_single_string`], but the string must be present.
    pub fn required_single_string(&self, message: &str) -> Result<&'a str> {
        self.remaining_single_string(message)?
            .ok_or_else(|| Error::syntax(message))
    }

    pub fn validate_single_tags(&self, allowed: &[&str]) -> Result<()> {
        unwanted(self.single_tags.iter().copied(), allowed)
    }

    pub fn validate_tags_with_value(&self, allowed: &[&str]) -> Result<()> {
        unwanted(self.tagged.keys().copied(), allowed)
    }

    pub fn validate_empty(&self, message: &str) -> Result<()> {
        if self.all.is_empty() {
            Ok(())
        } else {
            Err(Error::syntax(message))
        }
    }

    /// Rejects every tag, simple or with value.
    pub fn validate_no_tags(&self) -> Result<()> {
        self.validate_single_tags(&[])?;
        self.validate_tags_with_value(&[])
    }

    /// Positional nested tests. Any other positional argument is an error.
    pub fn tests(&self, message: &str) -> Result<Vec<&'a Test>> {
        self.positional
            .iter()
            .map(|&argument| match argument {
                Argument::Test(test) => Ok(test),
                _ => Err(Error::syntax(message)),
            })
            .collect()
    }
}

fn single_string<'a>(argument: &'a Argument, message: &str) -> Result<&'a str> {
    match argument {
        Argument::StringList(list) => match list.as_slice() {
            [single] => Ok(single.as_str()),
            _ => Err(Error::syntax(message)),
        },
        _ => Err(Error::syntax(message)),
    }
}

fn unwanted<'a>(seen: impl Iterator<Item = &'a str>, allowed: &[&str]) -> Result<()> {
    let unwanted: Vec<&str> = seen.filter(|tag| !allowed.contains(tag)).collect();
    if unwanted.is_empty() {
        Ok(())
    } else {
        Err(Error::Syntax(format!(
            "Unexpected tag(s): {}",
            unwanted.join(", ")
        )))
    }
}
