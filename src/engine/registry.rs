/// Name → handler tables for commands, tests and comparators.
use std::collections::HashMap;

use crate::engine::state::ExecutionState;
use crate::error::{Error, Result};

struct Entry<T: ?Sized> {
    handler: Box<T>,
    /// Extension a script must `require` before using the handler.
    requires: Option<String>,
}

pub struct Registry<T: ?Sized> {
    entries: HashMap<String, Entry<T>>,
    unknown: fn(String) -> Error,
}

impl<T: ?Sized> Registry<T> {
    pub fn new(unknown: fn(String) -> Error) -> Self {
        Self {
            entries: HashMap::new(),
            unknown,
        }
    }

    /// Registers a core handler, replacing any previous one of that name.
    pub fn register(&mut self, name: &str, handler: Box<T>) {
        self.insert(name, handler, None);
    }

    /// Registers a handler usable only after `require "<extension>"`.
    pub fn register_extension(&mut self, name: &str, extension: &str, handler: Box<T>) {
        self.insert(name, handler, Some(extension.to_ascii_lowercase()));
    }

    fn insert(&mut self, name: &str, handler: Box<T>, requires: Option<String>) {
        self.entries
            .insert(name.to_ascii_lowercase(), Entry { handler, requires });
    }

    /// Lookup without the declaration check, for validation.
    pub fn get(&self, name: &str) -> Result<&T> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|entry| entry.handler.as_ref())
            .ok_or_else(|| (self.unknown)(name.to_string()))
    }

    /// Lookup for execution: an extension handler also needs its extension
    /// to have been declared.
    pub fn resolve(&self, name: &str, state: &ExecutionState) -> Result<&T> {
        let entry = self
            .entries
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| (self.unknown)(name.to_string()))?;
        if let Some(extension) = &entry.requires {
            state.require_declared(extension)?;
        }
        Ok(entry.handler.as_ref())
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter_map(|entry| entry.requires.as_deref())
    }

    /// Drops every extension handler whose extension fails `keep`.
    pub fn retain_extensions(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries
            .retain(|_, entry| entry.requires.as_deref().map_or(true, &mut keep));
    }
}
