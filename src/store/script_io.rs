use std::fs;
use std::path::Path;

use crate::mail::Message;
use crate::sieve::ast::Script;
use crate::sieve::parser;
use crate::store::StoreError;

pub fn load_script(path: &Path) -> Result<Script, StoreError> {
    let text = fs::read_to_string(path)?;
    Ok(parser::parse(&text)?)
}

/// Reads an RFC 5322 message file.
pub fn load_message(path: &Path) -> Result<Message, StoreError> {
    Ok(Message::parse(&fs::read_to_string(path)?))
}
