//! SIEVE script text: tokens, syntax tree and parser.
pub mod ast;
pub mod lexer;
pub mod parser;

pub use lexer::ParseError;
pub use parser::parse;
