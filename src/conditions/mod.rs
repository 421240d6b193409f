//! Built-in SIEVE tests.
pub mod address;
pub mod body;
pub mod header;
pub mod logic;
pub mod matching;
pub mod size;

use crate::engine::Engine;

pub use matching::MatchArguments;

/// Registers every built-in test on `engine`.
pub fn register_builtins(engine: &mut Engine) {
    engine.register_test("true", logic::True);
    engine.register_test("false", logic::False);
    engine.register_test("not", logic::Not);
    engine.register_test("allof", logic::AllOf);
    engine.register_test("anyof", logic::AnyOf);

    engine.register_test("exists", header::Exists);
    engine.register_test("header", header::Header);
    engine.register_test("address", address::AddressTest);
    engine.register_test("size", size::Size);

    engine.register_test_extension("envelope", "envelope", address::EnvelopeTest);
    engine.register_test_extension("body", "body", body::Body);
}
