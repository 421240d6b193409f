pub mod adapter;
pub mod message;

pub use adapter::{names_match, EnvelopeAccessors, MailAdapter};
pub use message::{Envelope, Message};
