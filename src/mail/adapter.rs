/// The host's view of the message under evaluation.
///
/// The engine never touches the message directly. Everything it needs (header
/// values, envelope, body, size) and the action list it appends to are reached
/// through this trait.
use crate::engine::address;
use crate::model::action::Action;

/// Header and envelope names compare without regard to ASCII case or
/// surrounding whitespace: `"From"`, `"from "` and `" FROM"` are the same name.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

pub trait MailAdapter {
    /// Distinct header field names present in the message, as written.
    fn header_names(&self) -> Vec<String>;

    /// Values of the header fields named exactly `name`.
    fn headers(&self, name: &str) -> Vec<String>;

    /// Values of every header field whose name matches `name` under [`names_match`].
    fn matching_headers(&self, name: &str) -> Vec<String> {
        self.header_names()
            .iter()
            .filter(|candidate| names_match(candidate, name))
            .flat_map(|candidate| self.headers(candidate))
            .collect()
    }

    /// Splits a header value into individual addresses.
    fn parse_addresses(&self, value: &str) -> Vec<String> {
        address::extract_addresses(value)
    }

    /// Envelope access, if the host knows the SMTP envelope.
    fn envelope(&self) -> Option<&dyn EnvelopeAccessors> {
        None
    }

    /// MIME type of the top-level body, e.g. `text/plain`.
    fn content_type(&self) -> String;

    fn body_text(&self) -> String;

    /// Message size in octets.
    fn size(&self) -> u64;

    fn add_action(&mut self, action: Action);

    fn actions(&self) -> &[Action];
}

pub trait EnvelopeAccessors {
    /// Envelope parts the host can provide, e.g. `from` and `to`.
    fn envelope_names(&self) -> Vec<String>;

    fn envelope_values(&self, name: &str) -> Vec<String>;

    fn matching_envelope(&self, name: &str) -> Vec<String> {
        self.envelope_names()
            .iter()
            .filter(|candidate| names_match(candidate, name))
            .flat_map(|candidate| self.envelope_values(candidate))
            .collect()
    }
}
