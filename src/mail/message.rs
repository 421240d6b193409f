/// In-memory RFC 5322 message used by the command-line host and tests.
use crate::mail::adapter::{EnvelopeAccessors, MailAdapter};
use crate::model::action::Action;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    headers: Vec<(String, String)>,
    body: String,
    raw_size: Option<u64>,
    envelope: Option<Envelope>,
    actions: Vec<Action>,
}

/// SMTP envelope: `MAIL FROM` and `RCPT TO`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub from: Option<String>,
    pub to: Vec<String>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses header fields (unfolding continuation lines) and body. Lines
    /// in the header section without a colon are ignored.
    pub fn parse(raw: &str) -> Self {
        let mut headers: Vec<(String, String)> = Vec::new();
        let mut body_start = raw.len();
        let mut offset = 0;

        for line in raw.split_inclusive('\n') {
            let content = line.trim_end_matches(['\r', '\n']);
            offset += line.len();

            if content.is_empty() {
                body_start = offset;
                break;
            }
            if content.starts_with([' ', '\t']) {
                if let Some((_, value)) = headers.last_mut() {
                    value.push_str(content);
                }
                continue;
            }
            if let Some((name, value)) = content.split_once(':') {
                headers.push((name.to_string(), value.to_string()));
            }
        }

        for (_, value) in &mut headers {
            *value = value.trim().to_string();
        }

        Self {
            headers,
            body: raw[body_start.min(raw.len())..].to_string(),
            raw_size: Some(raw.len() as u64),
            envelope: None,
            actions: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self.raw_size = None;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self.raw_size = None;
        self
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = Some(envelope);
        self
    }

    /// Hands the accumulated actions to the host, leaving the list empty.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }
}

impl MailAdapter for Message {
    fn header_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (name, _) in &self.headers {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    fn headers(&self, name: &str) -> Vec<String> {
        self.headers
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .collect()
    }

    fn envelope(&self) -> Option<&dyn EnvelopeAccessors> {
        self.envelope.as_ref().map(|e| e as &dyn EnvelopeAccessors)
    }

    fn content_type(&self) -> String {
        self.matching_headers("Content-Type")
            .first()
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "text/plain".to_string())
    }

    fn body_text(&self) -> String {
        self.body.clone()
    }

    fn size(&self) -> u64 {
        self.raw_size.unwrap_or_else(|| {
            let headers: usize = self
                .headers
                .iter()
                .map(|(n, v)| n.len() + v.len() + 4)
                .sum();
            (headers + 2 + self.body.len()) as u64
        })
    }

    fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl EnvelopeAccessors for Envelope {
    fn envelope_names(&self) -> Vec<String> {
        vec!["from".to_string(), "to".to_string()]
    }

    fn envelope_values(&self, name: &str) -> Vec<String> {
        match name {
            "from" => self.from.iter().cloned().collect(),
            "to" => self.to.clone(),
            _ => Vec::new(),
        }
    }
}
