//! Lead submissions: the request schema accepted by `POST /api/lead`.
//!
//! Bodies are read permissively. Anything that is not a JSON object is treated as `{}`,
//! scalar values are coerced to strings, and keys outside the schema only survive inside
//! the raw payload that the fallback template dumps.
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

const DEFAULT_SOURCE: &str = "cta_section";

/// Keys the site's forms send. `name`, `business` and `website` (feature requests) have no
/// dedicated template and reach the inbox through the raw payload dump.
const KNOWN_FIELDS: &[&str] = &[
    "form", "topic", "hp", "email", "name", "business", "website", "place", "location", "link",
    "notes", "source",
];

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    Newsletter,
    Gem,
    Feature,
    Itinerary,
    Contact,
    Event,
    /// A discriminator this service has no dedicated handling for.
    Unknown(String),
}

impl FormKind {
    pub fn parse(raw: &str) -> Self {
        let key = raw.trim().to_lowercase();
        match key.as_str() {
            "newsletter" => Self::Newsletter,
            "gem" => Self::Gem,
            "feature" => Self::Feature,
            "itinerary" => Self::Itinerary,
            "contact" => Self::Contact,
            "event" => Self::Event,
            _ => Self::Unknown(key),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Newsletter => "newsletter",
            Self::Gem => "gem",
            Self::Feature => "feature",
            Self::Itinerary => "itinerary",
            Self::Contact => "contact",
            Self::Event => "event",
            Self::Unknown(other) => other,
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which form kinds bypass the honeypot check.
///
/// The newsletter form is exempt by default: browser autofill and extensions have been
/// seen filling its hidden field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoneypotPolicy {
    pub exempt: Vec<FormKind>,
}

impl Default for HoneypotPolicy {
    fn default() -> Self {
        Self {
            exempt: vec![FormKind::Newsletter],
        }
    }
}

impl HoneypotPolicy {
    pub fn is_spam(&self, lead: &LeadSubmission) -> bool {
        lead.honeypot_filled && !self.exempt.contains(&lead.kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFields {
    pub place: String,
    pub location: String,
    pub link: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeadSubmission {
    pub kind: FormKind,
    pub email: String,
    pub source: String,
    pub honeypot_filled: bool,
    pub fields: LeadFields,
    /// The submitted object exactly as received.
    pub raw: Map<String, Value>,
}

impl LeadSubmission {
    /// Builds a submission from a request body. Never fails: malformed or non-object JSON
    /// becomes an empty submission of kind `contact`.
    pub fn from_body(body: &[u8]) -> Self {
        let raw = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self::from_map(raw)
    }

    pub fn from_map(raw: Map<String, Value>) -> Self {
        let discriminator = Some(field(&raw, "form"))
            .filter(|s| !s.is_empty())
            .or_else(|| Some(field(&raw, "topic")).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "contact".to_string());

        let source = Some(field(&raw, "source"))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

        Self {
            kind: FormKind::parse(&discriminator),
            email: field(&raw, "email"),
            source,
            honeypot_filled: raw.get("hp").is_some_and(is_filled),
            fields: LeadFields {
                place: field(&raw, "place"),
                location: field(&raw, "location"),
                link: field(&raw, "link"),
                notes: field(&raw, "notes"),
            },
            raw,
        }
    }

    /// The submitted email, only when it looks like `local@domain.tld`.
    pub fn reply_to(&self) -> Option<&str> {
        is_valid_email(&self.email).then_some(self.email.as_str())
    }

    /// Keys the schema does not define.
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.raw
            .keys()
            .map(String::as_str)
            .filter(|k| !KNOWN_FIELDS.contains(k))
            .collect()
    }
}

pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

fn field(raw: &Map<String, Value>, key: &str) -> String {
    match raw.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
