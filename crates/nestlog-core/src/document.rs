//! The immutable output document produced by a session flush.

use serde::{Deserialize, Serialize};

use crate::entry::{EventEntry, OpenEntry};

/// Schema reference stamped on every session document.
pub const SESSION_SCHEMA_REF: &str = "session.json";

/// Link relation attached to a document at flush time.
///
/// Relations point consumers at related artifacts (source files,
/// dashboards, upstream requests). `media_type` serializes as `"type"`;
/// both optionals are omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub rel: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub media_type: Option<String>,
}

impl Relation {
    /// Create a relation with just the required fields.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            title: None,
            media_type: None,
        }
    }

    /// Add a human-readable title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a media type hint.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

/// One correlated, nested session document.
///
/// Produced exactly once per session by a successful flush. `open` and
/// `close` are nesting-ordered trees over the same set of operations;
/// `events` stays flat in recording order. Empty `events` and
/// `relations` are omitted from the serialized form entirely rather
/// than written as empty lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(rename = "schemaRef")]
    pub schema_ref: String,
    pub open: OpenEntry,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub events: Vec<EventEntry>,
    pub close: EventEntry,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub relations: Vec<Relation>,
}

impl SessionDocument {
    /// Serialize to a compact JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a document from JSON.
    ///
    /// Documents nest one JSON level per operation, so deep sessions
    /// overrun serde_json's default 128-level recursion limit; parsing
    /// runs with the limit disabled and `serde_stacker` growing the
    /// machine stack on demand instead.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let document = Self::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Ok(document)
    }
}
