//! Caller-supplied context values.

use serde_json::{Map, Value};

/// Immutable description of one intent, occurrence, or outcome.
///
/// A context carries the caller-declared `kind` tag (e.g.
/// `"http_request"`), a schema reference naming the JSON schema its
/// data claims to satisfy, and an ordered map of free-form fields. The
/// engine reads a context exactly once per call and copies what it
/// needs; the caller keeps ownership.
///
/// # Example
///
/// ```
/// use nestlog_core::Context;
/// use serde_json::json;
///
/// let ctx = Context::new("http_request", "http_request.json")
///     .with("method", "GET")
///     .with("status", json!(200));
///
/// assert_eq!(ctx.kind(), "http_request");
/// assert_eq!(ctx.data()["method"], json!("GET"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    kind: String,
    schema_ref: String,
    data: Map<String, Value>,
}

impl Context {
    /// Create a context with an empty data map.
    pub fn new(kind: impl Into<String>, schema_ref: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            schema_ref: schema_ref.into(),
            data: Map::new(),
        }
    }

    /// Add one data field, keeping insertion order.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Replace the whole data map.
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    /// The caller-declared kind tag.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The schema reference for this context's data.
    pub fn schema_ref(&self) -> &str {
        &self.schema_ref
    }

    /// The ordered data fields.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}
