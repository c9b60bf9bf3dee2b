//! Operation identifiers and the per-session id allocator.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one open, event, or close record.
///
/// Ids are human-readable and deterministic: `"{kind}_{n}"`, where `n`
/// counts allocations of that kind within the session across opens,
/// events and closes alike. An id is never reused before the session
/// is flushed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(String);

impl OperationId {
    /// Wrap an existing id string.
    ///
    /// Ids normally come out of [`IdAllocator::allocate`]; this is for
    /// callers that stored an id as a plain string and need to hand it
    /// back to `close`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OperationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OperationId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Per-kind monotonic counters producing deterministic operation ids.
///
/// Each kind has its own counter starting at 1. Counters are owned by
/// the session they belong to, never shared between sessions, and
/// return to their initial state on [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    counters: HashMap<String, u64>,
}

impl IdAllocator {
    /// Create an allocator with no kinds seen yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id for `kind`.
    pub fn allocate(&mut self, kind: &str) -> OperationId {
        let counter = self.counters.entry(kind.to_owned()).or_insert(0);
        *counter += 1;
        OperationId(format!("{}_{}", kind, counter))
    }

    /// Drop all counters, so the next allocation of any kind is `_1`.
    pub fn reset(&mut self) {
        self.counters.clear();
    }
}
