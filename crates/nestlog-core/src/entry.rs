//! Record shapes that make up a session document.
//!
//! Entries are flat while a session runs; the nested `child` links are
//! populated only by tree reconstruction at flush time, never while an
//! operation is still open.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::Context;
use crate::ids::OperationId;

/// Open-side record of one operation: the declared *intent*.
///
/// While the operation is on the stack `child` is always `None`; after
/// flush the open tree links each operation to the next-inner one via
/// `child`, serialized under the `"open"` key and omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenEntry {
    pub id: OperationId,
    pub kind: String,
    #[serde(rename = "schemaRef")]
    pub schema_ref: String,
    pub data: Map<String, Value>,
    /// Next-inner operation, present only in reconstructed trees.
    #[serde(rename = "open", skip_serializing_if = "Option::is_none", default)]
    pub child: Option<Box<OpenEntry>>,
}

impl OpenEntry {
    /// Build the open record for `context` under a freshly allocated id.
    pub fn new(id: OperationId, context: &Context) -> Self {
        Self {
            id,
            kind: context.kind().to_owned(),
            schema_ref: context.schema_ref().to_owned(),
            data: context.data().clone(),
            child: None,
        }
    }

    /// Number of nodes on the child chain, this one included.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut node = self;
        while let Some(child) = node.child.as_deref() {
            depth += 1;
            node = child;
        }
        depth
    }
}

impl Drop for OpenEntry {
    // Unlink the child chain iteratively so dropping a deeply nested
    // tree cannot overflow the stack.
    fn drop(&mut self) {
        let mut child = self.child.take();
        while let Some(mut node) = child {
            child = node.child.take();
        }
    }
}

/// Occurrence or outcome record: an event, or the close side of an
/// operation.
///
/// `correlation_id` names the enclosing open operation (absent for
/// events recorded outside any operation). For close records the
/// reconstructed nesting is linked via `child`, serialized under the
/// `"close"` key; event records never carry a child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    pub id: OperationId,
    pub kind: String,
    #[serde(rename = "schemaRef")]
    pub schema_ref: String,
    pub data: Map<String, Value>,
    #[serde(
        rename = "correlationId",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub correlation_id: Option<OperationId>,
    /// Next-inner close record, present only in reconstructed trees.
    #[serde(rename = "close", skip_serializing_if = "Option::is_none", default)]
    pub child: Option<Box<EventEntry>>,
}

impl EventEntry {
    /// Build the record for `context`, correlated to the operation
    /// identified by `correlation_id` if there is one.
    pub fn new(
        id: OperationId,
        context: &Context,
        correlation_id: Option<OperationId>,
    ) -> Self {
        Self {
            id,
            kind: context.kind().to_owned(),
            schema_ref: context.schema_ref().to_owned(),
            data: context.data().clone(),
            correlation_id,
            child: None,
        }
    }

    /// Number of nodes on the child chain, this one included.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut node = self;
        while let Some(child) = node.child.as_deref() {
            depth += 1;
            node = child;
        }
        depth
    }
}

impl Drop for EventEntry {
    fn drop(&mut self) {
        let mut child = self.child.take();
        while let Some(mut node) = child {
            child = node.child.take();
        }
    }
}
