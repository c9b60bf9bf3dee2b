//! The session state machine.
//!
//! A [`SessionLog`] coordinates the operation stack, the event
//! collector, the closed-operations ledgers and the id allocator
//! behind four operations:
//!
//! - [`open`](SessionLog::open) declares an intent and pushes it onto
//!   the stack;
//! - [`event`](SessionLog::event) records an occurrence, correlated to
//!   the innermost open operation;
//! - [`close`](SessionLog::close) records the actual outcome of the
//!   innermost operation, enforcing strict LIFO nesting;
//! - [`flush`](SessionLog::flush) folds the accumulated records into
//!   one nested [`SessionDocument`] and resets the session.
//!
//! Every method runs to completion synchronously and performs no I/O.
//! All four take `&mut self`, so a session is used from one logical
//! thread of control at a time; wrap it in external synchronization if
//! it must be shared.

use std::mem;

use tracing::{debug, info};

use crate::context::Context;
use crate::document::{Relation, SessionDocument, SESSION_SCHEMA_REF};
use crate::entry::{EventEntry, OpenEntry};
use crate::error::{SessionError, SessionResult};
use crate::ids::{IdAllocator, OperationId};
use crate::tree::{fold_close_tree, fold_open_tree};

/// One logical logging session, from the first `open` to one `flush`.
///
/// The session keeps flat, append-only bookkeeping while operations
/// run; nothing is nested until flush. Cloning a session gives an
/// independent snapshot, which makes in-flight state cheap to inspect
/// in tests and tooling.
///
/// # Example
///
/// ```
/// use nestlog_core::{Context, SessionLog};
///
/// let mut log = SessionLog::new();
///
/// let request = Context::new("http_request", "http_request.json").with("path", "/users");
/// let id = log.open(&request);
///
/// log.event(&Context::new("cache_lookup", "cache_lookup.json").with("hit", false));
///
/// let response = Context::new("http_response", "http_response.json").with("status", 200);
/// log.close(&response, &id)?;
///
/// let document = log.flush()?;
/// assert_eq!(document.open.id.as_str(), "http_request_1");
/// assert_eq!(document.close.id.as_str(), "http_response_1");
/// # Ok::<(), nestlog_core::SessionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    /// Still-open operations, innermost last.
    stack: Vec<OpenEntry>,
    /// Occurrences in recording order.
    events: Vec<EventEntry>,
    /// Open-side records of closed operations, in closing order.
    ledger: Vec<OpenEntry>,
    /// Close-side records, in closing order.
    closes: Vec<EventEntry>,
    /// Per-kind id counters, session scoped.
    ids: IdAllocator,
}

impl SessionLog {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an intent: allocate an id for the context's kind and
    /// push the operation onto the stack.
    ///
    /// Returns the allocated id. The caller must retain it to close
    /// this exact operation later.
    pub fn open(&mut self, context: &Context) -> OperationId {
        let id = self.ids.allocate(context.kind());
        debug!(%id, kind = context.kind(), depth = self.stack.len() + 1, "opened operation");
        self.stack.push(OpenEntry::new(id.clone(), context));
        id
    }

    /// Record an occurrence, stamped with the id of the innermost open
    /// operation (no correlation if nothing is open).
    ///
    /// Does not touch the stack. The allocated id is returned for
    /// callers that want to reference the event elsewhere; nothing in
    /// the engine depends on it.
    pub fn event(&mut self, context: &Context) -> OperationId {
        let id = self.ids.allocate(context.kind());
        let correlation_id = self.stack.last().map(|open| open.id.clone());
        debug!(%id, kind = context.kind(), "recorded event");
        self.events
            .push(EventEntry::new(id.clone(), context, correlation_id));
        id
    }

    /// Record the actual outcome of the operation identified by
    /// `open_id` and pop it from the stack.
    ///
    /// `open_id` must name the innermost open operation; anything else
    /// is a nesting bug in the caller and fails with
    /// [`SessionError::OrderViolation`], leaving the session untouched.
    pub fn close(&mut self, context: &Context, open_id: &OperationId) -> SessionResult<()> {
        let Some(top) = self.stack.pop() else {
            return Err(SessionError::OrderViolation {
                expected: None,
                got: open_id.clone(),
            });
        };
        if top.id != *open_id {
            let expected = top.id.clone();
            self.stack.push(top);
            return Err(SessionError::OrderViolation {
                expected: Some(expected),
                got: open_id.clone(),
            });
        }

        self.ledger.push(top);
        let close_id = self.ids.allocate(context.kind());
        debug!(%close_id, %open_id, kind = context.kind(), "closed operation");
        self.closes
            .push(EventEntry::new(close_id, context, Some(open_id.clone())));
        Ok(())
    }

    /// Flush with no relations attached.
    pub fn flush(&mut self) -> SessionResult<SessionDocument> {
        self.flush_with_relations(Vec::new())
    }

    /// Build the session document and reset the session.
    ///
    /// Fails with [`SessionError::NoSession`] if nothing was ever
    /// opened, and with [`SessionError::UnclosedOperations`] if any
    /// operation is still open; both failures leave the session
    /// unmodified so the caller can close the leak and retry. On
    /// success every piece of state, the id counters included, returns
    /// to the empty-session state: flushing twice never yields the
    /// same document.
    pub fn flush_with_relations(
        &mut self,
        relations: Vec<Relation>,
    ) -> SessionResult<SessionDocument> {
        if self.stack.is_empty() && self.ledger.is_empty() {
            return Err(SessionError::NoSession);
        }
        if let Some(innermost) = self.stack.last() {
            return Err(SessionError::UnclosedOperations {
                remaining: self.stack.len(),
                kind: innermost.kind.clone(),
                schema_ref: innermost.schema_ref.clone(),
            });
        }

        let ledger = mem::take(&mut self.ledger);
        let closes = mem::take(&mut self.closes);
        let events = mem::take(&mut self.events);
        self.ids.reset();

        let operations = ledger.len();
        // Non-empty by the checks above; the close sequence grows in
        // lockstep with the ledger.
        let open = fold_open_tree(ledger).ok_or(SessionError::NoSession)?;
        let close = fold_close_tree(closes).ok_or(SessionError::NoSession)?;

        info!(operations, events = events.len(), "flushed session document");

        Ok(SessionDocument {
            schema_ref: SESSION_SCHEMA_REF.to_owned(),
            open,
            events,
            close,
            relations,
        })
    }

    /// Number of operations currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Id of the innermost open operation, if any.
    pub fn current_operation_id(&self) -> Option<&OperationId> {
        self.stack.last().map(|open| &open.id)
    }

    /// Events recorded so far, in recording order.
    pub fn events(&self) -> &[EventEntry] {
        &self.events
    }

    /// Number of operations already closed in this session.
    pub fn closed_count(&self) -> usize {
        self.ledger.len()
    }
}
