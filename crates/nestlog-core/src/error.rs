//! Error types for session operations.

use thiserror::Error;

use crate::ids::OperationId;

/// Main error type for session operations.
///
/// Every variant is pure data, so callers and tests can branch on the
/// exact violation and read its diagnostics instead of parsing
/// messages. All three indicate caller bugs; none is raised by normal
/// well-nested use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Flush was attempted with no operation ever opened, so there is
    /// nothing to build a document from.
    #[error("no session: nothing has been opened")]
    NoSession,

    /// Flush was attempted while operations are still open. Reports
    /// how many remain and the innermost one, to point at the leak.
    #[error("{remaining} operation(s) still open; innermost is '{kind}' ({schema_ref})")]
    UnclosedOperations {
        remaining: usize,
        kind: String,
        schema_ref: String,
    },

    /// Close named an id that is not the current stack top: a
    /// different operation, an already-closed one, or nothing is open
    /// at all (`expected` is `None` in that case).
    #[error("close out of order: {}, got '{got}'", fmt_expected(.expected))]
    OrderViolation {
        expected: Option<OperationId>,
        got: OperationId,
    },
}

/// Result type alias using [`SessionError`].
pub type SessionResult<T> = Result<T, SessionError>;

fn fmt_expected(expected: &Option<OperationId>) -> String {
    match expected {
        Some(id) => format!("expected '{}'", id),
        None => "nothing is open".to_owned(),
    }
}
