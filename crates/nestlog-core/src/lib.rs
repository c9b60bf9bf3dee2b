//! Nestlog Core Library
//!
//! Hierarchical, schema-annotated session logging.
//!
//! ## Overview
//!
//! Nestlog records the operations of a program as open/close pairs with
//! schema-annotated payloads. While operations run the engine keeps
//! flat, append-only state; when the caller flushes, the records fold
//! into one nested JSON document whose shape mirrors the call
//! hierarchy. Intents (`open`) and actual outcomes (`close`) are kept
//! as separate records so the document preserves both sides of every
//! operation.
//!
//! ## Core Principles
//!
//! - **Flat while recording**: open/event/close are cheap appends;
//!   nesting happens once, at flush
//! - **Strict LIFO**: operations close innermost-first, so the document
//!   always reflects real nesting
//! - **Deterministic ids**: `{kind}_{n}` with per-kind counters, fully
//!   reproducible run to run
//! - **Schema-annotated**: every record carries a `schemaRef` naming
//!   the schema its payload conforms to
//!
//! ## Quick Start
//!
//! ```
//! use nestlog_core::{Context, SessionLog};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut log = SessionLog::new();
//!
//!     // Declare the intent
//!     let id = log.open(&Context::new("deploy", "deploy.json").with("target", "staging"));
//!
//!     // Record occurrences along the way
//!     log.event(&Context::new("health_check", "health_check.json").with("ok", true));
//!
//!     // Record the actual outcome
//!     log.close(&Context::new("deploy_result", "deploy_result.json").with("status", "ok"), &id)?;
//!
//!     // Fold everything into one nested document
//!     let document = log.flush()?;
//!     println!("{}", document.to_json_pretty()?);
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod document;
pub mod entry;
pub mod error;
pub mod ids;
pub mod session;

mod tree;

// Re-exports
pub use context::Context;
pub use document::{Relation, SessionDocument, SESSION_SCHEMA_REF};
pub use entry::{EventEntry, OpenEntry};
pub use error::{SessionError, SessionResult};
pub use ids::{IdAllocator, OperationId};
pub use session::SessionLog;
