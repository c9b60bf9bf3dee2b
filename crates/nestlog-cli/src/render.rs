//! ASCII tree rendering for session documents.
//!
//! The open chain renders as an indented tree. Each operation line
//! shows the open id, the kind, the id of its close record, and an
//! execution time when the payload carries one. Events appear as
//! bullet children of the operation they correlate to; uncorrelated
//! events sit at the top level next to the root operation.

use std::collections::HashMap;
use std::fmt::Write as _;

use nestlog_core::{EventEntry, OpenEntry, SessionDocument};
use serde_json::Value;

/// Data keys accepted as a per-node execution time, in milliseconds.
const DURATION_KEYS: [&str; 3] = ["timeMs", "durationMs", "elapsedMs"];

/// Execution time for a node. Close-side data wins over open-side.
pub(crate) fn duration_ms(open: &OpenEntry, close: Option<&EventEntry>) -> Option<f64> {
    close
        .map(|entry| &entry.data)
        .into_iter()
        .chain([&open.data])
        .flat_map(|data| DURATION_KEYS.iter().filter_map(|key| data.get(*key)))
        .find_map(Value::as_f64)
}

/// Close records keyed by the open id they close.
pub(crate) fn close_index(doc: &SessionDocument) -> HashMap<&str, &EventEntry> {
    let mut index = HashMap::new();
    let mut node = Some(&doc.close);
    while let Some(close) = node {
        if let Some(id) = &close.correlation_id {
            index.insert(id.as_str(), close);
        }
        node = close.child.as_deref();
    }
    index
}

fn connector(last: bool) -> &'static str {
    if last {
        "└──"
    } else {
        "├──"
    }
}

fn event_label(event: &EventEntry) -> String {
    format!("• {} ({})", event.id, event.kind)
}

fn operation_label(open: &OpenEntry, closes: &HashMap<&str, &EventEntry>) -> String {
    let close = closes.get(open.id.as_str()).copied();
    let mut label = format!("{} ({})", open.id, open.kind);
    if let Some(close) = close {
        let _ = write!(label, " ✓ {}", close.id);
    }
    if let Some(ms) = duration_ms(open, close) {
        let _ = write!(label, " [{}ms]", ms);
    }
    label
}

/// Render the whole document as a tree rooted at its schema reference.
pub fn render_tree(doc: &SessionDocument) -> String {
    let closes = close_index(doc);
    let mut out = String::new();
    let _ = writeln!(out, "{}", doc.schema_ref);

    for event in doc.events.iter().filter(|e| e.correlation_id.is_none()) {
        let _ = writeln!(out, "├── {}", event_label(event));
    }
    let _ = writeln!(out, "└── {}", operation_label(&doc.open, &closes));

    // The open chain has one operation per level, so no recursion is
    // needed; the prefix grows by one indent step per level.
    let mut prefix = String::from("    ");
    let mut node = &doc.open;
    loop {
        let events: Vec<&EventEntry> = doc
            .events
            .iter()
            .filter(|e| e.correlation_id.as_ref() == Some(&node.id))
            .collect();
        let child = node.child.as_deref();

        let total = events.len() + usize::from(child.is_some());
        for (i, event) in events.iter().enumerate() {
            let _ = writeln!(out, "{}{} {}", prefix, connector(i + 1 == total), event_label(event));
        }
        match child {
            Some(next) => {
                let _ = writeln!(out, "{}└── {}", prefix, operation_label(next, &closes));
                prefix.push_str("    ");
                node = next;
            }
            None => break,
        }
    }

    out
}

/// List events in recording order, one per line.
pub fn render_events(doc: &SessionDocument) -> String {
    if doc.events.is_empty() {
        return "(no events)\n".to_owned();
    }

    let mut out = String::new();
    for event in &doc.events {
        match &event.correlation_id {
            Some(id) => {
                let _ = writeln!(out, "{} ({}) in {}", event.id, event.kind, id);
            }
            None => {
                let _ = writeln!(out, "{} ({})", event.id, event.kind);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestlog_core::{Context, SessionLog};

    fn ctx(kind: &str) -> Context {
        Context::new(kind, format!("{}.json", kind))
    }

    #[test]
    fn test_minimal_tree() {
        let mut log = SessionLog::new();
        let id = log.open(&ctx("a"));
        log.close(&ctx("b"), &id).unwrap();
        let doc = log.flush().unwrap();

        assert_eq!(render_tree(&doc), "session.json\n└── a_1 (a) ✓ b_1\n");
    }

    #[test]
    fn test_nested_tree_with_events() {
        let mut log = SessionLog::new();
        let outer = log.open(&ctx("a"));
        log.event(&ctx("e"));
        let inner = log.open(&ctx("a"));
        log.close(&ctx("b"), &inner).unwrap();
        log.close(&ctx("b"), &outer).unwrap();
        let doc = log.flush().unwrap();

        let expected = "\
session.json
└── a_1 (a) ✓ b_2
    ├── • e_1 (e)
    └── a_2 (a) ✓ b_1
";
        assert_eq!(render_tree(&doc), expected);
    }

    #[test]
    fn test_uncorrelated_events_sit_at_top_level() {
        let mut log = SessionLog::new();
        log.event(&ctx("boot"));
        let id = log.open(&ctx("a"));
        log.close(&ctx("b"), &id).unwrap();
        let doc = log.flush().unwrap();

        let expected = "\
session.json
├── • boot_1 (boot)
└── a_1 (a) ✓ b_1
";
        assert_eq!(render_tree(&doc), expected);
    }

    #[test]
    fn test_duration_from_close_side() {
        let mut log = SessionLog::new();
        let id = log.open(&ctx("a"));
        log.close(&ctx("b").with("timeMs", 12.5), &id).unwrap();
        let doc = log.flush().unwrap();

        assert!(render_tree(&doc).contains("a_1 (a) ✓ b_1 [12.5ms]"));
    }

    #[test]
    fn test_duration_falls_back_to_open_side() {
        let mut log = SessionLog::new();
        let id = log.open(&ctx("a").with("elapsedMs", 3));
        log.close(&ctx("b"), &id).unwrap();
        let doc = log.flush().unwrap();

        assert!(render_tree(&doc).contains("[3ms]"));
    }

    #[test]
    fn test_duration_close_side_wins() {
        let mut log = SessionLog::new();
        let id = log.open(&ctx("a").with("timeMs", 1));
        log.close(&ctx("b").with("durationMs", 2), &id).unwrap();
        let doc = log.flush().unwrap();

        assert!(render_tree(&doc).contains("[2ms]"));
    }

    #[test]
    fn test_non_numeric_duration_is_ignored() {
        let mut log = SessionLog::new();
        let id = log.open(&ctx("a").with("timeMs", "fast"));
        log.close(&ctx("b"), &id).unwrap();
        let doc = log.flush().unwrap();

        assert!(!render_tree(&doc).contains("ms]"));
    }

    #[test]
    fn test_render_events_listing() {
        let mut log = SessionLog::new();
        log.event(&ctx("boot"));
        let id = log.open(&ctx("a"));
        log.event(&ctx("e"));
        log.close(&ctx("b"), &id).unwrap();
        let doc = log.flush().unwrap();

        assert_eq!(render_events(&doc), "boot_1 (boot)\ne_1 (e) in a_1\n");
    }

    #[test]
    fn test_render_events_empty() {
        let mut log = SessionLog::new();
        let id = log.open(&ctx("a"));
        log.close(&ctx("b"), &id).unwrap();
        let doc = log.flush().unwrap();

        assert_eq!(render_events(&doc), "(no events)\n");
    }
}
