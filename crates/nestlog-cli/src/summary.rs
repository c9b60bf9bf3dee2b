//! Aggregate per-kind statistics over a session document.

use std::fmt;

use nestlog_core::{Relation, SessionDocument};

use crate::render::{close_index, duration_ms};

/// Counters for one operation kind.
#[derive(Debug, Clone, PartialEq)]
pub struct KindStats {
    pub kind: String,
    pub count: usize,
    /// Sum of execution times, over the operations that carried one.
    pub total_ms: f64,
    pub timed: usize,
}

/// Totals for one document, grouped by kind in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub schema_ref: String,
    pub operations: usize,
    pub events: usize,
    pub operation_kinds: Vec<KindStats>,
    pub event_kinds: Vec<(String, usize)>,
    pub relations: Vec<Relation>,
}

impl Summary {
    pub fn from_document(doc: &SessionDocument) -> Self {
        let closes = close_index(doc);

        let mut operations = 0;
        let mut operation_kinds: Vec<KindStats> = Vec::new();
        let mut node = Some(&doc.open);
        while let Some(open) = node {
            operations += 1;
            let close = closes.get(open.id.as_str()).copied();

            let slot = match operation_kinds.iter().position(|s| s.kind == open.kind) {
                Some(i) => i,
                None => {
                    operation_kinds.push(KindStats {
                        kind: open.kind.clone(),
                        count: 0,
                        total_ms: 0.0,
                        timed: 0,
                    });
                    operation_kinds.len() - 1
                }
            };
            operation_kinds[slot].count += 1;
            if let Some(ms) = duration_ms(open, close) {
                operation_kinds[slot].total_ms += ms;
                operation_kinds[slot].timed += 1;
            }

            node = open.child.as_deref();
        }

        let mut event_kinds: Vec<(String, usize)> = Vec::new();
        for event in &doc.events {
            match event_kinds.iter_mut().find(|(kind, _)| *kind == event.kind) {
                Some((_, count)) => *count += 1,
                None => event_kinds.push((event.kind.clone(), 1)),
            }
        }

        Summary {
            schema_ref: doc.schema_ref.clone(),
            operations,
            events: doc.events.len(),
            operation_kinds,
            event_kinds,
            relations: doc.relations.clone(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Session: {}", self.schema_ref)?;
        writeln!(f, "Operations: {}", self.operations)?;
        writeln!(f, "Events: {}", self.events)?;

        if !self.operation_kinds.is_empty() {
            writeln!(f)?;
            writeln!(f, "Operations by kind:")?;
            let width = self
                .operation_kinds
                .iter()
                .map(|s| s.kind.len())
                .max()
                .unwrap_or(0);
            for stats in &self.operation_kinds {
                write!(f, "  {:<width$}  {}", stats.kind, stats.count)?;
                if stats.timed > 0 {
                    write!(f, "  {}ms", stats.total_ms)?;
                }
                writeln!(f)?;
            }
        }

        if !self.event_kinds.is_empty() {
            writeln!(f)?;
            writeln!(f, "Events by kind:")?;
            let width = self
                .event_kinds
                .iter()
                .map(|(kind, _)| kind.len())
                .max()
                .unwrap_or(0);
            for (kind, count) in &self.event_kinds {
                writeln!(f, "  {:<width$}  {}", kind, count)?;
            }
        }

        if !self.relations.is_empty() {
            writeln!(f)?;
            writeln!(f, "Relations:")?;
            for relation in &self.relations {
                match &relation.title {
                    Some(title) => {
                        writeln!(f, "  {} {} ({})", relation.rel, relation.href, title)?
                    }
                    None => writeln!(f, "  {} {}", relation.rel, relation.href)?,
                }
            }
        }

        Ok(())
    }
}
