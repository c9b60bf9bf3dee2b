//! Reconstruction of nested trees from the flat, closing-ordered
//! ledgers.
//!
//! Closed operations land in two flat lists in closing order, which
//! under nesting means innermost-closed first. The output document
//! wants nesting order instead: outermost at the root, each level's
//! child the next-inner operation. The folds below walk a ledger in
//! closing order and let every later (outer) record take the tree
//! built so far as its child, so the record closed last ends up as the
//! root.

use crate::entry::{EventEntry, OpenEntry};

/// Fold the open-side ledger into the nested open tree.
///
/// Returns `None` for an empty ledger. For n records the result has
/// depth exactly n, node order reversed relative to the raw ledger.
pub(crate) fn fold_open_tree(ledger: Vec<OpenEntry>) -> Option<OpenEntry> {
    let mut records = ledger.into_iter();
    let mut tree = records.next()?;
    for mut record in records {
        record.child = Some(Box::new(tree));
        tree = record;
    }
    Some(tree)
}

/// Fold the close-side sequence into the nested close tree.
///
/// Mirrors [`fold_open_tree`]: the resulting shape matches the open
/// tree for the same session, but the nodes are close-side records.
pub(crate) fn fold_close_tree(closes: Vec<EventEntry>) -> Option<EventEntry> {
    let mut records = closes.into_iter();
    let mut tree = records.next()?;
    for mut record in records {
        record.child = Some(Box::new(tree));
        tree = record;
    }
    Some(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::ids::OperationId;

    fn open_record(id: &str) -> OpenEntry {
        OpenEntry::new(OperationId::new(id), &Context::new("a", "a.json"))
    }

    fn close_record(id: &str, correlates: &str) -> EventEntry {
        EventEntry::new(
            OperationId::new(id),
            &Context::new("a", "a.json"),
            Some(OperationId::new(correlates)),
        )
    }

    #[test]
    fn test_empty_ledger_folds_to_none() {
        assert!(fold_open_tree(Vec::new()).is_none());
        assert!(fold_close_tree(Vec::new()).is_none());
    }

    #[test]
    fn test_single_record_is_the_root() {
        let tree = fold_open_tree(vec![open_record("a_1")]).unwrap();
        assert_eq!(tree.id.as_str(), "a_1");
        assert!(tree.child.is_none());
    }

    #[test]
    fn test_nested_ledger_reverses_into_nesting_order() {
        // Closing order is innermost first: a_3 closed before a_2
        // before a_1.
        let ledger = vec![open_record("a_3"), open_record("a_2"), open_record("a_1")];
        let tree = fold_open_tree(ledger).unwrap();

        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.id.as_str(), "a_1");
        let mid = tree.child.as_deref().unwrap();
        assert_eq!(mid.id.as_str(), "a_2");
        let inner = mid.child.as_deref().unwrap();
        assert_eq!(inner.id.as_str(), "a_3");
        assert!(inner.child.is_none());
    }

    #[test]
    fn test_close_tree_mirrors_open_shape() {
        let closes = vec![close_record("a_3", "a_2"), close_record("a_4", "a_1")];
        let tree = fold_close_tree(closes).unwrap();

        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.id.as_str(), "a_4");
        assert_eq!(
            tree.correlation_id.as_ref().map(|id| id.as_str()),
            Some("a_1")
        );
        let inner = tree.child.as_deref().unwrap();
        assert_eq!(inner.id.as_str(), "a_3");
        assert_eq!(
            inner.correlation_id.as_ref().map(|id| id.as_str()),
            Some("a_2")
        );
    }

    #[test]
    fn test_sequential_closes_chain_by_closing_order() {
        // Two operations closed one after the other, no nesting: the
        // fold is total and chains them, last-closed at the root.
        let ledger = vec![open_record("a_1"), open_record("a_2")];
        let tree = fold_open_tree(ledger).unwrap();
        assert_eq!(tree.id.as_str(), "a_2");
        assert_eq!(tree.child.as_deref().unwrap().id.as_str(), "a_1");
    }
}
