//! Roving tabindex
//!
//! Keeps exactly the allowed elements in the tab sequence. All writes go
//! through the tracker so teardown restores author `tabindex` values.

use aw_dom::{Document, NodeId};

use crate::AttributeTracker;

/// Remove elements from the tab sequence
pub fn deny(doc: &mut Document, tracker: &mut AttributeTracker, items: &[NodeId]) {
    for &item in items {
        tracker.update_attribute(doc, item, "tabindex", Some("-1"));
    }
}

/// Return elements to their natural tab behavior
pub fn allow(doc: &mut Document, tracker: &mut AttributeTracker, items: &[NodeId]) {
    for &item in items {
        tracker.update_attribute(doc, item, "tabindex", None);
    }
}

/// Deny every element of `all` that is not in `allowed`, then allow `allowed`
pub fn roving_tab_index(
    doc: &mut Document,
    tracker: &mut AttributeTracker,
    all: &[NodeId],
    allowed: &[NodeId],
) {
    let denied: Vec<NodeId> = all
        .iter()
        .copied()
        .filter(|item| !allowed.contains(item))
        .collect();
    deny(doc, tracker, &denied);
    allow(doc, tracker, allowed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn links(doc: &mut Document, count: usize) -> Vec<NodeId> {
        (0..count)
            .map(|_| {
                let a = doc.create_element("a");
                doc.set_attribute(a, "href", "#");
                doc.append_child(doc.body(), a).unwrap();
                a
            })
            .collect()
    }

    #[test]
    fn test_single_allowed() {
        let mut doc = Document::new();
        let items = links(&mut doc, 3);
        let mut tracker = AttributeTracker::new();

        roving_tab_index(&mut doc, &mut tracker, &items, &[items[1]]);

        assert_eq!(doc.get_attribute(items[0], "tabindex"), Some("-1"));
        assert_eq!(doc.get_attribute(items[1], "tabindex"), None);
        assert_eq!(doc.get_attribute(items[2], "tabindex"), Some("-1"));
        assert_eq!(doc.sequential_focus_order(), vec![items[1]]);
    }

    proptest! {
        #[test]
        fn allowed_subset_is_exactly_tabbable(count in 1usize..8, mask in any::<u8>()) {
            let mut doc = Document::new();
            let items = links(&mut doc, count);
            let allowed: Vec<NodeId> = items
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, id)| *id)
                .collect();
            let mut tracker = AttributeTracker::new();

            roving_tab_index(&mut doc, &mut tracker, &items, &items);
            roving_tab_index(&mut doc, &mut tracker, &items, &allowed);

            prop_assert_eq!(doc.sequential_focus_order(), allowed);

            tracker.remove_all(&mut doc);
            for item in &items {
                prop_assert!(!doc.has_attribute(*item, "tabindex"));
            }
        }
    }
}
