//! Attribute Tracking
//!
//! Every attribute a component writes goes through an [`AttributeTracker`],
//! which remembers what the author had there before. Teardown walks the
//! records newest-first and puts the markup back exactly as it was:
//! attributes the component introduced are removed, attributes it changed
//! get their original value back at their original position.
//!
//! Controllers whose label is rewritten (the listbox writes the selected
//! option onto its button) have their original child nodes recorded too.

use std::collections::BTreeMap;

use aw_dom::{Document, NodeId};

use crate::IdGenerator;

/// Author value of an attribute the tracker overwrote
#[derive(Debug, Clone, PartialEq, Eq)]
struct Original {
    value: String,
    position: usize,
}

#[derive(Debug, Clone)]
struct TrackedAttribute {
    name: String,
    /// `None` when the attribute did not exist before the component wrote it
    original: Option<Original>,
}

/// Records component-written attributes for later restoration
#[derive(Debug, Default)]
pub struct AttributeTracker {
    attributes: BTreeMap<NodeId, Vec<TrackedAttribute>>,
    contents: BTreeMap<NodeId, Vec<NodeId>>,
}

impl AttributeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, node: NodeId, name: &str) -> Option<&TrackedAttribute> {
        self.attributes
            .get(&node)
            .and_then(|list| list.iter().find(|t| t.name == name))
    }

    fn record(&mut self, doc: &Document, node: NodeId, name: &str) {
        if self.find(node, name).is_some() {
            return;
        }
        let original = doc.get_attribute(node, name).map(|value| Original {
            value: value.to_string(),
            position: doc.attribute_position(node, name).unwrap_or(usize::MAX),
        });
        self.attributes
            .entry(node)
            .or_default()
            .push(TrackedAttribute {
                name: name.to_string(),
                original,
            });
    }

    fn forget(&mut self, node: NodeId, name: &str) -> Option<TrackedAttribute> {
        let list = self.attributes.get_mut(&node)?;
        let index = list.iter().position(|t| t.name == name)?;
        let removed = list.remove(index);
        if list.is_empty() {
            self.attributes.remove(&node);
        }
        Some(removed)
    }

    /// Write an attribute only if the element does not have it yet
    ///
    /// Returns whether anything was written. A `None` value is a no-op.
    pub fn add_attribute(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        name: &str,
        value: Option<&str>,
    ) -> bool {
        let Some(value) = value else {
            return false;
        };
        if !doc.is_element(node) || doc.has_attribute(node, name) {
            return false;
        }
        self.record(doc, node, name);
        doc.set_attribute(node, name, value);
        tracing::trace!("add {}[{}={:?}]", node, name, value);
        true
    }

    /// Overwrite (or with `None`, remove) an attribute
    ///
    /// The author value is captured on first touch so [`restore`] can put
    /// it back. Removing an attribute the component introduced itself
    /// also drops it from tracking.
    ///
    /// [`restore`]: Self::restore
    pub fn update_attribute(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        name: &str,
        value: Option<&str>,
    ) {
        if !doc.is_element(node) {
            return;
        }
        match value {
            Some(value) => {
                if doc.get_attribute(node, name) == Some(value) && self.find(node, name).is_none() {
                    // Author already has exactly this value; nothing to undo later
                    return;
                }
                self.record(doc, node, name);
                doc.set_attribute(node, name, value);
            }
            None => {
                match self.find(node, name) {
                    Some(tracked) if tracked.original.is_none() => {
                        self.forget(node, name);
                    }
                    Some(_) => {}
                    None => {
                        if !doc.has_attribute(node, name) {
                            return;
                        }
                        self.record(doc, node, name);
                    }
                }
                doc.remove_attribute(node, name);
            }
        }
        tracing::trace!("update {}[{}={:?}]", node, name, value);
    }

    /// Put one attribute back to its author state and stop tracking it
    pub fn restore(&mut self, doc: &mut Document, node: NodeId, name: &str) {
        if let Some(tracked) = self.forget(node, name) {
            Self::apply(doc, node, &tracked);
        }
    }

    fn apply(doc: &mut Document, node: NodeId, tracked: &TrackedAttribute) {
        match &tracked.original {
            Some(original) => {
                doc.insert_attribute_at(node, original.position, &tracked.name, &original.value)
            }
            None => {
                doc.remove_attribute(node, &tracked.name);
            }
        }
    }

    /// Give `node` an id if it has none, returning the id either way
    ///
    /// Generated ids are tracked and removed again on teardown.
    pub fn ensure_id(&mut self, doc: &mut Document, ids: &mut IdGenerator, node: NodeId) -> Option<String> {
        if !doc.is_element(node) {
            return None;
        }
        if let Some(id) = doc.id_of(node).filter(|id| !id.is_empty()) {
            return Some(id.to_string());
        }
        let id = ids.unique_id(doc);
        self.record(doc, node, "id");
        doc.set_attribute(node, "id", &id);
        Some(id)
    }

    /// Replace an element's children with `text`, remembering the originals
    pub fn set_text(&mut self, doc: &mut Document, node: NodeId, text: &str) {
        if !doc.is_element(node) {
            return;
        }
        if !self.contents.contains_key(&node) {
            let original: Vec<NodeId> = doc.tree().children(node).collect();
            self.contents.insert(node, original);
        }
        doc.set_text_content(node, text);
    }

    fn restore_contents(&mut self, doc: &mut Document, node: NodeId) {
        if let Some(children) = self.contents.remove(&node) {
            doc.tree_mut().clear_children(node);
            for child in children {
                let _ = doc.append_child(node, child);
            }
        }
    }

    /// Restore everything tracked on one element
    pub fn remove_attributes(&mut self, doc: &mut Document, node: NodeId) {
        if let Some(list) = self.attributes.remove(&node) {
            for tracked in list.iter().rev() {
                Self::apply(doc, node, tracked);
            }
        }
        self.restore_contents(doc, node);
    }

    /// Restore every tracked element
    pub fn remove_all(&mut self, doc: &mut Document) {
        let nodes: Vec<NodeId> = self
            .attributes
            .keys()
            .chain(self.contents.keys())
            .copied()
            .collect();
        for node in nodes {
            self.remove_attributes(doc, node);
        }
    }

    /// Tracked attribute names on `node`, oldest first
    pub fn tracked_names(&self, node: NodeId) -> Vec<&str> {
        self.attributes
            .get(&node)
            .map(|list| list.iter().map(|t| t.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn is_tracked(&self, node: NodeId, name: &str) -> bool {
        self.find(node, name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.contents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(doc: &mut Document, attrs: &[(&str, &str)]) -> NodeId {
        let id = doc.create_element("button");
        for (name, value) in attrs {
            doc.set_attribute(id, name, value);
        }
        doc.append_child(doc.body(), id).unwrap();
        id
    }

    #[test]
    fn test_add_attribute_keeps_author_value() {
        let mut doc = Document::new();
        let b = button(&mut doc, &[("aria-expanded", "true")]);
        let mut tracker = AttributeTracker::new();

        assert!(!tracker.add_attribute(&mut doc, b, "aria-expanded", Some("false")));
        assert!(!tracker.add_attribute(&mut doc, b, "role", None));
        assert!(tracker.add_attribute(&mut doc, b, "aria-controls", Some("panel")));

        assert_eq!(doc.get_attribute(b, "aria-expanded"), Some("true"));
        assert!(tracker.is_tracked(b, "aria-controls"));
        assert!(!tracker.is_tracked(b, "aria-expanded"));
    }

    #[test]
    fn test_update_then_restore_author_value() {
        let mut doc = Document::new();
        let b = button(&mut doc, &[("class", "x"), ("tabindex", "0"), ("type", "button")]);
        let mut tracker = AttributeTracker::new();

        tracker.update_attribute(&mut doc, b, "tabindex", Some("-1"));
        tracker.update_attribute(&mut doc, b, "tabindex", None);
        assert!(!doc.has_attribute(b, "tabindex"));

        tracker.remove_all(&mut doc);
        assert_eq!(
            doc.attribute_names(b),
            vec!["class".to_string(), "tabindex".to_string(), "type".to_string()]
        );
        assert_eq!(doc.get_attribute(b, "tabindex"), Some("0"));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_removing_introduced_attribute_untracks() {
        let mut doc = Document::new();
        let b = button(&mut doc, &[]);
        let mut tracker = AttributeTracker::new();

        tracker.update_attribute(&mut doc, b, "tabindex", Some("-1"));
        tracker.update_attribute(&mut doc, b, "tabindex", None);

        assert!(!tracker.is_tracked(b, "tabindex"));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_ensure_id_only_when_missing() {
        let mut doc = Document::new();
        let named = button(&mut doc, &[("id", "go")]);
        let anonymous = button(&mut doc, &[]);
        let mut tracker = AttributeTracker::new();
        let mut ids = IdGenerator::default();

        assert_eq!(tracker.ensure_id(&mut doc, &mut ids, named).as_deref(), Some("go"));
        let generated = tracker.ensure_id(&mut doc, &mut ids, anonymous).unwrap();
        assert_eq!(doc.id_of(anonymous), Some(generated.as_str()));

        tracker.remove_attributes(&mut doc, anonymous);
        assert_eq!(doc.id_of(anonymous), None);
        assert_eq!(doc.id_of(named), Some("go"));
    }

    #[test]
    fn test_set_text_restores_original_children() {
        let mut doc = Document::new();
        let b = button(&mut doc, &[]);
        let label = doc.create_text("Choose");
        let icon = doc.create_element("span");
        doc.append_child(b, label).unwrap();
        doc.append_child(b, icon).unwrap();
        let before = doc.outer_html(b);

        let mut tracker = AttributeTracker::new();
        tracker.set_text(&mut doc, b, "Hartford");
        tracker.set_text(&mut doc, b, "El Paso");
        assert_eq!(doc.text_content(b), "El Paso");

        tracker.remove_all(&mut doc);
        assert_eq!(doc.outer_html(b), before);
    }
}
