//! Document - High-level document API

use crate::{DomResult, DomTree, ElementData, NodeData, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Cached reference to <body> element
    body: NodeId,
    /// Currently focused element
    pub(crate) active: Option<NodeId>,
}

impl Document {
    /// Create a new document with `<html><head></head><body></body></html>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes cannot violate the hierarchy
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            body,
            active: None,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty() -> Self {
        Self {
            tree: DomTree::new(),
            body: NodeId::NONE,
            active: None,
        }
    }

    /// Locate `<body>` after the tree was built externally
    pub fn finalize(&mut self) {
        self.body = self
            .tree
            .descendants(NodeId::ROOT)
            .find(|&id| self.tag_name(id) == Some("body"))
            .unwrap_or(NodeId::NONE);
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.tree.create_text(text)
    }

    /// Append a child node
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.append_child(parent, child)
    }

    /// Element data for `id`, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.get(id).and_then(|n| n.as_element())
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.tree.get_mut(id).and_then(|n| n.as_element_mut())
    }

    /// Check if `id` names an element
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Lowercase tag name
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag())
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.tree
            .descendants(NodeId::ROOT)
            .find(|&node| self.element(node).and_then(|e| e.id()) == Some(id))
    }

    /// Elements carrying `name`, optionally with exactly `value`, in document order
    pub fn elements_with_attribute(&self, name: &str, value: Option<&str>) -> Vec<NodeId> {
        self.tree
            .descendants(NodeId::ROOT)
            .filter(|&node| match (self.get_attribute(node, name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(wanted)) => actual == wanted,
                (None, _) => false,
            })
            .collect()
    }

    /// Get attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    /// Check if attribute exists
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    /// Set attribute, returning the previous value
    ///
    /// Setting on a non-element is a no-op.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Option<String> {
        self.element_mut(id)?.set_attr(name, value)
    }

    /// Put an attribute back at a given position in the attribute list
    pub fn insert_attribute_at(&mut self, id: NodeId, index: usize, name: &str, value: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.insert_attr(index, name, value);
        }
    }

    /// Position of an attribute in the element's attribute list
    pub fn attribute_position(&self, id: NodeId, name: &str) -> Option<usize> {
        self.element(id).and_then(|e| e.attr_position(name))
    }

    /// Remove attribute, returning its value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id)?.remove_attr(name)
    }

    /// Attribute name/value pairs in insertion order
    pub fn attributes(&self, id: NodeId) -> Vec<(String, String)> {
        self.element(id)
            .map(|e| {
                e.attrs()
                    .iter()
                    .map(|a| (a.name.clone(), a.value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Attribute names in insertion order
    pub fn attribute_names(&self, id: NodeId) -> Vec<String> {
        self.element(id)
            .map(|e| e.attrs().iter().map(|a| a.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Element `id` attribute
    pub fn id_of(&self, id: NodeId) -> Option<&str> {
        self.element(id).and_then(|e| e.id())
    }

    /// Concatenated text of every descendant text node
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.tree.get(id).and_then(|n| n.as_text()) {
            return text.to_string();
        }
        self.tree
            .descendants(id)
            .filter_map(|node| self.tree.get(node).and_then(|n| n.as_text()))
            .collect()
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if !self.is_element(id) {
            return;
        }
        self.tree.clear_children(id);
        if !text.is_empty() {
            let node = self.tree.create_text(text);
            let _ = self.tree.append_child(id, node);
        }
    }

    /// Parent element, if any
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.tree.get(id)?.parent;
        self.is_element(parent).then_some(parent)
    }

    /// Direct element children
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .children(id)
            .filter(|&child| self.is_element(child))
            .collect()
    }

    /// First direct element child
    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.tree.children(id).find(|&child| self.is_element(child))
    }

    /// Next sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.tree.get(id)?.next_sibling;
        while cursor.is_valid() {
            if self.is_element(cursor) {
                return Some(cursor);
            }
            cursor = self.tree.get(cursor)?.next_sibling;
        }
        None
    }

    /// Previous sibling that is an element
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.tree.get(id)?.prev_sibling;
        while cursor.is_valid() {
            if self.is_element(cursor) {
                return Some(cursor);
            }
            cursor = self.tree.get(cursor)?.prev_sibling;
        }
        None
    }

    /// Element descendants in document order, excluding `id`
    pub fn element_descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .descendants(id)
            .filter(move |&node| self.is_element(node))
    }

    /// Inclusive containment check
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree.contains(ancestor, node)
    }

    /// Element or one of its ancestors carries `hidden`
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.has_attribute(id, "hidden")
            || self
                .tree
                .ancestors(id)
                .any(|ancestor| self.has_attribute(ancestor, "hidden"))
    }

    /// Serialize a node and its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Document => {
                for child in self.tree.children(id) {
                    self.write_html(child, out);
                }
            }
            NodeData::Text(text) => out.push_str(text),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::Element(elem) => {
                out.push('<');
                out.push_str(elem.tag());
                for attr in elem.attrs() {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&attr.value.replace('"', "&quot;"));
                    out.push('"');
                }
                out.push('>');
                for child in self.tree.children(id) {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(elem.tag());
                out.push('>');
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
