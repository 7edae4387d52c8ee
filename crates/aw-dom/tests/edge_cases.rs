//! Edge cases for aw-dom

use aw_dom::{Document, DomError, NodeId};

#[test]
fn test_attribute_on_text_node_is_ignored() {
    let mut doc = Document::new();
    let text = doc.create_text("plain");

    assert_eq!(doc.set_attribute(text, "id", "x"), None);
    assert!(!doc.has_attribute(text, "id"));
    assert_eq!(doc.text_content(text), "plain");
}

#[test]
fn test_insert_attribute_position_is_clamped() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    doc.set_attribute(div, "a", "1");
    doc.insert_attribute_at(div, 99, "b", "2");
    doc.insert_attribute_at(div, 0, "c", "3");

    assert_eq!(doc.attribute_names(div), vec!["c", "a", "b"]);
    assert_eq!(doc.attribute_position(div, "b"), Some(2));
}

#[test]
fn test_append_unknown_node() {
    let mut doc = Document::new();
    let ghost = NodeId::NONE;
    assert!(matches!(
        doc.append_child(doc.body(), ghost),
        Err(DomError::NotFound(_))
    ));
}

#[test]
fn test_reparent_moves_node() {
    let mut doc = Document::new();
    let first = doc.create_element("div");
    let second = doc.create_element("div");
    let child = doc.create_element("span");
    doc.append_child(doc.body(), first).unwrap();
    doc.append_child(doc.body(), second).unwrap();
    doc.append_child(first, child).unwrap();
    doc.append_child(second, child).unwrap();

    assert!(doc.element_children(first).is_empty());
    assert_eq!(doc.element_children(second), vec![child]);
}

#[test]
fn test_empty_text_content_clears_children() {
    let mut doc = Document::new();
    let p = doc.create_element("p");
    let text = doc.create_text("x");
    doc.append_child(p, text).unwrap();

    doc.set_text_content(p, "");
    assert_eq!(doc.tree().children(p).count(), 0);
}

#[test]
fn test_focus_on_missing_node() {
    let mut doc = Document::new();
    assert!(!doc.focus(NodeId::NONE));
    assert_eq!(doc.active_element(), None);
}
