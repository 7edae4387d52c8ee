//! Focus Management
//!
//! Focusability rules, sequential (Tab) focus order and the active element.

use crate::{Document, NodeId};

/// Parsed `tabindex` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// Negative value: focusable from script, skipped by Tab
    Programmatic,
    /// Zero or positive value: part of sequential navigation
    Sequential(i32),
}

impl TabIndex {
    /// Parse an attribute value; anything that is not an integer is ignored
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().parse::<i32>() {
            Ok(n) if n < 0 => Some(Self::Programmatic),
            Ok(n) => Some(Self::Sequential(n)),
            Err(_) => None,
        }
    }

    pub fn is_sequential(&self) -> bool {
        matches!(self, Self::Sequential(_))
    }
}

impl Document {
    /// Currently focused element
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// Move focus to `id`; returns false (and leaves focus alone) when
    /// the element cannot take focus
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_focusable(id) {
            tracing::trace!("focus({}) ignored: element is not focusable", id);
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Drop focus
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// Parsed `tabindex`, if present and valid
    pub fn tab_index(&self, id: NodeId) -> Option<TabIndex> {
        self.get_attribute(id, "tabindex").and_then(TabIndex::parse)
    }

    /// Focusable without an explicit `tabindex`
    pub fn is_natively_focusable(&self, id: NodeId) -> bool {
        let Some(elem) = self.element(id) else {
            return false;
        };
        match elem.tag() {
            "a" | "area" => elem.has_attr("href"),
            "input" => !elem.has_attr("disabled") && elem.get_attr("type") != Some("hidden"),
            "button" | "select" | "textarea" => !elem.has_attr("disabled"),
            "iframe" | "object" | "embed" => true,
            _ => elem
                .get_attr("contenteditable")
                .is_some_and(|v| !v.eq_ignore_ascii_case("false")),
        }
    }

    /// Element can receive focus (from script or Tab)
    pub fn is_focusable(&self, id: NodeId) -> bool {
        if !self.is_element(id) || self.is_hidden(id) {
            return false;
        }
        self.is_natively_focusable(id) || self.tab_index(id).is_some()
    }

    /// Element is reachable with the Tab key
    pub fn is_tabbable(&self, id: NodeId) -> bool {
        if !self.is_focusable(id) {
            return false;
        }
        match self.tab_index(id) {
            Some(index) => index.is_sequential(),
            None => true,
        }
    }

    /// Sequential focus navigation order: positive `tabindex` values
    /// ascending, then everything else in document order
    pub fn sequential_focus_order(&self) -> Vec<NodeId> {
        let mut positive = Vec::new();
        let mut natural = Vec::new();
        for id in self.element_descendants(NodeId::ROOT) {
            if !self.is_tabbable(id) {
                continue;
            }
            match self.tab_index(id) {
                Some(TabIndex::Sequential(n)) if n > 0 => positive.push((n, id)),
                _ => natural.push(id),
            }
        }
        positive.sort_by_key(|(n, _)| *n);
        positive.into_iter().map(|(_, id)| id).chain(natural).collect()
    }

    /// Element Tab (or Shift+Tab, when `backward`) would move focus to
    pub fn next_tabbable(&self, from: Option<NodeId>, backward: bool) -> Option<NodeId> {
        let order = self.sequential_focus_order();
        let Some(from) = from else {
            return if backward { order.last().copied() } else { order.first().copied() };
        };

        if let Some(pos) = order.iter().position(|&id| id == from) {
            return if backward {
                pos.checked_sub(1).and_then(|p| order.get(p).copied())
            } else {
                order.get(pos + 1).copied()
            };
        }

        // Focus sits on a non-tabbable element: continue from its position
        // in document order.
        let document_order: Vec<NodeId> = self.element_descendants(NodeId::ROOT).collect();
        let from_pos = document_order.iter().position(|&id| id == from)?;
        let rank = |id: &NodeId| document_order.iter().position(|d| d == id);
        if backward {
            order
                .iter()
                .rev()
                .find(|id| rank(id).is_some_and(|p| p < from_pos))
                .copied()
        } else {
            order
                .iter()
                .find(|id| rank(id).is_some_and(|p| p > from_pos))
                .copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_with(tags: &[(&str, &[(&str, &str)])]) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new();
        let body = doc.body();
        let ids = tags
            .iter()
            .map(|(tag, attrs)| {
                let id = doc.create_element(tag);
                for (name, value) in attrs.iter() {
                    doc.set_attribute(id, name, value);
                }
                doc.append_child(body, id).unwrap();
                id
            })
            .collect();
        (doc, ids)
    }

    #[test]
    fn test_tab_index() {
        assert_eq!(TabIndex::parse("-1"), Some(TabIndex::Programmatic));
        assert_eq!(TabIndex::parse("0"), Some(TabIndex::Sequential(0)));
        assert_eq!(TabIndex::parse("5"), Some(TabIndex::Sequential(5)));
        assert_eq!(TabIndex::parse("x"), None);
    }

    #[test]
    fn test_focusability() {
        let (doc, ids) = document_with(&[
            ("a", &[("href", "#")]),
            ("a", &[]),
            ("button", &[("disabled", "")]),
            ("div", &[("tabindex", "-1")]),
            ("div", &[("contenteditable", "true")]),
        ]);

        assert!(doc.is_tabbable(ids[0]));
        assert!(!doc.is_focusable(ids[1]));
        assert!(!doc.is_focusable(ids[2]));
        assert!(doc.is_focusable(ids[3]));
        assert!(!doc.is_tabbable(ids[3]));
        assert!(doc.is_tabbable(ids[4]));
    }

    #[test]
    fn test_focus_rejects_unfocusable() {
        let (mut doc, ids) = document_with(&[("button", &[]), ("span", &[])]);

        assert!(doc.focus(ids[0]));
        assert!(!doc.focus(ids[1]));
        assert_eq!(doc.active_element(), Some(ids[0]));
    }

    #[test]
    fn test_sequential_order_and_next() {
        let (doc, ids) = document_with(&[
            ("button", &[]),
            ("button", &[("tabindex", "2")]),
            ("button", &[("tabindex", "-1")]),
            ("button", &[]),
        ]);

        assert_eq!(doc.sequential_focus_order(), vec![ids[1], ids[0], ids[3]]);
        assert_eq!(doc.next_tabbable(Some(ids[0]), false), Some(ids[3]));
        assert_eq!(doc.next_tabbable(Some(ids[2]), false), Some(ids[3]));
        assert_eq!(doc.next_tabbable(Some(ids[2]), true), Some(ids[0]));
        assert_eq!(doc.next_tabbable(None, true), Some(ids[3]));
    }
}
