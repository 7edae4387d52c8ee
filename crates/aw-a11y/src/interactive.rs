//! Interactive children
//!
//! Finds the descendants a user could Tab to or activate. Widgets use
//! this to pull hidden content out of the tab sequence and to decide
//! where focus lands when something opens.

use aw_dom::{Document, NodeId};

/// One way an element qualifies as interactive
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Tag with a required attribute (`a[href]`)
    TagWith(&'static str, &'static str),
    /// Form control that is not `disabled`
    Enabled(&'static str),
    /// Embedded content
    Tag(&'static str),
    /// Any element with the attribute
    Attr(&'static str),
    /// Explicit `tabindex` that is not negative
    TabIndex,
}

const RULES: &[Rule] = &[
    Rule::TagWith("a", "href"),
    Rule::TagWith("area", "href"),
    Rule::Enabled("input"),
    Rule::Enabled("select"),
    Rule::Enabled("textarea"),
    Rule::Enabled("button"),
    Rule::Tag("iframe"),
    Rule::Tag("object"),
    Rule::Tag("embed"),
    Rule::Attr("contenteditable"),
    Rule::TabIndex,
];

impl Rule {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(elem) = doc.element(node) else {
            return false;
        };
        match *self {
            Rule::TagWith(tag, attr) => elem.tag() == tag && elem.has_attr(attr),
            Rule::Enabled(tag) => elem.tag() == tag && !elem.has_attr("disabled"),
            Rule::Tag(tag) => elem.tag() == tag,
            Rule::Attr(attr) => elem.has_attr(attr),
            Rule::TabIndex => elem
                .get_attr("tabindex")
                .is_some_and(|v| !v.trim_start().starts_with('-')),
        }
    }
}

/// `node` is something a user could interact with
///
/// Markup is what counts here: an element the component has pulled out
/// of the tab sequence with `tabindex="-1"` still qualifies through its
/// tag.
pub fn is_interactive(doc: &Document, node: NodeId) -> bool {
    RULES.iter().any(|rule| rule.matches(doc, node))
}

/// Interactive descendants of `root`, in document order
pub fn interactive_children(doc: &Document, root: NodeId) -> Vec<NodeId> {
    doc.element_descendants(root)
        .filter(|&node| is_interactive(doc, node))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_rules() {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        doc.append_child(doc.body(), root).unwrap();

        let cases: &[(&str, &[(&str, &str)], bool)] = &[
            ("a", &[("href", "#")], true),
            ("a", &[], false),
            ("button", &[], true),
            ("button", &[("disabled", "")], false),
            ("input", &[("type", "text")], true),
            ("iframe", &[], true),
            ("div", &[("contenteditable", "")], true),
            ("div", &[("tabindex", "0")], true),
            ("div", &[("tabindex", "-1")], false),
            ("span", &[], false),
        ];

        let mut expected = Vec::new();
        for (tag, attrs, interactive) in cases {
            let node = doc.create_element(tag);
            for (name, value) in attrs.iter() {
                doc.set_attribute(node, name, value);
            }
            doc.append_child(root, node).unwrap();
            if *interactive {
                expected.push(node);
            }
        }

        assert_eq!(interactive_children(&doc, root), expected);
    }

    #[test]
    fn test_denied_link_still_interactive() {
        let mut doc = Document::new();
        let link = doc.create_element("a");
        doc.set_attribute(link, "href", "/");
        doc.set_attribute(link, "tabindex", "-1");
        doc.append_child(doc.body(), link).unwrap();

        assert!(is_interactive(&doc, link));
    }
}
