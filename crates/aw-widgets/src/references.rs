//! Component references
//!
//! Side table answering "is this element managed, and by what". An
//! element can be claimed by several component types at once (a menu
//! item link is both a `menu` item and a `disclosure` controller).

use std::collections::BTreeMap;

use aw_dom::NodeId;

use crate::ComponentId;

#[derive(Debug, Default)]
pub struct ReferenceTable {
    entries: BTreeMap<NodeId, Vec<(&'static str, ComponentId)>>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `component` (of type `name`) manages `node`
    pub fn insert(&mut self, node: NodeId, name: &'static str, component: ComponentId) {
        let list = self.entries.entry(node).or_default();
        match list.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = component,
            None => list.push((name, component)),
        }
    }

    /// Component of type `name` managing `node`
    pub fn get(&self, node: NodeId, name: &str) -> Option<ComponentId> {
        self.entries
            .get(&node)?
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, id)| *id)
    }

    /// Component types managing `node`
    pub fn names(&self, node: NodeId) -> Vec<&'static str> {
        self.entries
            .get(&node)
            .map(|list| list.iter().map(|(n, _)| *n).collect())
            .unwrap_or_default()
    }

    pub fn is_managed(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    /// Drop every reference `component` published
    pub fn remove_owner(&mut self, component: ComponentId) {
        self.entries.retain(|_, list| {
            list.retain(|(_, id)| *id != component);
            !list.is_empty()
        });
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aw_dom::Document;

    #[test]
    fn test_one_element_many_types() {
        let mut doc = Document::new();
        let link = doc.create_element("a");
        let mut table = ReferenceTable::new();
        let menu = ComponentId::new(1);
        let disclosure = ComponentId::new(2);

        table.insert(link, "menu", menu);
        table.insert(link, "disclosure", disclosure);
        assert_eq!(table.names(link), vec!["menu", "disclosure"]);
        assert_eq!(table.get(link, "disclosure"), Some(disclosure));

        table.remove_owner(disclosure);
        assert_eq!(table.get(link, "disclosure"), None);
        assert!(table.is_managed(link));

        table.remove_owner(menu);
        assert!(table.is_empty());
    }
}
