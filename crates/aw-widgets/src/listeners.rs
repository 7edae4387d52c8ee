//! Listener registry
//!
//! Components never hold callbacks inside the document. They register
//! `(target, event type)` pairs here under their [`ComponentId`], and
//! [`Page::dispatch`](crate::Page::dispatch) routes matching events back
//! to the owning component.

use aw_dom::{EventTarget, EventType};

use crate::ComponentId;

/// Listener identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u32);

/// A registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub id: ListenerId,
    pub owner: ComponentId,
    pub target: EventTarget,
    pub event: EventType,
}

/// Every live listener, in registration order
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
    next_id: u32,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn add(&mut self, owner: ComponentId, target: EventTarget, event: EventType) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            owner,
            target,
            event,
        });
        tracing::trace!("listen {:?} {} on {:?} for {}", id, event.as_str(), target, owner);
        id
    }

    /// Remove one listener
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Remove every listener `owner` registered, returning how many
    pub fn remove_owner(&mut self, owner: ComponentId) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.owner != owner);
        before - self.listeners.len()
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    /// Listeners `owner` currently has registered
    pub fn count_for(&self, owner: ComponentId) -> usize {
        self.listeners.iter().filter(|l| l.owner == owner).count()
    }

    /// Snapshot of the listeners for one propagation step
    pub fn matching(&self, target: EventTarget, event: EventType) -> Vec<Listener> {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.event == event)
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aw_dom::NodeId;

    #[test]
    fn test_registration_order_and_removal() {
        let mut registry = ListenerRegistry::new();
        let owner = ComponentId::new(1);
        let other = ComponentId::new(2);
        let node = EventTarget::Node(NodeId::ROOT);

        let first = registry.add(owner, node, EventType::Click);
        let second = registry.add(other, node, EventType::Click);
        registry.add(owner, EventTarget::Document, EventType::KeyDown);

        let ids: Vec<ListenerId> = registry
            .matching(node, EventType::Click)
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![first, second]);

        assert_eq!(registry.remove_owner(owner), 2);
        assert!(!registry.contains(first));
        assert!(registry.contains(second));
        assert!(registry.remove(second));
        assert!(registry.is_empty());
    }
}
