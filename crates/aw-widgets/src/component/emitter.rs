//! Typed event emitter
//!
//! Events are namespaced by widget (`popup.stateChange`, `tablist.init`)
//! and carry a snapshot of the state. Subscribers may queue typed
//! requests that the widget applies once emission is over.

use aw_dom::NodeId;
use serde::Serialize;

use crate::{ComponentId, Page};

/// Lifecycle and interaction events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentEventKind {
    Init,
    StateChange,
    Destroy,
    /// Roving focus moved to `index` without a state transition
    FocusMove { index: usize },
}

impl ComponentEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::StateChange => "stateChange",
            Self::Destroy => "destroy",
            Self::FocusMove { .. } => "focusMove",
        }
    }
}

/// The instance an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentRef {
    pub id: ComponentId,
    pub name: &'static str,
    /// Element the component was constructed on
    pub element: NodeId,
}

/// Event emitted by a component
#[derive(Debug, Clone, Serialize)]
pub struct ComponentEvent<S> {
    pub kind: ComponentEventKind,
    pub component: ComponentRef,
    pub state: S,
}

impl<S> ComponentEvent<S> {
    /// Namespaced event name, e.g. `"disclosure.stateChange"`
    pub fn name(&self) -> String {
        format!("{}.{}", self.component.name, self.kind.as_str())
    }
}

/// Subscription handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Subscriber<S, R> = Box<dyn FnMut(&mut Page, &ComponentEvent<S>, &mut Vec<R>)>;

/// Per-instance synchronous emitter
pub struct EventEmitter<S, R> {
    subscribers: Vec<(SubscriptionId, Subscriber<S, R>)>,
    next_id: u32,
}

impl<S, R> EventEmitter<S, R> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&mut Page, &ComponentEvent<S>, &mut Vec<R>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Call every subscriber in subscription order, collecting requests
    pub fn emit(&mut self, page: &mut Page, event: &ComponentEvent<S>) -> Vec<R> {
        let mut requests = Vec::new();
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(page, event, &mut requests);
        }
        requests
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<S, R> Default for EventEmitter<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use aw_dom::Document;

    fn event(kind: ComponentEventKind) -> ComponentEvent<u8> {
        ComponentEvent {
            kind,
            component: ComponentRef {
                id: ComponentId::new(7),
                name: "tablist",
                element: NodeId::ROOT,
            },
            state: 3,
        }
    }

    #[test]
    fn test_namespaced_names() {
        assert_eq!(event(ComponentEventKind::Init).name(), "tablist.init");
        assert_eq!(
            event(ComponentEventKind::FocusMove { index: 1 }).name(),
            "tablist.focusMove"
        );
    }

    #[test]
    fn test_emit_in_order_and_collect_requests() {
        let mut page = Page::new(Document::new());
        let mut emitter: EventEmitter<u8, &'static str> = EventEmitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = seen.clone();
        let first = emitter.subscribe(move |_, e, _| log.borrow_mut().push(("first", e.state)));
        let log = seen.clone();
        emitter.subscribe(move |_, e, requests| {
            log.borrow_mut().push(("second", e.state));
            requests.push("switch");
        });

        let requests = emitter.emit(&mut page, &event(ComponentEventKind::StateChange));
        assert_eq!(requests, vec!["switch"]);
        assert_eq!(*seen.borrow(), vec![("first", 3), ("second", 3)]);

        assert!(emitter.unsubscribe(first));
        assert_eq!(emitter.len(), 1);
    }
}
