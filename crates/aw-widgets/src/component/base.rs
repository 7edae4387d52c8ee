//! ComponentCore - state, lifecycle and undo bookkeeping

use aw_a11y::{AttributeTracker, allow, deny, roving_tab_index};
use aw_dom::{EventTarget, EventType, NodeId};

use crate::component::{
    Cleanup, ComponentEvent, ComponentEventKind, ComponentRef, EventEmitter, SubscriptionId,
};
use crate::{ComponentId, ListenerId, Page};

/// Component lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Destroyed,
}

/// State and bookkeeping shared by every widget
pub struct ComponentCore<S, R> {
    id: ComponentId,
    name: &'static str,
    element: NodeId,
    lifecycle: Lifecycle,
    state: S,
    tracker: AttributeTracker,
    emitter: EventEmitter<S, R>,
    cleanups: Vec<Cleanup>,
}

impl<S: Clone, R> ComponentCore<S, R> {
    /// Allocate an id from the page; nothing is written yet
    pub fn new(page: &mut Page, name: &'static str, element: NodeId, state: S) -> Self {
        Self {
            id: page.allocate_component(),
            name,
            element,
            lifecycle: Lifecycle::Uninitialized,
            state,
            tracker: AttributeTracker::new(),
            emitter: EventEmitter::new(),
            cleanups: Vec::new(),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn component_ref(&self) -> ComponentRef {
        ComponentRef {
            id: self.id,
            name: self.name,
            element: self.element,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    pub(crate) fn mark_initialized(&mut self) {
        if self.lifecycle == Lifecycle::Uninitialized {
            self.lifecycle = Lifecycle::Initialized;
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn tracker(&self) -> &AttributeTracker {
        &self.tracker
    }

    // Attribute writes, all recorded for teardown

    pub fn add_attr(&mut self, page: &mut Page, node: NodeId, name: &str, value: &str) -> bool {
        self.tracker
            .add_attribute(&mut page.document, node, name, Some(value))
    }

    pub fn set_attr(&mut self, page: &mut Page, node: NodeId, name: &str, value: &str) {
        self.tracker
            .update_attribute(&mut page.document, node, name, Some(value));
    }

    pub fn remove_attr(&mut self, page: &mut Page, node: NodeId, name: &str) {
        self.tracker
            .update_attribute(&mut page.document, node, name, None);
    }

    pub fn restore_attr(&mut self, page: &mut Page, node: NodeId, name: &str) {
        self.tracker.restore(&mut page.document, node, name);
    }

    /// Id of `node`, generating a tracked one if it has none
    pub fn ensure_id(&mut self, page: &mut Page, node: NodeId) -> String {
        self.tracker
            .ensure_id(&mut page.document, &mut page.ids, node)
            .unwrap_or_default()
    }

    pub fn set_text(&mut self, page: &mut Page, node: NodeId, text: &str) {
        self.tracker.set_text(&mut page.document, node, text);
    }

    pub fn deny(&mut self, page: &mut Page, items: &[NodeId]) {
        deny(&mut page.document, &mut self.tracker, items);
    }

    pub fn allow(&mut self, page: &mut Page, items: &[NodeId]) {
        allow(&mut page.document, &mut self.tracker, items);
    }

    pub fn rove(&mut self, page: &mut Page, all: &[NodeId], allowed: &[NodeId]) {
        roving_tab_index(&mut page.document, &mut self.tracker, all, allowed);
    }

    // Listeners and references

    pub fn listen(&self, page: &mut Page, target: EventTarget, event: EventType) -> ListenerId {
        page.listeners.add(self.id, target, event)
    }

    pub fn listen_node(&self, page: &mut Page, node: NodeId, event: EventType) -> ListenerId {
        self.listen(page, EventTarget::Node(node), event)
    }

    /// Publish that this component manages `node`
    pub fn set_reference(&self, page: &mut Page, node: NodeId) {
        page.references.insert(node, self.name, self.id);
    }

    // Events

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&mut Page, &ComponentEvent<S>, &mut Vec<R>) + 'static,
    {
        self.emitter.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.emitter.unsubscribe(id)
    }

    /// Emit `kind` with the current state, returning queued requests
    pub fn emit(&mut self, page: &mut Page, kind: ComponentEventKind) -> Vec<R> {
        let event = ComponentEvent {
            kind,
            component: self.component_ref(),
            state: self.state.clone(),
        };
        tracing::trace!("emit {}", event.name());
        self.emitter.emit(page, &event)
    }

    pub(crate) fn push_cleanup(&mut self, cleanup: Cleanup) {
        self.cleanups.push(cleanup);
    }

    /// Undo everything this component did
    ///
    /// Extension cleanups (newest first), listeners, references, tracked
    /// attributes, then the `destroy` event. Nested children must already
    /// be destroyed.
    pub fn teardown(&mut self, page: &mut Page) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        while let Some(cleanup) = self.cleanups.pop() {
            cleanup(page);
        }
        let listeners = page.listeners.remove_owner(self.id);
        page.references.remove_owner(self.id);
        self.tracker.remove_all(&mut page.document);
        self.lifecycle = Lifecycle::Destroyed;

        let _ = self.emit(page, ComponentEventKind::Destroy);
        self.emitter.clear();
        tracing::debug!(
            "{} {} destroyed ({} listeners removed)",
            self.name,
            self.id,
            listeners
        );
    }
}
