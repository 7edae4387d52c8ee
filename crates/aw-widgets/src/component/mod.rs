//! Component core
//!
//! Every widget holds a [`ComponentCore`] (state, lifecycle, attribute
//! tracker, event emitter, extension cleanups) and implements [`Widget`]
//! for the shared state-transition contract. Nested widgets are owned by
//! their parent and reached through [`Component::handle_event`].

mod base;
mod emitter;
mod extension;

pub use base::{ComponentCore, Lifecycle};
pub use emitter::{ComponentEvent, ComponentEventKind, ComponentRef, EventEmitter, SubscriptionId};
pub use extension::{Cleanup, Extension, Setup};

use std::fmt;

use aw_dom::{Event, NodeId};
use serde::Serialize;

use crate::{Listener, Page};

/// Component identifier, allocated by the [`Page`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ComponentId(u32);

impl ComponentId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component-{}", self.0)
    }
}

/// Object-safe face of a component, consumed by [`Page::dispatch`]
pub trait Component {
    fn id(&self) -> ComponentId;

    /// Lowercase widget name (`"popup"`, `"menu"`...)
    fn name(&self) -> &'static str;

    /// Handle an event for `listener`
    ///
    /// Returns whether the listener belongs to this component or one of
    /// its nested children. Parents forward to their children.
    fn handle_event(&mut self, page: &mut Page, listener: &Listener, event: &mut Event) -> bool;

    /// Tear down: children first, then everything this component added.
    /// Calling it twice is a no-op.
    fn destroy(&mut self, page: &mut Page);
}

/// Shared state-transition contract
pub trait Widget: Sized + 'static {
    type State: Clone + PartialEq + Serialize + 'static;
    type Request: 'static;

    const NAME: &'static str;

    fn core(&self) -> &ComponentCore<Self::State, Self::Request>;

    fn core_mut(&mut self) -> &mut ComponentCore<Self::State, Self::Request>;

    /// Bring the document's attributes in line with the new state.
    /// Runs before `stateChange` is emitted.
    fn state_updated(&mut self, page: &mut Page, previous: &Self::State);

    /// Move focus for the new state. Runs after `stateChange` subscribers,
    /// so presentation they apply (such as removing `hidden`) is in place.
    fn focus_updated(&mut self, _page: &mut Page, _previous: &Self::State) {}

    /// Act on a request a subscriber queued
    fn apply_request(&mut self, page: &mut Page, request: Self::Request);

    fn state(&self) -> &Self::State {
        self.core().state()
    }

    /// Apply `update`, sync attributes, emit `stateChange`, move focus,
    /// then act on queued requests
    ///
    /// Updates that leave the state unchanged emit nothing.
    fn set_state(&mut self, page: &mut Page, update: impl FnOnce(&mut Self::State)) {
        if self.core().lifecycle() != Lifecycle::Initialized {
            return;
        }
        let previous = self.core().state().clone();
        update(self.core_mut().state_mut());
        if *self.core().state() == previous {
            return;
        }
        self.state_updated(page, &previous);
        let requests = self.core_mut().emit(page, ComponentEventKind::StateChange);
        self.focus_updated(page, &previous);
        self.apply_requests(page, requests);
    }

    fn apply_requests(&mut self, page: &mut Page, requests: Vec<Self::Request>) {
        for request in requests {
            self.apply_request(page, request);
        }
    }

    /// Subscribe to this widget's events
    fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&mut Page, &ComponentEvent<Self::State>, &mut Vec<Self::Request>) + 'static,
    {
        self.core_mut().subscribe(subscriber)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.core_mut().unsubscribe(id)
    }

    /// Finish construction: install callbacks, emit `init`, attach
    /// extensions in order
    fn initialize(&mut self, page: &mut Page, setup: Setup<Self>) {
        let Setup {
            on_init,
            on_state_change,
            on_destroy,
            extensions,
        } = setup;
        let core = self.core_mut();
        for (kind, callback) in [
            (ComponentEventKind::Init, on_init),
            (ComponentEventKind::StateChange, on_state_change),
            (ComponentEventKind::Destroy, on_destroy),
        ] {
            if let Some(mut callback) = callback {
                core.subscribe(move |page, event, requests| {
                    if event.kind == kind {
                        callback(page, event, requests);
                    }
                });
            }
        }
        core.mark_initialized();
        tracing::debug!("{} {} initialized", Self::NAME, core.id());

        let requests = self.core_mut().emit(page, ComponentEventKind::Init);
        self.apply_requests(page, requests);

        for extension in extensions {
            let cleanup = extension.attach(self, page);
            self.core_mut().push_cleanup(cleanup);
        }
    }
}

/// Widgets with a boolean `expanded` state
pub trait HasExpandedState {
    fn expanded(&self) -> bool;

    fn show(&mut self, page: &mut Page);

    fn hide(&mut self, page: &mut Page);

    fn toggle(&mut self, page: &mut Page) {
        if self.expanded() {
            self.hide(page);
        } else {
            self.show(page);
        }
    }
}

/// Widgets with a single active item
pub trait HasActiveIndex {
    fn active_index(&self) -> usize;

    fn switch_to(&mut self, page: &mut Page, index: usize);
}

/// Widgets built on a controller/target pair
pub trait Paired {
    fn controller(&self) -> NodeId;

    fn target(&self) -> NodeId;
}

/// State that carries an expanded flag
pub trait ExpandedView {
    fn is_expanded(&self) -> bool;
}

/// State of Disclosure, Popup, Dialog and MenuButton
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExpandedState {
    pub expanded: bool,
}

impl ExpandedView for ExpandedState {
    fn is_expanded(&self) -> bool {
        self.expanded
    }
}

/// Requests subscribers can queue on an expandable widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandedRequest {
    Show,
    Hide,
}
