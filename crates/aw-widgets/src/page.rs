//! Page - host context
//!
//! Owns the document plus the process-wide pieces components share:
//! listener registry, reference side table, id generator and clock.
//! Events are delivered with [`Page::dispatch`], which walks the
//! propagation path, routes each listener to its owning component and
//! then performs the browser default action.

use std::rc::Rc;
use std::time::Duration;

use aw_a11y::{Clock, IdGenerator, SystemClock};
use aw_dom::{Document, Event, EventKind, EventTarget, Key, Modifiers, NodeId};

use crate::{Component, ComponentId, ListenerRegistry, ReferenceTable};

/// Host page
pub struct Page {
    pub document: Document,
    pub listeners: ListenerRegistry,
    pub references: ReferenceTable,
    pub ids: IdGenerator,
    clock: Rc<dyn Clock>,
    next_component: u32,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self::with_clock(document, Rc::new(SystemClock::new()))
    }

    pub fn with_clock(document: Document, clock: Rc<dyn Clock>) -> Self {
        Self {
            document,
            listeners: ListenerRegistry::new(),
            references: ReferenceTable::new(),
            ids: IdGenerator::default(),
            clock,
            next_component: 0,
        }
    }

    /// Current time on the page clock
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Focus is on `container` or inside it
    pub fn focus_within(&self, container: NodeId) -> bool {
        self.document
            .active_element()
            .is_some_and(|active| self.document.contains(container, active))
    }

    pub(crate) fn is_button(&self, node: NodeId) -> bool {
        self.document.tag_name(node) == Some("button")
    }

    pub(crate) fn allocate_component(&mut self) -> ComponentId {
        self.next_component += 1;
        ComponentId::new(self.next_component)
    }

    /// Deliver `event` and run its default action
    ///
    /// The path is the target, its ancestors, then the document.
    /// Listeners at each step run in registration order; stopping
    /// propagation ends the walk after the current step.
    pub fn dispatch(&mut self, components: &mut [&mut dyn Component], mut event: Event) -> Event {
        let mut path = vec![EventTarget::Node(event.target)];
        path.extend(
            self.document
                .tree()
                .ancestors(event.target)
                .filter(|&node| node != NodeId::ROOT)
                .map(EventTarget::Node),
        );
        path.push(EventTarget::Document);

        let event_type = event.event_type();
        for step in path {
            event.current_target = Some(step);
            for listener in self.listeners.matching(step, event_type) {
                // Removed by an earlier listener in this dispatch
                if !self.listeners.contains(listener.id) {
                    continue;
                }
                let owned = components
                    .iter_mut()
                    .any(|component| component.handle_event(self, &listener, &mut event));
                if !owned {
                    tracing::trace!("{:?} has no live owner", listener.id);
                }
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        event.current_target = None;

        if !event.is_default_prevented() {
            self.default_action(components, &event);
        }
        event
    }

    fn default_action(&mut self, components: &mut [&mut dyn Component], event: &Event) {
        let EventKind::KeyDown(keyboard) = &event.kind else {
            return;
        };
        let target = event.target;
        let tag = self.document.tag_name(target).unwrap_or_default().to_string();
        match keyboard.key {
            Key::Tab if !keyboard.modifiers.has_command() => {
                let from = self.document.active_element();
                let next = self.document.next_tabbable(from, keyboard.modifiers.shift);
                self.move_focus(components, next);
            }
            Key::Enter if tag == "button" || (tag == "a" && self.document.has_attribute(target, "href")) => {
                self.dispatch(components, Event::click(target));
            }
            Key::Space if tag == "button" => {
                self.dispatch(components, Event::click(target));
            }
            _ => {}
        }
    }

    fn move_focus(&mut self, components: &mut [&mut dyn Component], next: Option<NodeId>) {
        let previous = self.document.active_element();
        match next {
            Some(node) => {
                if !self.document.focus(node) {
                    return;
                }
            }
            None => self.document.blur(),
        }
        if previous == next {
            return;
        }
        if let Some(previous) = previous {
            self.dispatch(components, Event::focus_out(previous, next));
        }
        // A focusout listener may already have sent focus somewhere else
        if let Some(node) = next.filter(|&n| self.document.active_element() == Some(n)) {
            self.dispatch(components, Event::focus_in(node, previous));
        }
    }

    /// Focus `node`, dispatching `focusout` on the element losing focus
    /// and then `focusin` on `node`
    pub fn focus(&mut self, components: &mut [&mut dyn Component], node: NodeId) -> bool {
        if !self.document.is_focusable(node) {
            return false;
        }
        self.move_focus(components, Some(node));
        true
    }

    /// Click `node`: focus it when focusable, then dispatch `click`
    pub fn click(&mut self, components: &mut [&mut dyn Component], node: NodeId) -> Event {
        if self.document.is_focusable(node) && self.document.active_element() != Some(node) {
            self.move_focus(components, Some(node));
        }
        self.dispatch(components, Event::click(node))
    }

    /// Press `key` on the focused element (or `<body>`)
    pub fn key_down(
        &mut self,
        components: &mut [&mut dyn Component],
        key: Key,
        modifiers: Modifiers,
    ) -> Event {
        let target = self
            .document
            .active_element()
            .unwrap_or_else(|| self.document.body());
        self.dispatch(components, Event::key_down(target, key, modifiers))
    }

    /// Press a key given by its `KeyboardEvent.key` name
    pub fn press(&mut self, components: &mut [&mut dyn Component], key: &str) -> Event {
        self.key_down(components, Key::parse(key), Modifiers::NONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aw_dom::EventType;

    use crate::Listener;

    /// Logs every event routed to it
    struct Recorder {
        id: ComponentId,
        seen: Vec<(EventType, NodeId, Option<NodeId>)>,
    }

    impl Component for Recorder {
        fn id(&self) -> ComponentId {
            self.id
        }

        fn name(&self) -> &'static str {
            "recorder"
        }

        fn handle_event(&mut self, _page: &mut Page, listener: &Listener, event: &mut Event) -> bool {
            if listener.owner != self.id {
                return false;
            }
            self.seen
                .push((event.event_type(), event.target, event.related_target()));
            true
        }

        fn destroy(&mut self, page: &mut Page) {
            page.listeners.remove_owner(self.id);
        }
    }

    fn two_buttons() -> (Page, NodeId, NodeId) {
        let mut doc = Document::new();
        let first = doc.create_element("button");
        let second = doc.create_element("button");
        doc.append_child(doc.body(), first).unwrap();
        doc.append_child(doc.body(), second).unwrap();
        (Page::new(doc), first, second)
    }

    #[test]
    fn test_focus_dispatches_focusout_then_focusin() {
        let (mut page, first, second) = two_buttons();
        let mut recorder = Recorder {
            id: page.allocate_component(),
            seen: Vec::new(),
        };
        for event in [EventType::FocusIn, EventType::FocusOut] {
            page.listeners.add(recorder.id, EventTarget::Document, event);
        }

        assert!(page.focus(&mut [&mut recorder], first));
        assert!(page.focus(&mut [&mut recorder], second));
        assert!(page.focus(&mut [&mut recorder], second));

        assert_eq!(
            recorder.seen,
            vec![
                (EventType::FocusIn, first, None),
                (EventType::FocusOut, first, Some(second)),
                (EventType::FocusIn, second, Some(first)),
            ]
        );
    }

    #[test]
    fn test_tab_moves_focus_in_order() {
        let (mut page, first, second) = two_buttons();
        let mut recorder = Recorder {
            id: page.allocate_component(),
            seen: Vec::new(),
        };
        page.listeners
            .add(recorder.id, EventTarget::Document, EventType::FocusIn);

        page.focus(&mut [&mut recorder], first);
        page.press(&mut [&mut recorder], "Tab");

        assert_eq!(page.document.active_element(), Some(second));
        assert_eq!(recorder.seen.last(), Some(&(EventType::FocusIn, second, Some(first))));
    }
}
