//! Disclosure
//!
//! A controller that shows and hides a target region. Opening leaves
//! focus where it is; there is no focus trap.

use aw_a11y::{ElementPair, bool_value, interactive_children, resolve_pair, validate_pair};
use aw_dom::{Event, EventTarget, EventType, Key, NodeId};
use serde::Deserialize;

use crate::component::{
    Component, ComponentCore, ExpandedRequest, ExpandedState, HasExpandedState, Paired, Setup,
    Widget,
};
use crate::{ComponentId, Listener, Page, WidgetResult};

/// Disclosure configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisclosureOptions {
    /// Start expanded
    pub load_open: bool,
    /// When false, a click outside controller and target collapses it
    pub allow_outside_click: bool,
}

impl Default for DisclosureOptions {
    fn default() -> Self {
        Self {
            load_open: false,
            allow_outside_click: true,
        }
    }
}

pub struct Disclosure {
    core: ComponentCore<ExpandedState, ExpandedRequest>,
    controller: NodeId,
    target: NodeId,
    interactive: Vec<NodeId>,
    options: DisclosureOptions,
}

impl Disclosure {
    /// Build from either half of an `aria-controls` pair
    pub fn new(
        page: &mut Page,
        element: NodeId,
        options: DisclosureOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let pair = resolve_pair(&page.document, element)?;
        Self::from_pair(page, pair, options, setup)
    }

    pub fn from_pair(
        page: &mut Page,
        pair: ElementPair,
        options: DisclosureOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let ElementPair { controller, target } =
            validate_pair(&page.document, pair.controller, pair.target)?;
        let state = ExpandedState {
            expanded: options.load_open,
        };
        let mut disclosure = Self {
            core: ComponentCore::new(page, Self::NAME, controller, state),
            controller,
            target,
            interactive: interactive_children(&page.document, target),
            options,
        };
        disclosure.attach(page);
        disclosure.initialize(page, setup);
        Ok(disclosure)
    }

    fn attach(&mut self, page: &mut Page) {
        let target_id = self.core.ensure_id(page, self.target);
        self.core
            .add_attr(page, self.controller, "aria-controls", &target_id);
        self.sync(page);

        self.core.listen_node(page, self.controller, EventType::Click);
        if !page.is_button(self.controller) {
            self.core.listen_node(page, self.controller, EventType::KeyDown);
        }
        if !self.options.allow_outside_click {
            self.core.listen(page, EventTarget::Document, EventType::Click);
        }
        self.core.set_reference(page, self.controller);
        self.core.set_reference(page, self.target);
    }

    fn sync(&mut self, page: &mut Page) {
        let expanded = self.core.state().expanded;
        self.core
            .set_attr(page, self.controller, "aria-expanded", bool_value(expanded));
        self.core
            .set_attr(page, self.target, "aria-hidden", bool_value(!expanded));
        if expanded {
            self.core.allow(page, &self.interactive);
        } else {
            self.core.deny(page, &self.interactive);
        }
    }

    /// Interactive descendants of the target, as scanned at construction
    pub fn interactive_children(&self) -> &[NodeId] {
        &self.interactive
    }
}

impl Widget for Disclosure {
    type State = ExpandedState;
    type Request = ExpandedRequest;

    const NAME: &'static str = "disclosure";

    fn core(&self) -> &ComponentCore<ExpandedState, ExpandedRequest> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore<ExpandedState, ExpandedRequest> {
        &mut self.core
    }

    fn state_updated(&mut self, page: &mut Page, _previous: &ExpandedState) {
        self.sync(page);
        tracing::debug!("disclosure {} expanded={}", self.core.id(), self.core.state().expanded);
    }

    fn focus_updated(&mut self, page: &mut Page, _previous: &ExpandedState) {
        if !self.core.state().expanded && page.focus_within(self.target) {
            page.document.focus(self.controller);
        }
    }

    fn apply_request(&mut self, page: &mut Page, request: ExpandedRequest) {
        match request {
            ExpandedRequest::Show => self.show(page),
            ExpandedRequest::Hide => self.hide(page),
        }
    }
}

impl HasExpandedState for Disclosure {
    fn expanded(&self) -> bool {
        self.core.state().expanded
    }

    fn show(&mut self, page: &mut Page) {
        self.set_state(page, |s| s.expanded = true);
    }

    fn hide(&mut self, page: &mut Page) {
        self.set_state(page, |s| s.expanded = false);
    }
}

impl Paired for Disclosure {
    fn controller(&self) -> NodeId {
        self.controller
    }

    fn target(&self) -> NodeId {
        self.target
    }
}

impl Component for Disclosure {
    fn id(&self) -> ComponentId {
        self.core.id()
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handle_event(&mut self, page: &mut Page, listener: &Listener, event: &mut Event) -> bool {
        if listener.owner != self.core.id() {
            return false;
        }
        let keyboard = event.keyboard().cloned();
        match (listener.target, event.event_type()) {
            (EventTarget::Document, EventType::Click) => {
                let inside = page.document.contains(self.controller, event.target)
                    || page.document.contains(self.target, event.target);
                if !inside {
                    self.hide(page);
                }
            }
            (EventTarget::Node(_), EventType::Click) => {
                event.prevent_default();
                self.toggle(page);
            }
            (EventTarget::Node(_), EventType::KeyDown) => {
                if let Some(keyboard) = keyboard {
                    if matches!(keyboard.key, Key::Enter | Key::Space)
                        && !keyboard.modifiers.has_command()
                    {
                        event.prevent_default();
                        self.toggle(page);
                    }
                }
            }
            _ => {}
        }
        true
    }

    fn destroy(&mut self, page: &mut Page) {
        self.core.teardown(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (Page, NodeId, NodeId) {
        let doc = fixture();
        let button = doc.get_element_by_id("toggle").unwrap();
        let panel = doc.get_element_by_id("panel").unwrap();
        (Page::new(doc), button, panel)
    }

    fn fixture() -> aw_dom::Document {
        let mut doc = aw_dom::Document::new();
        let button = doc.create_element("button");
        doc.set_attribute(button, "id", "toggle");
        doc.set_attribute(button, "aria-controls", "panel");
        let panel = doc.create_element("div");
        doc.set_attribute(panel, "id", "panel");
        let link = doc.create_element("a");
        doc.set_attribute(link, "href", "/more");
        doc.append_child(panel, link).unwrap();
        doc.append_child(doc.body(), button).unwrap();
        doc.append_child(doc.body(), panel).unwrap();
        doc
    }

    #[test]
    fn test_initial_attributes() {
        let (mut page, button, panel) = page();
        let disclosure =
            Disclosure::new(&mut page, button, DisclosureOptions::default(), Setup::default())
                .unwrap();

        assert!(!disclosure.expanded());
        assert_eq!(page.document.get_attribute(button, "aria-expanded"), Some("false"));
        assert_eq!(page.document.get_attribute(panel, "aria-hidden"), Some("true"));
        assert_eq!(disclosure.interactive_children().len(), 1);
        assert_eq!(page.references.get(panel, "disclosure"), Some(disclosure.id()));
    }

    #[test]
    fn test_hide_returns_focus_to_controller() {
        let (mut page, button, _) = page();
        let mut disclosure = Disclosure::new(
            &mut page,
            button,
            DisclosureOptions {
                load_open: true,
                ..Default::default()
            },
            Setup::default(),
        )
        .unwrap();
        let link = disclosure.interactive_children()[0];
        assert!(page.document.focus(link));

        disclosure.hide(&mut page);
        assert_eq!(page.document.active_element(), Some(button));
    }
}
