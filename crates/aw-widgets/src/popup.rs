//! Popup
//!
//! A controller/target pair with a focus trap. Opening moves focus into
//! the target; Escape and outside clicks dismiss it.

use aw_a11y::{ElementPair, HasPopup, bool_value, interactive_children, resolve_pair, validate_pair};
use aw_dom::{Event, EventTarget, EventType, Key, NodeId};
use serde::Deserialize;

use crate::component::{
    Component, ComponentCore, ExpandedRequest, ExpandedState, HasExpandedState, Paired, Setup,
    Widget,
};
use crate::{ComponentId, Listener, Page, WidgetResult};

/// What Tab does at an edge of the trapped region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrapAction {
    /// Collapse and let focus continue past the controller
    Close,
    /// Send focus back to the controller, leaving the popup open
    FocusController,
    /// Wrap to the opposite edge
    Cycle,
}

/// Focus trap configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FocusTrap {
    pub tab_from_last: TrapAction,
    pub shift_tab_from_first: TrapAction,
}

impl FocusTrap {
    /// Keep focus inside in both directions
    pub const CYCLE: Self = Self {
        tab_from_last: TrapAction::Cycle,
        shift_tab_from_first: TrapAction::Cycle,
    };

    /// Handle Tab (or Shift+Tab, when `backward`) on `focused`
    ///
    /// `first` and `last` are the trap edges. Returns the action when
    /// `focused` sits on the relevant edge.
    pub fn action(&self, focused: NodeId, first: NodeId, last: NodeId, backward: bool) -> Option<TrapAction> {
        match backward {
            false if focused == last => Some(self.tab_from_last),
            true if focused == first => Some(self.shift_tab_from_first),
            _ => None,
        }
    }
}

impl Default for FocusTrap {
    fn default() -> Self {
        Self {
            tab_from_last: TrapAction::Close,
            shift_tab_from_first: TrapAction::FocusController,
        }
    }
}

/// Popup configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PopupOptions {
    /// `aria-haspopup` value
    #[serde(rename = "type")]
    pub kind: HasPopup,
    pub load_open: bool,
    pub focus_trap: FocusTrap,
    /// Id of a helper element describing the controller
    pub described_by: Option<String>,
}

pub struct Popup {
    core: ComponentCore<ExpandedState, ExpandedRequest>,
    controller: NodeId,
    target: NodeId,
    interactive: Vec<NodeId>,
    options: PopupOptions,
}

impl Popup {
    /// Build from either half of an `aria-controls` pair
    pub fn new(
        page: &mut Page,
        element: NodeId,
        options: PopupOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let pair = resolve_pair(&page.document, element)?;
        Self::from_pair(page, pair, options, setup)
    }

    pub fn from_pair(
        page: &mut Page,
        pair: ElementPair,
        options: PopupOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let ElementPair { controller, target } =
            validate_pair(&page.document, pair.controller, pair.target)?;
        let state = ExpandedState {
            expanded: options.load_open,
        };
        let mut popup = Self {
            core: ComponentCore::new(page, Self::NAME, controller, state),
            controller,
            target,
            interactive: interactive_children(&page.document, target),
            options,
        };
        popup.attach(page);
        popup.initialize(page, setup);
        Ok(popup)
    }

    fn attach(&mut self, page: &mut Page) {
        self.core
            .set_attr(page, self.controller, "aria-haspopup", self.options.kind.as_str());
        let target_id = self.core.ensure_id(page, self.target);
        self.core
            .add_attr(page, self.controller, "aria-controls", &target_id);
        if let Some(helper) = self.options.described_by.clone() {
            if page.document.get_element_by_id(&helper).is_some() {
                self.core
                    .add_attr(page, self.controller, "aria-describedby", &helper);
            } else {
                tracing::warn!("popup description #{} not found", helper);
            }
        }
        self.sync(page);

        self.core.listen_node(page, self.controller, EventType::Click);
        self.core.listen_node(page, self.controller, EventType::KeyDown);
        self.core.listen_node(page, self.target, EventType::KeyDown);
        self.core.listen(page, EventTarget::Document, EventType::Click);
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

    /// Focus the first interactive child, or the target itself
    fn focus_first(&self, page: &mut Page) {
        let focused = self
            .interactive
            .first()
            .is_some_and(|&first| page.document.focus(first));
        if !focused {
            page.document.focus(self.target);
        }
    }

    fn trap(&mut self, page: &mut Page, event: &mut Event, backward: bool) {
        let first = self.interactive.first().copied().unwrap_or(self.target);
        let last = self.interactive.last().copied().unwrap_or(self.target);
        let Some(action) = self
            .options
            .focus_trap
            .action(event.target, first, last, backward)
        else {
            return;
        };
        match action {
            TrapAction::Close => self.hide(page),
            TrapAction::FocusController => {
                event.prevent_default();
                page.document.focus(self.controller);
            }
            TrapAction::Cycle => {
                event.prevent_default();
                page.document.focus(if backward { last } else { first });
            }
        }
    }

    pub fn interactive_children(&self) -> &[NodeId] {
        &self.interactive
    }

    pub fn options(&self) -> &PopupOptions {
        &self.options
    }
}

impl Widget for Popup {
    type State = ExpandedState;
    type Request = ExpandedRequest;

    const NAME: &'static str = "popup";

    fn core(&self) -> &ComponentCore<ExpandedState, ExpandedRequest> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore<ExpandedState, ExpandedRequest> {
        &mut self.core
    }

    fn state_updated(&mut self, page: &mut Page, _previous: &ExpandedState) {
        self.sync(page);
        tracing::debug!("popup {} expanded={}", self.core.id(), self.core.state().expanded);
    }

    fn focus_updated(&mut self, page: &mut Page, _previous: &ExpandedState) {
        if self.core.state().expanded {
            self.focus_first(page);
        } else if page.focus_within(self.target) {
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

impl HasExpandedState for Popup {
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

impl Paired for Popup {
    fn controller(&self) -> NodeId {
        self.controller
    }

    fn target(&self) -> NodeId {
        self.target
    }
}

impl Component for Popup {
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
        let expanded = self.expanded();
        match (listener.target, event.event_type()) {
            (EventTarget::Document, EventType::Click) => {
                let inside = page.document.contains(self.controller, event.target)
                    || page.document.contains(self.target, event.target);
                if expanded && !inside {
                    self.hide(page);
                }
            }
            (EventTarget::Node(_), EventType::Click) => {
                event.prevent_default();
                self.toggle(page);
            }
            (EventTarget::Node(node), EventType::KeyDown) => {
                let Some(keyboard) = keyboard else {
                    return true;
                };
                if keyboard.modifiers.has_command() {
                    return true;
                }
                let on_controller = node == self.controller;
                match keyboard.key {
                    Key::Escape if expanded => {
                        event.prevent_default();
                        event.stop_propagation();
                        self.hide(page);
                        page.document.focus(self.controller);
                    }
                    Key::Tab if on_controller => {
                        if expanded && !keyboard.modifiers.shift {
                            event.prevent_default();
                            self.focus_first(page);
                        }
                    }
                    Key::Tab if expanded => self.trap(page, event, keyboard.modifiers.shift),
                    Key::Enter | Key::Space if on_controller && !page.is_button(self.controller) => {
                        event.prevent_default();
                        self.toggle(page);
                    }
                    _ => {}
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

    #[test]
    fn test_trap_edges() {
        let trap = FocusTrap::default();
        let (a, b) = (NodeId::ROOT, NodeId::NONE);

        assert_eq!(trap.action(b, a, b, false), Some(TrapAction::Close));
        assert_eq!(trap.action(a, a, b, true), Some(TrapAction::FocusController));
        assert_eq!(trap.action(a, a, b, false), None);
        assert_eq!(FocusTrap::CYCLE.action(b, a, b, false), Some(TrapAction::Cycle));
    }
}
