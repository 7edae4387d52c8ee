//! Dialog
//!
//! A modal popup. While open, focus cycles inside the dialog, the rest
//! of the page content is hidden from assistive technology, and Escape
//! anywhere closes it. Content may change between openings, so the
//! interactive children are rescanned on every show.

use aw_a11y::{
    ElementPair, bool_value, interactive_children, is_interactive, resolve_pair, validate_pair,
};
use aw_dom::{Event, EventTarget, EventType, Key, NodeId};
use serde::Deserialize;

use crate::component::{
    Component, ComponentCore, ExpandedRequest, ExpandedState, HasExpandedState, Paired, Setup,
    Widget,
};
use crate::popup::{FocusTrap, TrapAction};
use crate::{ComponentId, Listener, Page, WidgetResult};

/// Dialog configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DialogOptions {
    /// Page regions outside the dialog, hidden while it is open
    #[serde(skip)]
    pub content: Vec<NodeId>,
    /// Element whose click closes the dialog
    #[serde(skip)]
    pub close_button: Option<NodeId>,
    /// When false, a click outside closes the dialog
    pub allow_outside_click: bool,
    pub focus_trap: FocusTrap,
    pub described_by: Option<String>,
    pub load_open: bool,
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            close_button: None,
            allow_outside_click: true,
            focus_trap: FocusTrap::CYCLE,
            described_by: None,
            load_open: false,
        }
    }
}

pub struct Dialog {
    core: ComponentCore<ExpandedState, ExpandedRequest>,
    controller: NodeId,
    target: NodeId,
    interactive: Vec<NodeId>,
    options: DialogOptions,
}

impl Dialog {
    /// Build from either half of an `aria-controls` pair
    pub fn new(
        page: &mut Page,
        element: NodeId,
        options: DialogOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let pair = resolve_pair(&page.document, element)?;
        Self::from_pair(page, pair, options, setup)
    }

    pub fn from_pair(
        page: &mut Page,
        pair: ElementPair,
        options: DialogOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let ElementPair { controller, target } =
            validate_pair(&page.document, pair.controller, pair.target)?;
        let state = ExpandedState {
            expanded: options.load_open,
        };
        let mut dialog = Self {
            core: ComponentCore::new(page, Self::NAME, controller, state),
            controller,
            target,
            interactive: interactive_children(&page.document, target),
            options,
        };
        dialog.attach(page);
        dialog.initialize(page, setup);
        Ok(dialog)
    }

    fn attach(&mut self, page: &mut Page) {
        self.core.add_attr(page, self.target, "role", "dialog");
        self.core.add_attr(page, self.target, "aria-modal", "true");
        self.core.add_attr(page, self.target, "tabindex", "-1");
        self.core
            .set_attr(page, self.controller, "aria-haspopup", "dialog");
        let target_id = self.core.ensure_id(page, self.target);
        self.core
            .add_attr(page, self.controller, "aria-controls", &target_id);
        if let Some(helper) = self.options.described_by.clone() {
            if page.document.get_element_by_id(&helper).is_some() {
                self.core
                    .add_attr(page, self.target, "aria-describedby", &helper);
            } else {
                tracing::warn!("dialog description #{} not found", helper);
            }
        }
        self.sync(page);

        self.core.listen_node(page, self.controller, EventType::Click);
        if !page.is_button(self.controller) {
            self.core.listen_node(page, self.controller, EventType::KeyDown);
        }
        self.core.listen_node(page, self.target, EventType::KeyDown);
        self.core.listen(page, EventTarget::Document, EventType::KeyDown);
        if !self.options.allow_outside_click {
            self.core.listen(page, EventTarget::Document, EventType::Click);
        }
        if let Some(close) = self.options.close_button {
            self.core.listen_node(page, close, EventType::Click);
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
        for &region in &self.options.content {
            if expanded {
                self.core.set_attr(page, region, "aria-hidden", "true");
            } else {
                self.core.restore_attr(page, region, "aria-hidden");
            }
        }
        if expanded {
            self.core.allow(page, &self.interactive);
        } else {
            self.core.deny(page, &self.interactive);
        }
    }

    /// Pick up content added since the last opening. Elements this dialog
    /// pulled out of the tab order no longer look interactive, so the
    /// previous children are kept while they remain inside.
    fn rescan(&mut self, page: &Page) {
        let previous = std::mem::take(&mut self.interactive);
        self.interactive = page
            .document
            .element_descendants(self.target)
            .filter(|&node| is_interactive(&page.document, node) || previous.contains(&node))
            .collect();
    }

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
        event.prevent_default();
        match action {
            TrapAction::Close => self.hide(page),
            TrapAction::FocusController => {
                page.document.focus(self.controller);
            }
            TrapAction::Cycle => {
                page.document.focus(if backward { last } else { first });
            }
        }
    }

    pub fn interactive_children(&self) -> &[NodeId] {
        &self.interactive
    }
}

impl Widget for Dialog {
    type State = ExpandedState;
    type Request = ExpandedRequest;

    const NAME: &'static str = "dialog";

    fn core(&self) -> &ComponentCore<ExpandedState, ExpandedRequest> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore<ExpandedState, ExpandedRequest> {
        &mut self.core
    }

    fn state_updated(&mut self, page: &mut Page, _previous: &ExpandedState) {
        if self.core.state().expanded {
            self.rescan(page);
        }
        self.sync(page);
        tracing::debug!("dialog {} expanded={}", self.core.id(), self.core.state().expanded);
    }

    fn focus_updated(&mut self, page: &mut Page, _previous: &ExpandedState) {
        if self.core.state().expanded {
            self.focus_first(page);
        } else if page.focus_within(self.target) || page.document.active_element().is_none() {
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

impl HasExpandedState for Dialog {
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

impl Paired for Dialog {
    fn controller(&self) -> NodeId {
        self.controller
    }

    fn target(&self) -> NodeId {
        self.target
    }
}

impl Component for Dialog {
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
        let close_button = self.options.close_button;
        match (listener.target, event.event_type()) {
            (EventTarget::Document, EventType::Click) => {
                let inside = page.document.contains(self.controller, event.target)
                    || page.document.contains(self.target, event.target);
                if expanded && !inside {
                    self.hide(page);
                }
            }
            (EventTarget::Document, EventType::KeyDown) => {
                if expanded && keyboard.is_some_and(|k| k.key == Key::Escape) {
                    event.prevent_default();
                    self.hide(page);
                }
            }
            (EventTarget::Node(node), EventType::Click) if Some(node) == close_button => {
                event.prevent_default();
                self.hide(page);
            }
            (EventTarget::Node(_), EventType::Click) => {
                event.prevent_default();
                self.show(page);
            }
            (EventTarget::Node(node), EventType::KeyDown) => {
                let Some(keyboard) = keyboard else {
                    return true;
                };
                if keyboard.modifiers.has_command() {
                    return true;
                }
                match keyboard.key {
                    Key::Tab if node == self.target && expanded => {
                        self.trap(page, event, keyboard.modifiers.shift)
                    }
                    Key::Enter | Key::Space if node == self.controller => {
                        event.prevent_default();
                        self.show(page);
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
