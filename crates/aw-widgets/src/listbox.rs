//! Listbox
//!
//! A button that opens a list of options (select-only combobox). The
//! list keeps DOM focus and points at the active option with
//! `aria-activedescendant`. Arrow keys stop at the ends, Home/End jump,
//! printable keys search, Enter/Space/click commit and close. Closing
//! writes the selected option's text onto the button.

use aw_a11y::{
    ElementPair, HasPopup, Orientation, Search, next_index, resolve_pair, validate_pair,
};
use aw_dom::{Event, EventTarget, EventType, Key, NodeId};
use serde::{Deserialize, Serialize};

use crate::component::{
    Component, ComponentCore, ExpandedView, HasActiveIndex, HasExpandedState, Paired, Setup,
    Widget,
};
use crate::popup::{Popup, PopupOptions};
use crate::{ComponentId, Listener, Page, WidgetError, WidgetResult};

/// Listbox configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListboxOptions {
    /// Option selected at construction
    pub initial_index: usize,
    /// Id of a helper element describing the button
    pub described_by: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListboxState {
    pub expanded: bool,
    /// Index of the active descendant
    pub active_index: usize,
}

impl ExpandedView for ListboxState {
    fn is_expanded(&self) -> bool {
        self.expanded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListboxRequest {
    Show,
    Hide,
    Select(usize),
}

pub struct Listbox {
    core: ComponentCore<ListboxState, ListboxRequest>,
    popup: Popup,
    controller: NodeId,
    target: NodeId,
    options: Vec<NodeId>,
    option_ids: Vec<String>,
    search: Search,
}

impl Listbox {
    /// Build from either the button or the list
    pub fn new(
        page: &mut Page,
        element: NodeId,
        config: ListboxOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let pair = resolve_pair(&page.document, element)?;
        Self::from_pair(page, pair, config, setup)
    }

    pub fn from_pair(
        page: &mut Page,
        pair: ElementPair,
        config: ListboxOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let pair = validate_pair(&page.document, pair.controller, pair.target)?;
        let options = page.document.element_children(pair.target);
        if options.is_empty() {
            return Err(WidgetError::Empty {
                widget: Self::NAME,
                what: "option",
            });
        }

        let popup_options = PopupOptions {
            kind: HasPopup::Listbox,
            described_by: config.described_by.clone(),
            ..Default::default()
        };
        let popup = Popup::from_pair(page, pair, popup_options, Setup::default())?;
        let state = ListboxState {
            expanded: false,
            active_index: config.initial_index.min(options.len() - 1),
        };
        let mut listbox = Self {
            core: ComponentCore::new(page, Self::NAME, pair.controller, state),
            popup,
            controller: pair.controller,
            target: pair.target,
            search: Search::new(options.clone()),
            options,
            option_ids: Vec::new(),
        };
        listbox.attach(page);
        listbox.initialize(page, setup);
        Ok(listbox)
    }

    fn attach(&mut self, page: &mut Page) {
        self.core.add_attr(page, self.target, "role", "listbox");
        self.core.set_attr(page, self.target, "tabindex", "-1");
        for &option in &self.options {
            self.core.add_attr(page, option, "role", "option");
            let id = self.core.ensure_id(page, option);
            self.option_ids.push(id);
        }

        let active = self.core.state().active_index;
        self.core
            .set_attr(page, self.options[active], "aria-selected", "true");
        let active_id = self.option_ids[active].clone();
        self.core
            .set_attr(page, self.target, "aria-activedescendant", &active_id);

        self.core.listen_node(page, self.controller, EventType::KeyDown);
        self.core.listen_node(page, self.target, EventType::KeyDown);
        self.core.listen_node(page, self.target, EventType::Click);
        self.core.listen_node(page, self.target, EventType::FocusOut);
        self.core.set_reference(page, self.controller);
        self.core.set_reference(page, self.target);
    }

    /// Mirror the popup's expanded flag into the listbox state
    fn sync_expanded(&mut self, page: &mut Page) {
        let expanded = self.popup.expanded();
        self.set_state(page, |s| s.expanded = expanded);
    }

    fn select(&mut self, page: &mut Page, index: usize) {
        if index < self.options.len() {
            self.set_state(page, |s| s.active_index = index);
        }
    }

    fn type_ahead(&mut self, page: &mut Page, key: char) {
        let found = self.search.get_item(&page.document, key, page.now());
        if let Some(index) = found.and_then(|item| self.option_at(page, item)) {
            self.select(page, index);
        }
    }

    /// Option under `node`, if any
    fn option_at(&self, page: &Page, node: NodeId) -> Option<usize> {
        self.options
            .iter()
            .position(|&option| page.document.contains(option, node))
    }

    pub fn options(&self) -> &[NodeId] {
        &self.options
    }

    /// Currently selected option
    pub fn active_descendant(&self) -> NodeId {
        self.options[self.core.state().active_index]
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    fn handle_own(&mut self, page: &mut Page, listener: &Listener, event: &mut Event) {
        let keyboard = event.keyboard().cloned();
        match (listener.target, event.event_type()) {
            (EventTarget::Node(node), EventType::KeyDown) => {
                let Some(keyboard) = keyboard else {
                    return;
                };
                if keyboard.modifiers.has_command() {
                    return;
                }
                if node == self.controller {
                    if matches!(keyboard.key, Key::ArrowUp | Key::ArrowDown) {
                        event.prevent_default();
                        self.show(page);
                    }
                    return;
                }

                let current = self.core.state().active_index;
                let last = self.options.len() - 1;
                if let Some(next) =
                    next_index(&keyboard.key, Orientation::Vertical, current, last, false)
                {
                    event.prevent_default();
                    self.select(page, next);
                } else if keyboard.key == Key::Space && self.search.is_pending(page.now()) {
                    // Mid-query, Space is part of a label like "El Paso"
                    event.prevent_default();
                    self.type_ahead(page, ' ');
                } else if matches!(keyboard.key, Key::Enter | Key::Space) {
                    event.prevent_default();
                    self.hide(page);
                } else if let Some(c) = keyboard.key.printable() {
                    self.type_ahead(page, c);
                }
            }
            (EventTarget::Node(_), EventType::Click) => {
                if let Some(index) = self.option_at(page, event.target) {
                    event.prevent_default();
                    self.select(page, index);
                    self.hide(page);
                }
            }
            (EventTarget::Node(_), EventType::FocusOut) => {
                let stays = event
                    .related_target()
                    .is_some_and(|related| {
                        related == self.controller || page.document.contains(self.target, related)
                    });
                if !stays {
                    self.hide(page);
                }
            }
            _ => {}
        }
    }
}

impl Widget for Listbox {
    type State = ListboxState;
    type Request = ListboxRequest;

    const NAME: &'static str = "listbox";

    fn core(&self) -> &ComponentCore<ListboxState, ListboxRequest> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore<ListboxState, ListboxRequest> {
        &mut self.core
    }

    fn state_updated(&mut self, page: &mut Page, previous: &ListboxState) {
        let state = *self.core.state();
        if state.active_index != previous.active_index {
            self.core
                .remove_attr(page, self.options[previous.active_index], "aria-selected");
            self.core
                .set_attr(page, self.options[state.active_index], "aria-selected", "true");
            let id = self.option_ids[state.active_index].clone();
            self.core
                .set_attr(page, self.target, "aria-activedescendant", &id);
        }
        if previous.expanded && !state.expanded {
            let text = page
                .document
                .text_content(self.options[state.active_index])
                .trim()
                .to_string();
            self.core.set_text(page, self.controller, &text);
        }
        tracing::debug!(
            "listbox {} expanded={} active={}",
            self.core.id(),
            state.expanded,
            state.active_index
        );
    }

    fn focus_updated(&mut self, page: &mut Page, previous: &ListboxState) {
        let expanded = self.core.state().expanded;
        if expanded && !previous.expanded {
            page.document.focus(self.target);
        } else if !expanded && page.focus_within(self.target) {
            page.document.focus(self.controller);
        }
    }

    fn apply_request(&mut self, page: &mut Page, request: ListboxRequest) {
        match request {
            ListboxRequest::Show => self.show(page),
            ListboxRequest::Hide => self.hide(page),
            ListboxRequest::Select(index) => self.select(page, index),
        }
    }
}

impl HasExpandedState for Listbox {
    fn expanded(&self) -> bool {
        self.core.state().expanded
    }

    fn show(&mut self, page: &mut Page) {
        self.popup.show(page);
        self.sync_expanded(page);
    }

    fn hide(&mut self, page: &mut Page) {
        self.popup.hide(page);
        self.sync_expanded(page);
    }
}

impl HasActiveIndex for Listbox {
    fn active_index(&self) -> usize {
        self.core.state().active_index
    }

    fn switch_to(&mut self, page: &mut Page, index: usize) {
        self.select(page, index);
    }
}

impl Paired for Listbox {
    fn controller(&self) -> NodeId {
        self.controller
    }

    fn target(&self) -> NodeId {
        self.target
    }
}

impl Component for Listbox {
    fn id(&self) -> ComponentId {
        self.core.id()
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handle_event(&mut self, page: &mut Page, listener: &Listener, event: &mut Event) -> bool {
        if listener.owner == self.core.id() {
            self.handle_own(page, listener, event);
            return true;
        }
        if self.popup.handle_event(page, listener, event) {
            self.sync_expanded(page);
            return true;
        }
        false
    }

    fn destroy(&mut self, page: &mut Page) {
        if self.core.is_destroyed() {
            return;
        }
        self.popup.destroy(page);
        self.core.teardown(page);
    }
}
