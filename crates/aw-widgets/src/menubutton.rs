//! MenuButton
//!
//! A `<button>` that opens a menu list in a popup. ArrowDown opens on
//! the first item, ArrowUp on the last; Escape inside the menu closes it
//! and returns to the button.

use aw_a11y::{ElementPair, HasPopup, resolve_pair, validate_pair};
use aw_dom::{Event, EventType, Key, NodeId};

use crate::component::{
    Component, ComponentCore, ExpandedRequest, ExpandedState, HasActiveIndex, HasExpandedState,
    Paired, Setup, Widget,
};
use crate::menu::scan;
use crate::{
    ComponentId, Listener, Menu, MenuOptions, Page, Popup, PopupOptions, WidgetError,
    WidgetResult,
};

pub struct MenuButton {
    core: ComponentCore<ExpandedState, ExpandedRequest>,
    popup: Popup,
    menu: Menu,
    controller: NodeId,
    target: NodeId,
}

impl MenuButton {
    pub fn new(
        page: &mut Page,
        element: NodeId,
        options: MenuOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let pair = resolve_pair(&page.document, element)?;
        Self::from_pair(page, pair, options, setup)
    }

    pub fn from_pair(
        page: &mut Page,
        pair: ElementPair,
        options: MenuOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let ElementPair { controller, target } =
            validate_pair(&page.document, pair.controller, pair.target)?;
        if !page.is_button(controller) {
            return Err(WidgetError::WrongElement {
                node: controller,
                expected: "button",
            });
        }
        let entries = scan(&page.document, target)?;

        let popup_options = PopupOptions {
            kind: HasPopup::Menu,
            ..Default::default()
        };
        let mut popup = Popup::from_pair(page, pair, popup_options, Setup::default())?;
        let menu_options = MenuOptions {
            roles: true,
            ..options
        };
        let menu = match Menu::build(page, target, entries, menu_options, Setup::default(), Menu::NAME, None) {
            Ok(menu) => menu,
            Err(err) => {
                popup.destroy(page);
                return Err(err);
            }
        };

        let mut button = Self {
            core: ComponentCore::new(page, Self::NAME, controller, ExpandedState::default()),
            popup,
            menu,
            controller,
            target,
        };
        button.core.listen_node(page, controller, EventType::KeyDown);
        button.core.set_reference(page, controller);
        button.initialize(page, setup);
        Ok(button)
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    fn sync_expanded(&mut self, page: &mut Page) {
        let expanded = self.popup.expanded();
        self.set_state(page, |s| s.expanded = expanded);
    }

    /// Open and focus the first (or, with `last`, the final) item
    fn open_on(&mut self, page: &mut Page, last: bool) {
        self.show(page);
        let index = if last { self.menu.links().len() - 1 } else { 0 };
        self.menu.focus_item(page, index);
    }
}

impl Widget for MenuButton {
    type State = ExpandedState;
    type Request = ExpandedRequest;

    const NAME: &'static str = "menubutton";

    fn core(&self) -> &ComponentCore<ExpandedState, ExpandedRequest> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore<ExpandedState, ExpandedRequest> {
        &mut self.core
    }

    fn state_updated(&mut self, _page: &mut Page, _previous: &ExpandedState) {
        tracing::debug!(
            "menubutton {} expanded={}",
            self.core.id(),
            self.core.state().expanded
        );
    }

    fn apply_request(&mut self, page: &mut Page, request: ExpandedRequest) {
        match request {
            ExpandedRequest::Show => self.show(page),
            ExpandedRequest::Hide => self.hide(page),
        }
    }
}

impl HasExpandedState for MenuButton {
    fn expanded(&self) -> bool {
        self.core.state().expanded
    }

    fn show(&mut self, page: &mut Page) {
        self.popup.show(page);
        self.sync_expanded(page);
    }

    fn hide(&mut self, page: &mut Page) {
        self.menu.collapse_all(page);
        self.popup.hide(page);
        self.sync_expanded(page);
    }
}

impl Paired for MenuButton {
    fn controller(&self) -> NodeId {
        self.controller
    }

    fn target(&self) -> NodeId {
        self.target
    }
}

impl Component for MenuButton {
    fn id(&self) -> ComponentId {
        self.core.id()
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handle_event(&mut self, page: &mut Page, listener: &Listener, event: &mut Event) -> bool {
        if listener.owner == self.core.id() {
            let key = event
                .keyboard()
                .filter(|k| !k.modifiers.has_command())
                .map(|k| k.key.clone());
            match key {
                Some(Key::ArrowDown) => {
                    event.prevent_default();
                    self.open_on(page, false);
                }
                Some(Key::ArrowUp) => {
                    event.prevent_default();
                    self.open_on(page, true);
                }
                _ => {}
            }
            return true;
        }
        let handled = self.popup.handle_event(page, listener, event)
            || self.menu.handle_event(page, listener, event);
        if handled {
            self.sync_expanded(page);
        }
        handled
    }

    fn destroy(&mut self, page: &mut Page) {
        if self.core.is_destroyed() {
            return;
        }
        self.menu.destroy(page);
        self.popup.destroy(page);
        self.core.teardown(page);
    }
}

impl HasActiveIndex for MenuButton {
    fn active_index(&self) -> usize {
        self.menu.active_index()
    }

    fn switch_to(&mut self, page: &mut Page, index: usize) {
        self.menu.switch_to(page, index);
    }
}
