//! MenuBar
//!
//! A horizontal [`Menu`] whose items open popup submenus. Only the
//! active top-level item is in the tab sequence, arrow keys wrap, and at
//! most one submenu is open at a time.

use aw_a11y::Orientation;
use aw_dom::{Event, NodeId};

use crate::component::{Component, HasActiveIndex, Setup};
use crate::menu::scan;
use crate::{ComponentId, Listener, Menu, MenuOptions, Page, SubmenuKind, WidgetResult};

pub struct MenuBar {
    menu: Menu,
}

impl MenuBar {
    pub const NAME: &'static str = "menubar";

    /// Options every menubar starts from
    pub fn default_options() -> MenuOptions {
        MenuOptions {
            orientation: Orientation::Horizontal,
            auto_close: true,
            submenus: SubmenuKind::Popup,
            roles: true,
            cycle: true,
            roving: true,
        }
    }

    pub fn new(page: &mut Page, list: NodeId, setup: Setup<Menu>) -> WidgetResult<Self> {
        Self::with_options(page, list, Self::default_options(), setup)
    }

    pub fn with_options(
        page: &mut Page,
        list: NodeId,
        options: MenuOptions,
        setup: Setup<Menu>,
    ) -> WidgetResult<Self> {
        let entries = scan(&page.document, list)?;
        let menu = Menu::build(page, list, entries, options, setup, Self::NAME, None)?;
        Ok(Self { menu })
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut Menu {
        &mut self.menu
    }
}

impl HasActiveIndex for MenuBar {
    fn active_index(&self) -> usize {
        self.menu.active_index()
    }

    fn switch_to(&mut self, page: &mut Page, index: usize) {
        self.menu.switch_to(page, index);
    }
}

impl Component for MenuBar {
    fn id(&self) -> ComponentId {
        self.menu.id()
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handle_event(&mut self, page: &mut Page, listener: &Listener, event: &mut Event) -> bool {
        self.menu.handle_event(page, listener, event)
    }

    fn destroy(&mut self, page: &mut Page) {
        self.menu.destroy(page);
    }
}
