//! Menu
//!
//! A list of links, possibly nesting further lists. Every list item
//! whose link is directly followed by a `<ul>`/`<ol>` gets a nested
//! [`Menu`], shown through a [`Presenter`]. Arrow keys move along a
//! list, drill into a submenu and come back out; type-ahead stays within
//! one list.

mod presenter;

pub use presenter::{Presenter, SubmenuKind};

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use aw_a11y::{Direction, ElementPair, Orientation, Search, next_index};
use aw_dom::{Document, Event, Key, NodeId};
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentCore, HasActiveIndex, Setup, Widget};
use crate::{ComponentId, Listener, Page, WidgetError, WidgetResult};
use presenter::OpenQueue;

/// Menu configuration
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuOptions {
    pub orientation: Orientation,
    /// Opening one submenu collapses its siblings
    pub auto_close: bool,
    pub submenus: SubmenuKind,
    /// Apply `menu`/`menubar`/`menuitem`/`none` roles
    pub roles: bool,
    /// Arrow keys wrap at the ends
    pub cycle: bool,
    /// Keep only the active item in the tab sequence
    pub roving: bool,
}

impl MenuOptions {
    /// Options for lists nested below a menu with these options
    fn nested(&self) -> Self {
        Self {
            orientation: Orientation::Vertical,
            roving: false,
            ..*self
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuState {
    /// Item that last received focus
    pub active_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRequest {
    Focus(usize),
    Expand(usize),
    Collapse(usize),
}

/// One scanned list item
#[derive(Debug)]
pub(crate) struct Entry {
    item: NodeId,
    link: NodeId,
    submenu: Option<(NodeId, Vec<Entry>)>,
}

fn is_list(doc: &Document, node: NodeId) -> bool {
    matches!(doc.tag_name(node), Some("ul" | "ol"))
}

/// Read the menu structure under `list` without touching it
pub(crate) fn scan(doc: &Document, list: NodeId) -> WidgetResult<Vec<Entry>> {
    if !doc.is_element(list) {
        return Err(aw_a11y::A11yError::MissingElement(list).into());
    }
    if !is_list(doc, list) {
        return Err(WidgetError::WrongElement {
            node: list,
            expected: "ul",
        });
    }

    let mut entries = Vec::new();
    for item in doc.element_children(list) {
        let Some(link) = doc.first_element_child(item) else {
            tracing::warn!("menu item {} has no link, skipping", item);
            continue;
        };
        let submenu = match doc.next_element_sibling(link) {
            Some(nested) if is_list(doc, nested) => Some((nested, scan(doc, nested)?)),
            _ => None,
        };
        entries.push(Entry {
            item,
            link,
            submenu,
        });
    }
    if entries.is_empty() {
        return Err(WidgetError::Empty {
            widget: Menu::NAME,
            what: "item",
        });
    }
    Ok(entries)
}

/// How a nested menu hands control back to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// Back to the invoking item
    Return,
    /// On to the invoking item's neighbor in a horizontal parent
    Adjacent(Direction),
}

struct Submenu {
    presenter: Presenter,
    menu: Menu,
}

impl Submenu {
    fn build(
        page: &mut Page,
        link: NodeId,
        list: NodeId,
        entries: Vec<Entry>,
        options: &MenuOptions,
    ) -> WidgetResult<Self> {
        let pair = ElementPair {
            controller: link,
            target: list,
        };
        let mut presenter = Presenter::new(page, options.submenus, pair)?;
        let nested = Menu::build(
            page,
            list,
            entries,
            options.nested(),
            Setup::default(),
            Menu::NAME,
            Some(options.orientation),
        );
        match nested {
            Ok(menu) => Ok(Self { presenter, menu }),
            Err(err) => {
                presenter.destroy(page);
                Err(err)
            }
        }
    }

    fn handle_event(&mut self, page: &mut Page, listener: &Listener, event: &mut Event) -> bool {
        self.presenter.handle_event(page, listener, event)
            || self.menu.handle_event(page, listener, event)
    }

    fn destroy(&mut self, page: &mut Page) {
        self.menu.destroy(page);
        self.presenter.destroy(page);
    }
}

pub struct Menu {
    core: ComponentCore<MenuState, MenuRequest>,
    list: NodeId,
    items: Vec<NodeId>,
    links: Vec<NodeId>,
    submenus: Vec<Option<Submenu>>,
    options: MenuOptions,
    /// Orientation of the parent list, for nested menus
    parent: Option<Orientation>,
    search: Search,
    /// Set when a key asked to leave this (nested) menu
    exit: Option<Exit>,
    opened: OpenQueue,
}

impl Menu {
    pub fn new(
        page: &mut Page,
        list: NodeId,
        options: MenuOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let entries = scan(&page.document, list)?;
        Self::build(page, list, entries, options, setup, Self::NAME, None)
    }

    pub(crate) fn build(
        page: &mut Page,
        list: NodeId,
        entries: Vec<Entry>,
        options: MenuOptions,
        setup: Setup<Self>,
        name: &'static str,
        parent: Option<Orientation>,
    ) -> WidgetResult<Self> {
        let opened: OpenQueue = Rc::new(RefCell::new(VecDeque::new()));
        let mut items = Vec::with_capacity(entries.len());
        let mut links = Vec::with_capacity(entries.len());
        let mut submenus: Vec<Option<Submenu>> = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            items.push(entry.item);
            links.push(entry.link);
            let submenu = match entry.submenu {
                Some((nested, children)) => {
                    match Submenu::build(page, entry.link, nested, children, &options) {
                        Ok(mut submenu) => {
                            submenu.presenter.watch(index, opened.clone());
                            Some(submenu)
                        }
                        Err(err) => {
                            for built in submenus.iter_mut().flatten() {
                                built.destroy(page);
                            }
                            return Err(err);
                        }
                    }
                }
                None => None,
            };
            submenus.push(submenu);
        }

        let mut menu = Self {
            core: ComponentCore::new(page, name, list, MenuState::default()),
            list,
            search: Search::new(links.clone()),
            items,
            links,
            submenus,
            options,
            parent,
            exit: None,
            opened,
        };
        menu.attach(page);
        menu.initialize(page, setup);
        Ok(menu)
    }

    fn attach(&mut self, page: &mut Page) {
        if self.options.roles {
            let role = if self.core.name() == "menubar" { "menubar" } else { "menu" };
            self.core.add_attr(page, self.list, "role", role);
            let natural = if role == "menubar" {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            if self.options.orientation != natural {
                self.core.add_attr(
                    page,
                    self.list,
                    "aria-orientation",
                    self.options.orientation.as_str(),
                );
            }
            for (&item, &link) in self.items.iter().zip(&self.links) {
                self.core.add_attr(page, item, "role", "none");
                self.core.add_attr(page, link, "role", "menuitem");
            }
        }
        for &link in &self.links {
            self.core.listen_node(page, link, aw_dom::EventType::KeyDown);
            self.core.set_reference(page, link);
        }
        self.core.set_reference(page, self.list);
        self.rove(page);
    }

    fn rove(&mut self, page: &mut Page) {
        if self.options.roving {
            let active = self.links[self.core.state().active_index];
            let links = self.links.clone();
            self.core.rove(page, &links, &[active]);
        }
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    /// Nested menu under item `index`
    pub fn submenu(&self, index: usize) -> Option<&Menu> {
        self.submenus.get(index)?.as_ref().map(|s| &s.menu)
    }

    pub fn submenu_mut(&mut self, index: usize) -> Option<&mut Menu> {
        self.submenus.get_mut(index)?.as_mut().map(|s| &mut s.menu)
    }

    /// How the submenu under item `index` is shown
    pub fn presenter(&self, index: usize) -> Option<&Presenter> {
        self.submenus.get(index)?.as_ref().map(|s| &s.presenter)
    }

    /// Whether the submenu under `index` exists and is showing
    pub fn submenu_expanded(&self, index: usize) -> bool {
        self.presenter(index).is_some_and(Presenter::expanded)
    }

    /// Make item `index` active and focus its link
    pub fn focus_item(&mut self, page: &mut Page, index: usize) {
        let Some(&link) = self.links.get(index) else {
            return;
        };
        self.set_state(page, |s| s.active_index = index);
        page.document.focus(link);
    }

    pub fn expand_submenu(&mut self, page: &mut Page, index: usize) {
        if let Some(Some(submenu)) = self.submenus.get_mut(index) {
            submenu.presenter.expand(page);
        }
        self.close_siblings(page);
    }

    /// Collapse the submenu under `index` and everything below it
    pub fn collapse_submenu(&mut self, page: &mut Page, index: usize) {
        if let Some(Some(submenu)) = self.submenus.get_mut(index) {
            submenu.menu.collapse_all(page);
            submenu.presenter.collapse(page);
        }
    }

    pub fn collapse_all(&mut self, page: &mut Page) {
        for index in 0..self.submenus.len() {
            self.collapse_submenu(page, index);
        }
    }

    /// Open the submenu under `index` and focus its first or last item
    fn drill(&mut self, page: &mut Page, index: usize, to: Direction) {
        self.set_state(page, |s| s.active_index = index);
        self.expand_submenu(page, index);
        if let Some(Some(submenu)) = self.submenus.get_mut(index) {
            let last = submenu.menu.links.len() - 1;
            let target = if to == Direction::Last { last } else { 0 };
            submenu.menu.focus_item(page, target);
        }
    }

    fn drill_direction(&self, index: usize, key: &Key) -> Option<Direction> {
        self.submenus.get(index)?.as_ref()?;
        match (self.options.orientation, key) {
            (Orientation::Vertical, Key::ArrowRight | Key::ArrowDown) => Some(Direction::First),
            (Orientation::Horizontal, Key::ArrowDown) => Some(Direction::First),
            (Orientation::Horizontal, Key::ArrowUp) => Some(Direction::Last),
            _ => None,
        }
    }

    /// Whether `key` on item `index` leaves this nested menu, and how
    fn exit_for(&self, index: usize, key: &Key) -> Option<Exit> {
        let parent = self.parent?;
        let last = self.links.len() - 1;
        match (parent, key) {
            (_, Key::Escape) => Some(Exit::Return),
            (Orientation::Vertical, Key::ArrowLeft) => Some(Exit::Return),
            (Orientation::Horizontal, Key::ArrowLeft) => Some(Exit::Adjacent(Direction::Previous)),
            (Orientation::Horizontal, Key::ArrowRight) => Some(Exit::Adjacent(Direction::Next)),
            (_, Key::ArrowUp) if index == 0 => Some(Exit::Return),
            (Orientation::Vertical, Key::ArrowDown) if index == last && !self.options.cycle => {
                Some(Exit::Adjacent(Direction::Next))
            }
            _ => None,
        }
    }

    fn exit_submenu(&mut self, page: &mut Page, index: usize, exit: Exit) {
        self.collapse_submenu(page, index);
        match exit {
            Exit::Return => self.focus_item(page, index),
            Exit::Adjacent(direction) => {
                let last = self.links.len() - 1;
                let next = direction.apply(index, last, self.options.cycle);
                // Moving across a horizontal bar keeps the submenu open
                let reopen = self.options.orientation == Orientation::Horizontal
                    && self.presenter(next).is_some_and(Presenter::is_collapsible);
                if reopen {
                    self.drill(page, next, Direction::First);
                } else {
                    self.focus_item(page, next);
                }
            }
        }
    }

    /// Enforce `auto_close` for submenus that opened since the last call
    fn close_siblings(&mut self, page: &mut Page) {
        let opened: Vec<usize> = self.opened.borrow_mut().drain(..).collect();
        if !self.options.auto_close {
            return;
        }
        for index in opened {
            for other in 0..self.submenus.len() {
                let collapsible = self
                    .presenter(other)
                    .is_some_and(|p| p.is_collapsible() && p.expanded());
                if other != index && collapsible {
                    self.collapse_submenu(page, other);
                }
            }
        }
    }

    fn handle_key(&mut self, page: &mut Page, index: usize, event: &mut Event) {
        let Some(keyboard) = event.keyboard().cloned() else {
            return;
        };
        if keyboard.modifiers.has_command() || event.is_default_prevented() {
            return;
        }
        let key = &keyboard.key;
        let last = self.links.len() - 1;

        let handled = if let Some(to) = self.drill_direction(index, key) {
            self.drill(page, index, to);
            true
        } else if let Some(exit) = self.exit_for(index, key) {
            self.exit = Some(exit);
            true
        } else if let Some(next) =
            next_index(key, self.options.orientation, index, last, self.options.cycle)
        {
            self.focus_item(page, next);
            true
        } else if let Some(c) = key.printable() {
            let found = self.search.get_item(&page.document, c, page.now());
            match found.and_then(|link| self.links.iter().position(|&l| l == link)) {
                Some(next) => {
                    self.focus_item(page, next);
                    true
                }
                None => false,
            }
        } else {
            false
        };

        if handled {
            event.prevent_default();
            event.stop_propagation();
        }
    }
}

impl Widget for Menu {
    type State = MenuState;
    type Request = MenuRequest;

    const NAME: &'static str = "menu";

    fn core(&self) -> &ComponentCore<MenuState, MenuRequest> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore<MenuState, MenuRequest> {
        &mut self.core
    }

    fn state_updated(&mut self, page: &mut Page, _previous: &MenuState) {
        self.rove(page);
        tracing::debug!(
            "{} {} active={}",
            self.core.name(),
            self.core.id(),
            self.core.state().active_index
        );
    }

    fn apply_request(&mut self, page: &mut Page, request: MenuRequest) {
        match request {
            MenuRequest::Focus(index) => self.focus_item(page, index),
            MenuRequest::Expand(index) => self.expand_submenu(page, index),
            MenuRequest::Collapse(index) => self.collapse_submenu(page, index),
        }
    }
}

impl HasActiveIndex for Menu {
    fn active_index(&self) -> usize {
        self.core.state().active_index
    }

    fn switch_to(&mut self, page: &mut Page, index: usize) {
        self.focus_item(page, index);
    }
}

impl Component for Menu {
    fn id(&self) -> ComponentId {
        self.core.id()
    }

    fn name(&self) -> &'static str {
        self.core.name()
    }

    fn handle_event(&mut self, page: &mut Page, listener: &Listener, event: &mut Event) -> bool {
        if listener.owner == self.core.id() {
            let index = listener
                .target
                .node()
                .and_then(|node| self.links.iter().position(|&link| link == node));
            if let Some(index) = index {
                self.handle_key(page, index, event);
            }
            self.close_siblings(page);
            return true;
        }

        let mut owner = None;
        for (index, submenu) in self.submenus.iter_mut().enumerate() {
            if let Some(submenu) = submenu {
                if submenu.handle_event(page, listener, event) {
                    owner = Some(index);
                    break;
                }
            }
        }
        let Some(index) = owner else {
            return false;
        };
        let exit = self.submenus[index]
            .as_mut()
            .and_then(|submenu| submenu.menu.exit.take());
        if let Some(exit) = exit {
            self.exit_submenu(page, index, exit);
        }
        self.close_siblings(page);
        true
    }

    fn destroy(&mut self, page: &mut Page) {
        if self.core.is_destroyed() {
            return;
        }
        for submenu in self.submenus.iter_mut().flatten() {
            submenu.destroy(page);
        }
        self.core.teardown(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_list(doc: &mut Document) -> NodeId {
        let outer = doc.create_element("ul");
        doc.append_child(doc.body(), outer).unwrap();
        for label in ["File", "Edit"] {
            let li = doc.create_element("li");
            let a = doc.create_element("a");
            doc.set_attribute(a, "href", "#");
            let text = doc.create_text(label);
            doc.append_child(a, text).unwrap();
            doc.append_child(li, a).unwrap();
            doc.append_child(outer, li).unwrap();
        }
        let first = doc.first_element_child(outer).unwrap();
        let inner = doc.create_element("ul");
        let li = doc.create_element("li");
        let a = doc.create_element("a");
        doc.set_attribute(a, "href", "#");
        doc.append_child(li, a).unwrap();
        doc.append_child(inner, li).unwrap();
        doc.append_child(first, inner).unwrap();
        outer
    }

    #[test]
    fn test_scan_nested() {
        let mut doc = Document::new();
        let list = nested_list(&mut doc);

        let entries = scan(&doc, list).unwrap();
        assert_eq!(entries.len(), 2);
        let (_, children) = entries[0].submenu.as_ref().unwrap();
        assert_eq!(children.len(), 1);
        assert!(entries[1].submenu.is_none());
    }

    #[test]
    fn test_scan_rejects_non_list() {
        let doc = Document::new();
        assert!(matches!(
            scan(&doc, doc.body()),
            Err(WidgetError::WrongElement { expected: "ul", .. })
        ));
    }

    #[test]
    fn test_nested_options_are_vertical() {
        let options = MenuOptions {
            orientation: Orientation::Horizontal,
            roving: true,
            auto_close: true,
            ..Default::default()
        };
        let nested = options.nested();
        assert_eq!(nested.orientation, Orientation::Vertical);
        assert!(!nested.roving);
        assert!(nested.auto_close);
    }
}
