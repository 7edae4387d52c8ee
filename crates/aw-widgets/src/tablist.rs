//! Tablist
//!
//! A list of tab links, each paired with a panel. Exactly one pair is
//! active. Arrow keys rove focus along the tabs and wrap at the ends;
//! activation is manual (Enter, Space or click) unless the
//! [`AutomaticActivation`](crate::AutomaticActivation) extension is
//! attached.

use aw_a11y::{A11yError, Orientation, bool_value, interactive_children, next_index};
use aw_dom::{Event, EventType, Key, NodeId};
use serde::{Deserialize, Serialize};

use crate::component::{
    Component, ComponentCore, ComponentEventKind, HasActiveIndex, Setup, Widget,
};
use crate::{ComponentId, Listener, Page, WidgetError, WidgetResult};

/// Tablist configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TablistOptions {
    /// Panels in tab order; read from each tab's `aria-controls` or
    /// `href` when omitted
    #[serde(skip)]
    pub panels: Option<Vec<NodeId>>,
    pub orientation: Orientation,
    pub initial_index: usize,
}

impl Default for TablistOptions {
    fn default() -> Self {
        Self {
            panels: None,
            orientation: Orientation::Horizontal,
            initial_index: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablistState {
    pub active_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablistRequest {
    SwitchTo(usize),
}

pub struct Tablist {
    core: ComponentCore<TablistState, TablistRequest>,
    list: NodeId,
    items: Vec<NodeId>,
    tabs: Vec<NodeId>,
    panels: Vec<NodeId>,
    /// Interactive children of each panel
    panel_children: Vec<Vec<NodeId>>,
    orientation: Orientation,
    focused: usize,
}

impl Tablist {
    pub fn new(
        page: &mut Page,
        list: NodeId,
        options: TablistOptions,
        setup: Setup<Self>,
    ) -> WidgetResult<Self> {
        let doc = &page.document;
        if !doc.is_element(list) {
            return Err(A11yError::MissingElement(list).into());
        }

        let mut items = Vec::new();
        let mut tabs = Vec::new();
        for item in doc.element_children(list) {
            let link = doc
                .element_descendants(item)
                .find(|&node| doc.tag_name(node) == Some("a"));
            match link {
                Some(link) => {
                    items.push(item);
                    tabs.push(link);
                }
                None => tracing::warn!("tablist item {} has no link, skipping", item),
            }
        }
        if tabs.is_empty() {
            return Err(WidgetError::Empty {
                widget: Self::NAME,
                what: "tab",
            });
        }

        let panels = match options.panels {
            Some(panels) => {
                for &panel in &panels {
                    if !doc.is_element(panel) {
                        return Err(A11yError::MissingElement(panel).into());
                    }
                }
                panels
            }
            None => tabs
                .iter()
                .map(|&tab| panel_for(page, tab).ok_or(WidgetError::MissingPanel(tab)))
                .collect::<WidgetResult<Vec<_>>>()?,
        };
        if panels.len() != tabs.len() {
            return Err(WidgetError::PanelCountMismatch {
                tabs: tabs.len(),
                panels: panels.len(),
            });
        }

        let panel_children = panels
            .iter()
            .map(|&panel| interactive_children(&page.document, panel))
            .collect();
        let active_index = options.initial_index.min(tabs.len() - 1);
        let mut tablist = Self {
            core: ComponentCore::new(page, Self::NAME, list, TablistState { active_index }),
            list,
            items,
            tabs,
            panels,
            panel_children,
            orientation: options.orientation,
            focused: active_index,
        };
        tablist.attach(page);
        tablist.initialize(page, setup);
        Ok(tablist)
    }

    fn attach(&mut self, page: &mut Page) {
        self.core.add_attr(page, self.list, "role", "tablist");
        if self.orientation == Orientation::Vertical {
            self.core
                .add_attr(page, self.list, "aria-orientation", self.orientation.as_str());
        }
        for &item in &self.items {
            self.core.add_attr(page, item, "role", "presentation");
        }
        for (index, (&tab, &panel)) in self.tabs.iter().zip(&self.panels).enumerate() {
            self.core.add_attr(page, tab, "role", "tab");
            let tab_id = self.core.ensure_id(page, tab);
            let panel_id = self.core.ensure_id(page, panel);
            self.core.set_attr(page, tab, "aria-controls", &panel_id);
            self.core.add_attr(page, panel, "role", "tabpanel");
            self.core.set_attr(page, panel, "aria-labelledby", &tab_id);
            if self.panel_children[index].is_empty() {
                self.core.add_attr(page, panel, "tabindex", "-1");
            }

            self.core.listen_node(page, tab, EventType::KeyDown);
            self.core.listen_node(page, tab, EventType::Click);
            self.core.listen_node(page, panel, EventType::KeyDown);
            self.core.set_reference(page, tab);
            self.core.set_reference(page, panel);
        }
        self.core.set_reference(page, self.list);
        self.sync(page);
    }

    fn sync(&mut self, page: &mut Page) {
        let active = self.core.state().active_index;
        for (index, &tab) in self.tabs.iter().enumerate() {
            self.core
                .set_attr(page, tab, "aria-selected", bool_value(index == active));
        }
        for (index, &panel) in self.panels.iter().enumerate() {
            self.core
                .set_attr(page, panel, "aria-hidden", bool_value(index != active));
        }
        let tabs = self.tabs.clone();
        self.core.rove(page, &tabs, &[tabs[active]]);

        let children = std::mem::take(&mut self.panel_children);
        for (index, interactive) in children.iter().enumerate() {
            if index == active {
                self.core.allow(page, interactive);
            } else {
                self.core.deny(page, interactive);
            }
        }
        self.panel_children = children;
    }

    /// Rove focus to a tab without activating it
    fn move_focus(&mut self, page: &mut Page, index: usize) {
        page.document.focus(self.tabs[index]);
        self.focused = index;
        let requests = self
            .core
            .emit(page, ComponentEventKind::FocusMove { index });
        self.apply_requests(page, requests);
    }

    /// Focus the active panel's first interactive child, or the panel
    fn focus_panel(&self, page: &mut Page) {
        let active = self.core.state().active_index;
        let first = self.panel_children[active].first().copied();
        if !first.is_some_and(|node| page.document.focus(node)) {
            page.document.focus(self.panels[active]);
        }
    }

    pub fn tabs(&self) -> &[NodeId] {
        &self.tabs
    }

    pub fn panels(&self) -> &[NodeId] {
        &self.panels
    }

    /// Tab that last received roving focus
    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn on_tab_key(&mut self, page: &mut Page, index: usize, event: &mut Event) {
        let Some(keyboard) = event.keyboard().cloned() else {
            return;
        };
        if keyboard.modifiers.has_command() {
            return;
        }
        let last = self.tabs.len() - 1;
        if let Some(next) = next_index(&keyboard.key, self.orientation, index, last, true) {
            event.prevent_default();
            self.move_focus(page, next);
            return;
        }
        match keyboard.key {
            Key::Enter | Key::Space => {
                event.prevent_default();
                self.switch_to(page, index);
            }
            Key::Tab if !keyboard.modifiers.shift => {
                event.prevent_default();
                self.focus_panel(page);
            }
            _ => {}
        }
    }

    fn on_panel_key(&mut self, page: &mut Page, index: usize, event: &mut Event) {
        let Some(keyboard) = event.keyboard() else {
            return;
        };
        if keyboard.key != Key::Tab || !keyboard.modifiers.shift {
            return;
        }
        if index != self.core.state().active_index {
            return;
        }
        let first = self.panel_children[index]
            .first()
            .copied()
            .unwrap_or(self.panels[index]);
        if event.target == first || event.target == self.panels[index] {
            event.prevent_default();
            page.document.focus(self.tabs[index]);
            self.focused = index;
        }
    }
}

/// Panel a tab points at through `aria-controls` or a fragment `href`
fn panel_for(page: &Page, tab: NodeId) -> Option<NodeId> {
    let doc = &page.document;
    let id = doc
        .get_attribute(tab, "aria-controls")
        .and_then(|value| value.split_whitespace().next())
        .or_else(|| doc.get_attribute(tab, "href").and_then(|href| href.strip_prefix('#')))?;
    doc.get_element_by_id(id)
}

impl Widget for Tablist {
    type State = TablistState;
    type Request = TablistRequest;

    const NAME: &'static str = "tablist";

    fn core(&self) -> &ComponentCore<TablistState, TablistRequest> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore<TablistState, TablistRequest> {
        &mut self.core
    }

    fn state_updated(&mut self, page: &mut Page, _previous: &TablistState) {
        self.sync(page);
        self.focused = self.core.state().active_index;
        tracing::debug!(
            "tablist {} active={}",
            self.core.id(),
            self.core.state().active_index
        );
    }

    fn focus_updated(&mut self, page: &mut Page, _previous: &TablistState) {
        if page.focus_within(self.list) {
            page.document.focus(self.tabs[self.core.state().active_index]);
        }
    }

    fn apply_request(&mut self, page: &mut Page, request: TablistRequest) {
        match request {
            TablistRequest::SwitchTo(index) => self.switch_to(page, index),
        }
    }
}

impl HasActiveIndex for Tablist {
    fn active_index(&self) -> usize {
        self.core.state().active_index
    }

    /// Activate tab `index`; out-of-range indices are ignored
    fn switch_to(&mut self, page: &mut Page, index: usize) {
        if index >= self.tabs.len() {
            tracing::warn!("tablist {} has no tab {}", self.core.id(), index);
            return;
        }
        self.set_state(page, |s| s.active_index = index);
    }
}

impl Component for Tablist {
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
        let Some(node) = listener.target.node() else {
            return true;
        };
        if let Some(index) = self.tabs.iter().position(|&tab| tab == node) {
            match event.event_type() {
                EventType::KeyDown => self.on_tab_key(page, index, event),
                EventType::Click => {
                    event.prevent_default();
                    self.switch_to(page, index);
                }
                _ => {}
            }
        } else if let Some(index) = self.panels.iter().position(|&panel| panel == node) {
            self.on_panel_key(page, index, event);
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

    fn fixture() -> (Page, NodeId) {
        let mut doc = aw_dom::Document::new();
        let body = doc.body();
        let ul = doc.create_element("ul");
        doc.append_child(body, ul).unwrap();
        for name in ["one", "two"] {
            let li = doc.create_element("li");
            let a = doc.create_element("a");
            doc.set_attribute(a, "href", &format!("#{name}"));
            doc.append_child(li, a).unwrap();
            doc.append_child(ul, li).unwrap();
            let panel = doc.create_element("section");
            doc.set_attribute(panel, "id", name);
            doc.append_child(body, panel).unwrap();
        }
        (Page::new(doc), ul)
    }

    #[test]
    fn test_panels_from_href() {
        let (mut page, ul) = fixture();
        let tablist = Tablist::new(&mut page, ul, TablistOptions::default(), Setup::default()).unwrap();

        let doc = &page.document;
        assert_eq!(tablist.panels().len(), 2);
        assert_eq!(doc.get_attribute(tablist.tabs()[0], "aria-selected"), Some("true"));
        assert_eq!(doc.get_attribute(tablist.panels()[1], "aria-hidden"), Some("true"));
        assert_eq!(doc.get_attribute(tablist.tabs()[1], "tabindex"), Some("-1"));
        assert_eq!(doc.get_attribute(tablist.panels()[0], "tabindex"), Some("-1"));
        assert_eq!(doc.get_attribute(ul, "aria-orientation"), None);
    }

    #[test]
    fn test_count_mismatch_touches_nothing() {
        let (mut page, ul) = fixture();
        let before = page.document.outer_html(ul);
        let options = TablistOptions {
            panels: Some(vec![page.document.body()]),
            ..Default::default()
        };

        let result = Tablist::new(&mut page, ul, options, Setup::default());
        assert!(matches!(
            result,
            Err(WidgetError::PanelCountMismatch { tabs: 2, panels: 1 })
        ));
        assert_eq!(page.document.outer_html(ul), before);
    }
}
