//! How a submenu is shown

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use aw_a11y::{ElementPair, HasPopup};
use aw_dom::Event;
use serde::Deserialize;

use crate::component::{
    Component, ComponentEvent, ComponentEventKind, ExpandedRequest, ExpandedState,
    HasExpandedState, Setup, Widget,
};
use crate::{Disclosure, DisclosureOptions, Listener, Page, Popup, PopupOptions, WidgetResult};

/// Presentation of nested lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmenuKind {
    /// Always visible, no toggle
    #[default]
    Visible,
    /// Toggled in place by its invoking item
    Disclosure,
    /// Dismissible popup
    Popup,
}

/// The component (if any) that expands a submenu
pub enum Presenter {
    Visible,
    Disclosure(Disclosure),
    Popup(Popup),
}

/// Queue of submenu indices that just opened
pub(crate) type OpenQueue = Rc<RefCell<VecDeque<usize>>>;

impl Presenter {
    pub(crate) fn new(page: &mut Page, kind: SubmenuKind, pair: ElementPair) -> WidgetResult<Self> {
        Ok(match kind {
            SubmenuKind::Visible => Self::Visible,
            SubmenuKind::Disclosure => Self::Disclosure(Disclosure::from_pair(
                page,
                pair,
                DisclosureOptions::default(),
                Setup::default(),
            )?),
            SubmenuKind::Popup => Self::Popup(Popup::from_pair(
                page,
                pair,
                PopupOptions {
                    kind: HasPopup::Menu,
                    ..Default::default()
                },
                Setup::default(),
            )?),
        })
    }

    /// Report to `queue` whenever this presenter opens
    pub(crate) fn watch(&mut self, index: usize, queue: OpenQueue) {
        let opened = move |_page: &mut Page,
                           event: &ComponentEvent<ExpandedState>,
                           _requests: &mut Vec<ExpandedRequest>| {
            if event.kind == ComponentEventKind::StateChange && event.state.expanded {
                queue.borrow_mut().push_back(index);
            }
        };
        match self {
            Self::Visible => {}
            Self::Disclosure(disclosure) => {
                disclosure.subscribe(opened);
            }
            Self::Popup(popup) => {
                popup.subscribe(opened);
            }
        }
    }

    /// Whether the submenu can be collapsed at all
    pub fn is_collapsible(&self) -> bool {
        !matches!(self, Self::Visible)
    }

    pub fn expanded(&self) -> bool {
        match self {
            Self::Visible => true,
            Self::Disclosure(disclosure) => disclosure.expanded(),
            Self::Popup(popup) => popup.expanded(),
        }
    }

    pub fn expand(&mut self, page: &mut Page) {
        match self {
            Self::Visible => {}
            Self::Disclosure(disclosure) => disclosure.show(page),
            Self::Popup(popup) => popup.show(page),
        }
    }

    pub fn collapse(&mut self, page: &mut Page) {
        match self {
            Self::Visible => {}
            Self::Disclosure(disclosure) => disclosure.hide(page),
            Self::Popup(popup) => popup.hide(page),
        }
    }

    pub(crate) fn handle_event(
        &mut self,
        page: &mut Page,
        listener: &Listener,
        event: &mut Event,
    ) -> bool {
        match self {
            Self::Visible => false,
            Self::Disclosure(disclosure) => disclosure.handle_event(page, listener, event),
            Self::Popup(popup) => popup.handle_event(page, listener, event),
        }
    }

    pub(crate) fn destroy(&mut self, page: &mut Page) {
        match self {
            Self::Visible => {}
            Self::Disclosure(disclosure) => disclosure.destroy(page),
            Self::Popup(popup) => popup.destroy(page),
        }
    }
}
