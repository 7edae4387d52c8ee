//! aw-widgets - Accessible widgets
//!
//! ARIA widget state machines layered over host markup:
//! - Disclosure, Popup, Dialog
//! - Listbox (select-only combobox pattern)
//! - Tablist
//! - Menu, MenuBar, MenuButton
//!
//! Every widget is driven through a [`Page`], which owns the document,
//! listener registry, reference side table, id generator and clock.

pub mod component;
pub mod dialog;
pub mod disclosure;
pub mod extensions;
pub mod listbox;
pub mod listeners;
pub mod menu;
pub mod menubar;
pub mod menubutton;
pub mod page;
pub mod popup;
pub mod references;
pub mod tablist;

pub use component::{
    Cleanup, Component, ComponentCore, ComponentEvent, ComponentEventKind, ComponentId,
    ComponentRef, EventEmitter, ExpandedRequest, ExpandedState, ExpandedView, Extension,
    HasActiveIndex, HasExpandedState, Lifecycle, Paired, Setup, SubscriptionId, Widget,
};
pub use dialog::{Dialog, DialogOptions};
pub use disclosure::{Disclosure, DisclosureOptions};
pub use extensions::{AutomaticActivation, ManageTabIndex, UseButtonRole, UseHiddenAttribute};
pub use listbox::{Listbox, ListboxOptions, ListboxRequest, ListboxState};
pub use listeners::{Listener, ListenerId, ListenerRegistry};
pub use menu::{Menu, MenuOptions, MenuRequest, MenuState, Presenter, SubmenuKind};
pub use menubar::MenuBar;
pub use menubutton::MenuButton;
pub use page::Page;
pub use popup::{FocusTrap, Popup, PopupOptions, TrapAction};
pub use references::ReferenceTable;
pub use tablist::{Tablist, TablistOptions, TablistRequest, TablistState};

use aw_a11y::A11yError;
use aw_dom::NodeId;

/// Result type for widget construction
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Widget configuration error
///
/// Returned from constructors only. A constructor that fails has not
/// touched the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    #[error(transparent)]
    Pair(#[from] A11yError),

    #[error("Element {node} must be a <{expected}> element")]
    WrongElement { node: NodeId, expected: &'static str },

    #[error("A {widget} needs at least one {what}")]
    Empty {
        widget: &'static str,
        what: &'static str,
    },

    #[error("Tablist has {tabs} tabs but {panels} panels")]
    PanelCountMismatch { tabs: usize, panels: usize },

    #[error("Tab {0} does not reference a panel")]
    MissingPanel(NodeId),
}
