//! Extensions and construction setup
//!
//! An extension layers optional behavior over a widget after it has
//! initialized. It may subscribe to the widget's events and returns a
//! [`Cleanup`] that the widget runs on destroy, newest first.

use crate::component::{ComponentEvent, Widget};
use crate::Page;

/// Undo for whatever an extension did
pub type Cleanup = Box<dyn FnOnce(&mut Page)>;

/// Optional behavior attached to a widget of type `W`
pub trait Extension<W: Widget> {
    fn attach(self: Box<Self>, widget: &mut W, page: &mut Page) -> Cleanup;
}

type Callback<W> = Box<
    dyn FnMut(
        &mut Page,
        &ComponentEvent<<W as Widget>::State>,
        &mut Vec<<W as Widget>::Request>,
    ),
>;

/// Lifecycle callbacks and extensions supplied at construction
pub struct Setup<W: Widget> {
    pub(crate) on_init: Option<Callback<W>>,
    pub(crate) on_state_change: Option<Callback<W>>,
    pub(crate) on_destroy: Option<Callback<W>>,
    pub(crate) extensions: Vec<Box<dyn Extension<W>>>,
}

impl<W: Widget> Setup<W> {
    pub fn new() -> Self {
        Self {
            on_init: None,
            on_state_change: None,
            on_destroy: None,
            extensions: Vec::new(),
        }
    }

    pub fn on_init<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut Page, &ComponentEvent<W::State>, &mut Vec<W::Request>) + 'static,
    {
        self.on_init = Some(Box::new(callback));
        self
    }

    pub fn on_state_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut Page, &ComponentEvent<W::State>, &mut Vec<W::Request>) + 'static,
    {
        self.on_state_change = Some(Box::new(callback));
        self
    }

    pub fn on_destroy<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut Page, &ComponentEvent<W::State>, &mut Vec<W::Request>) + 'static,
    {
        self.on_destroy = Some(Box::new(callback));
        self
    }

    /// Append an extension; extensions attach in the order added
    pub fn extension<E>(mut self, extension: E) -> Self
    where
        E: Extension<W> + 'static,
    {
        self.extensions.push(Box::new(extension));
        self
    }
}

impl<W: Widget> Default for Setup<W> {
    fn default() -> Self {
        Self::new()
    }
}
