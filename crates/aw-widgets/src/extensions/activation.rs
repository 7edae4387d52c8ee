//! Automatic tab activation

use crate::component::{Cleanup, ComponentEventKind, Extension, Widget};
use crate::{Page, Tablist, TablistRequest};

/// Activates a tab as soon as roving focus lands on it
///
/// Nothing is written to the document, so the cleanup has nothing to
/// undo; the subscription goes away with the tablist's emitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutomaticActivation;

impl Extension<Tablist> for AutomaticActivation {
    fn attach(self: Box<Self>, tablist: &mut Tablist, _page: &mut Page) -> Cleanup {
        tablist.subscribe(|_, event, requests| {
            if let ComponentEventKind::FocusMove { index } = event.kind {
                requests.push(TablistRequest::SwitchTo(index));
            }
        });
        Box::new(|_| {})
    }
}
