//! Button semantics for non-button controllers

use super::{delegate_extension, restore_on_cleanup, shared_tracker};
use crate::component::{Cleanup, Paired, Widget};
use crate::{Dialog, Disclosure, Listbox, Page, Popup};

/// Gives a controller that is not a `<button>` `role="button"` and a
/// place in the tab sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct UseButtonRole;

fn attach_role<W: Widget + Paired>(widget: &mut W, page: &mut Page) -> Cleanup {
    let controller = widget.controller();
    let tracker = shared_tracker();
    if !page.is_button(controller) {
        let mut guard = tracker.borrow_mut();
        guard.add_attribute(&mut page.document, controller, "role", Some("button"));
        guard.add_attribute(&mut page.document, controller, "tabindex", Some("0"));
    }
    restore_on_cleanup(tracker)
}

delegate_extension!(UseButtonRole => attach_role for Disclosure, Popup, Dialog, Listbox);
