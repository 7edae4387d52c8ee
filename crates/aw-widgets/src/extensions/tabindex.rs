//! Focusable empty targets

use aw_a11y::interactive_children;
use aw_dom::NodeId;

use super::{SharedTracker, delegate_extension, restore_on_cleanup, shared_tracker};
use crate::component::{Cleanup, ComponentEventKind, ExpandedView, Paired, Widget};
use crate::{Dialog, Disclosure, Page, Popup};

/// While expanded, puts a target without interactive children in the
/// tab sequence with `tabindex="0"`
#[derive(Debug, Clone, Copy, Default)]
pub struct ManageTabIndex;

fn sync(page: &mut Page, tracker: &SharedTracker, target: NodeId, expanded: bool) {
    let mut tracker = tracker.borrow_mut();
    if expanded {
        tracker.update_attribute(&mut page.document, target, "tabindex", Some("0"));
    } else {
        tracker.restore(&mut page.document, target, "tabindex");
    }
}

fn attach_tabindex<W>(widget: &mut W, page: &mut Page) -> Cleanup
where
    W: Widget + Paired,
    W::State: ExpandedView,
{
    let target = widget.target();
    let tracker = shared_tracker();
    if !interactive_children(&page.document, target).is_empty() {
        return restore_on_cleanup(tracker);
    }
    sync(page, &tracker, target, widget.state().is_expanded());

    let subscriber = tracker.clone();
    widget.subscribe(move |page, event, _| {
        if event.kind == ComponentEventKind::StateChange {
            sync(page, &subscriber, target, event.state.is_expanded());
        }
    });
    restore_on_cleanup(tracker)
}

delegate_extension!(ManageTabIndex => attach_tabindex for Disclosure, Popup, Dialog);
