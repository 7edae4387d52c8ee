//! `hidden` attribute mirroring

use aw_dom::NodeId;

use super::{SharedTracker, delegate_extension, restore_on_cleanup, shared_tracker};
use crate::component::{Cleanup, ComponentEventKind, ExpandedView, Paired, Widget};
use crate::{
    Dialog, Disclosure, HasActiveIndex, Listbox, MenuButton, Page, Popup, Tablist,
};

/// Keeps collapsed targets (or inactive tab panels) `hidden`
#[derive(Debug, Clone, Copy, Default)]
pub struct UseHiddenAttribute;

fn set_hidden(page: &mut Page, tracker: &SharedTracker, node: NodeId, hidden: bool) {
    let value = hidden.then_some("");
    tracker
        .borrow_mut()
        .update_attribute(&mut page.document, node, "hidden", value);
}

fn attach_expanded<W>(widget: &mut W, page: &mut Page) -> Cleanup
where
    W: Widget + Paired,
    W::State: ExpandedView,
{
    let target = widget.target();
    let tracker = shared_tracker();
    set_hidden(page, &tracker, target, !widget.state().is_expanded());

    let subscriber = tracker.clone();
    widget.subscribe(move |page, event, _| {
        if event.kind == ComponentEventKind::StateChange {
            set_hidden(page, &subscriber, target, !event.state.is_expanded());
        }
    });
    restore_on_cleanup(tracker)
}

delegate_extension!(UseHiddenAttribute => attach_expanded for Disclosure, Popup, Dialog, Listbox, MenuButton);

impl crate::component::Extension<Tablist> for UseHiddenAttribute {
    fn attach(self: Box<Self>, tablist: &mut Tablist, page: &mut Page) -> Cleanup {
        let panels = tablist.panels().to_vec();
        let tracker = shared_tracker();
        let show = {
            let tracker = tracker.clone();
            move |page: &mut Page, active: usize| {
                for (index, &panel) in panels.iter().enumerate() {
                    set_hidden(page, &tracker, panel, index != active);
                }
            }
        };
        show(page, tablist.active_index());

        tablist.subscribe(move |page, event, _| {
            if event.kind == ComponentEventKind::StateChange {
                show(page, event.state.active_index);
            }
        });
        restore_on_cleanup(tracker)
    }
}
