//! Invariants over arbitrary interaction sequences

mod common;

use aw_dom::NodeId;
use aw_widgets::{
    Dialog, DialogOptions, Disclosure, DisclosureOptions, HasExpandedState, Menu, MenuOptions,
    Page, Popup, PopupOptions, Setup, SubmenuKind,
};
use common::{by_id, page};
use proptest::prelude::*;

const THREE_SUBMENUS: &str = r##"
<ul id="menu">
  <li><a id="m0" href="#">One</a><ul><li><a href="#">1a</a></li></ul></li>
  <li><a id="m1" href="#">Two</a><ul><li><a href="#">2a</a></li></ul></li>
  <li><a id="m2" href="#">Three</a><ul><li><a href="#">3a</a></li></ul></li>
</ul>"##;

fn auto_close_menu() -> (Page, Menu, Vec<NodeId>) {
    let mut page = page(THREE_SUBMENUS);
    let list = by_id(&page, "menu");
    let options = MenuOptions {
        auto_close: true,
        submenus: SubmenuKind::Disclosure,
        ..Default::default()
    };
    let menu = Menu::new(&mut page, list, options, Setup::default()).unwrap();
    let links = ["m0", "m1", "m2"].iter().map(|id| by_id(&page, id)).collect();
    (page, menu, links)
}

fn open_count(menu: &Menu) -> usize {
    (0..3).filter(|&i| menu.submenu_expanded(i)).count()
}

/// Every interactive child is reachable with Tab exactly when `expanded`
fn consistent(page: &Page, children: &[NodeId], expanded: bool) -> bool {
    children
        .iter()
        .all(|&child| page.document.is_tabbable(child) == expanded)
}

const PANEL: &str = r#"
<button id="ctl" aria-controls="region">Open</button>
<div id="region"><a href="/a">A</a><button>B</button><input type="text"></div>
<main id="main"><a href="/home">Home</a></main>"#;

#[derive(Debug, Clone, Copy)]
enum Op {
    Show,
    Hide,
    Toggle,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Show), Just(Op::Hide), Just(Op::Toggle)]
}

fn run<W: HasExpandedState>(widget: &mut W, page: &mut Page, op: Op) {
    match op {
        Op::Show => widget.show(page),
        Op::Hide => widget.hide(page),
        Op::Toggle => widget.toggle(page),
    }
}

proptest! {
    #[test]
    fn auto_close_keeps_one_submenu_open(clicks in prop::collection::vec(0usize..3, 1..16)) {
        let (mut page, mut menu, links) = auto_close_menu();
        for index in clicks {
            page.click(&mut [&mut menu], links[index]);
            prop_assert!(open_count(&menu) <= 1);
        }
    }

    #[test]
    fn auto_close_holds_for_programmatic_expansion(ops in prop::collection::vec((0usize..3, any::<bool>()), 1..16)) {
        let (mut page, mut menu, _) = auto_close_menu();
        for (index, expand) in ops {
            if expand {
                menu.expand_submenu(&mut page, index);
                prop_assert!(menu.submenu_expanded(index));
            } else {
                menu.collapse_submenu(&mut page, index);
            }
            prop_assert!(open_count(&menu) <= 1);
        }
    }

    #[test]
    fn disclosure_tab_reachability_follows_state(ops in prop::collection::vec(op(), 0..12)) {
        let mut page = page(PANEL);
        let ctl = by_id(&page, "ctl");
        let mut disclosure = Disclosure::new(&mut page, ctl, DisclosureOptions::default(), Setup::default()).unwrap();
        let children = disclosure.interactive_children().to_vec();
        prop_assert!(consistent(&page, &children, disclosure.expanded()));
        for op in ops {
            run(&mut disclosure, &mut page, op);
            prop_assert!(consistent(&page, &children, disclosure.expanded()));
        }
    }

    #[test]
    fn popup_tab_reachability_follows_state(ops in prop::collection::vec(op(), 0..12)) {
        let mut page = page(PANEL);
        let ctl = by_id(&page, "ctl");
        let mut popup = Popup::new(&mut page, ctl, PopupOptions::default(), Setup::default()).unwrap();
        let children = popup.interactive_children().to_vec();
        for op in ops {
            run(&mut popup, &mut page, op);
            prop_assert!(consistent(&page, &children, popup.expanded()));
        }
    }

    #[test]
    fn dialog_tab_reachability_follows_state(ops in prop::collection::vec(op(), 0..12)) {
        let mut page = page(PANEL);
        let ctl = by_id(&page, "ctl");
        let main = by_id(&page, "main");
        let options = DialogOptions { content: vec![main], ..Default::default() };
        let mut dialog = Dialog::new(&mut page, ctl, options, Setup::default()).unwrap();
        let children = dialog.interactive_children().to_vec();
        prop_assert_eq!(children.len(), 3);
        for op in ops {
            run(&mut dialog, &mut page, op);
            prop_assert!(consistent(&page, &children, dialog.expanded()));
            let main_hidden = page.document.get_attribute(main, "aria-hidden") == Some("true");
            prop_assert_eq!(main_hidden, dialog.expanded());
        }
    }
}
