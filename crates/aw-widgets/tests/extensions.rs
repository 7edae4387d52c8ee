//! Optional behaviors layered over widgets

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use aw_widgets::{
    Cleanup, Component, ComponentEventKind, Dialog, DialogOptions, Disclosure, DisclosureOptions,
    ExpandedRequest, Extension, HasExpandedState, Listbox, ListboxOptions, ManageTabIndex, Page,
    Popup, PopupOptions, Setup, UseButtonRole, UseHiddenAttribute, Widget,
};
use common::{attr, by_id, page};

#[test]
fn button_role_makes_a_span_operable() {
    let mut page = page(r#"<span id="s" aria-controls="d">More</span><div id="d">Details</div>"#);
    let s = by_id(&page, "s");
    let before = page.document.outer_html(page.document.body());
    let setup: Setup<Disclosure> = Setup::new().extension(UseButtonRole);
    let mut disclosure = Disclosure::new(&mut page, s, DisclosureOptions::default(), setup).unwrap();

    assert_eq!(attr(&page, s, "role"), Some("button"));
    assert_eq!(attr(&page, s, "tabindex"), Some("0"));

    assert!(page.focus(&mut [&mut disclosure], s));
    page.press(&mut [&mut disclosure], "Enter");
    assert!(disclosure.expanded());
    page.press(&mut [&mut disclosure], " ");
    assert!(!disclosure.expanded());

    disclosure.destroy(&mut page);
    assert_eq!(page.document.outer_html(page.document.body()), before);
}

#[test]
fn button_role_leaves_buttons_alone() {
    let mut page = page(r#"<button id="b" aria-controls="p">Open</button><div id="p"></div>"#);
    let b = by_id(&page, "b");
    let setup: Setup<Popup> = Setup::new().extension(UseButtonRole);
    let _popup = Popup::new(&mut page, b, PopupOptions::default(), setup).unwrap();

    assert_eq!(attr(&page, b, "role"), None);
    assert_eq!(attr(&page, b, "tabindex"), None);
}

#[test]
fn hidden_attribute_follows_disclosure() {
    let mut page = page(r#"<button id="b" aria-controls="d">More</button><div id="d">Details</div>"#);
    let (b, d) = (by_id(&page, "b"), by_id(&page, "d"));
    let setup: Setup<Disclosure> = Setup::new().extension(UseHiddenAttribute);
    let mut disclosure = Disclosure::new(&mut page, b, DisclosureOptions::default(), setup).unwrap();

    assert_eq!(attr(&page, d, "hidden"), Some(""));
    page.click(&mut [&mut disclosure], b);
    assert_eq!(attr(&page, d, "hidden"), None);
    page.click(&mut [&mut disclosure], b);
    assert_eq!(attr(&page, d, "hidden"), Some(""));

    disclosure.destroy(&mut page);
    assert_eq!(attr(&page, d, "hidden"), None);
}

#[test]
fn hidden_listbox_still_takes_focus_when_opened() {
    let mut page = page(
        r#"<button id="city" aria-controls="cities">City</button>
           <ul id="cities"><li>Boise</li><li>Denver</li></ul>"#,
    );
    let (city, cities) = (by_id(&page, "city"), by_id(&page, "cities"));
    let setup: Setup<Listbox> = Setup::new().extension(UseHiddenAttribute);
    let mut listbox = Listbox::new(&mut page, city, ListboxOptions::default(), setup).unwrap();
    assert!(page.document.has_attribute(cities, "hidden"));

    page.click(&mut [&mut listbox], city);

    assert!(!page.document.has_attribute(cities, "hidden"));
    assert_eq!(page.document.active_element(), Some(cities));

    page.press(&mut [&mut listbox], "Escape");
    assert!(page.document.has_attribute(cities, "hidden"));
    assert_eq!(page.document.active_element(), Some(city));
}

#[test]
fn manage_tab_index_on_empty_popup() {
    let mut page = page(r#"<button id="b" aria-controls="p">Open</button><div id="p">Just text</div>"#);
    let (b, p) = (by_id(&page, "b"), by_id(&page, "p"));
    let setup: Setup<Popup> = Setup::new().extension(ManageTabIndex);
    let mut popup = Popup::new(&mut page, b, PopupOptions::default(), setup).unwrap();

    assert_eq!(attr(&page, p, "tabindex"), None);
    popup.show(&mut page);
    assert_eq!(attr(&page, p, "tabindex"), Some("0"));
    assert!(page.document.is_tabbable(p));
    popup.hide(&mut page);
    assert_eq!(attr(&page, p, "tabindex"), None);
}

#[test]
fn manage_tab_index_restores_dialog_value() {
    let mut page = page(r#"<button id="open" aria-controls="dlg">Open</button><div id="dlg">Notice</div>"#);
    let (open, dlg) = (by_id(&page, "open"), by_id(&page, "dlg"));
    let setup: Setup<Dialog> = Setup::new().extension(ManageTabIndex);
    let mut dialog = Dialog::new(&mut page, open, DialogOptions::default(), setup).unwrap();

    assert_eq!(attr(&page, dlg, "tabindex"), Some("-1"));
    dialog.show(&mut page);
    assert_eq!(attr(&page, dlg, "tabindex"), Some("0"));
    dialog.hide(&mut page);
    assert_eq!(attr(&page, dlg, "tabindex"), Some("-1"));

    dialog.destroy(&mut page);
    assert_eq!(attr(&page, dlg, "tabindex"), None);
}

#[test]
fn manage_tab_index_skips_targets_with_controls() {
    let mut page = page(
        r#"<button id="b" aria-controls="p">Open</button><div id="p"><a href="/x">X</a></div>"#,
    );
    let (b, p) = (by_id(&page, "b"), by_id(&page, "p"));
    let setup: Setup<Popup> = Setup::new().extension(ManageTabIndex);
    let mut popup = Popup::new(&mut page, b, PopupOptions::default(), setup).unwrap();

    popup.show(&mut page);
    assert_eq!(attr(&page, p, "tabindex"), None);
}

/// Records when it attaches and when its cleanup runs
struct Record {
    label: &'static str,
    log: Rc<RefCell<Vec<String>>>,
}

impl Extension<Disclosure> for Record {
    fn attach(self: Box<Self>, _disclosure: &mut Disclosure, _page: &mut Page) -> Cleanup {
        self.log.borrow_mut().push(format!("attach {}", self.label));
        Box::new(move |_| self.log.borrow_mut().push(format!("cleanup {}", self.label)))
    }
}

#[test]
fn cleanups_run_newest_first_before_destroy_event() {
    let mut page = page(r#"<button id="b" aria-controls="d">More</button><div id="d"></div>"#);
    let b = by_id(&page, "b");
    let log = Rc::new(RefCell::new(Vec::new()));
    let on_destroy = log.clone();
    let setup: Setup<Disclosure> = Setup::new()
        .extension(Record {
            label: "first",
            log: log.clone(),
        })
        .extension(Record {
            label: "second",
            log: log.clone(),
        })
        .on_destroy(move |_, event, _| on_destroy.borrow_mut().push(event.name()));
    let mut disclosure = Disclosure::new(&mut page, b, DisclosureOptions::default(), setup).unwrap();

    disclosure.destroy(&mut page);

    assert_eq!(
        *log.borrow(),
        [
            "attach first",
            "attach second",
            "cleanup second",
            "cleanup first",
            "disclosure.destroy"
        ]
    );
}

/// Closes the widget whenever something opens it
struct StayClosed;

impl Extension<Disclosure> for StayClosed {
    fn attach(self: Box<Self>, disclosure: &mut Disclosure, _page: &mut Page) -> Cleanup {
        disclosure.subscribe(|_, event, requests| {
            if event.kind == ComponentEventKind::StateChange && event.state.expanded {
                requests.push(ExpandedRequest::Hide);
            }
        });
        Box::new(|_| {})
    }
}

#[test]
fn extensions_can_queue_requests() {
    let mut page = page(r#"<button id="b" aria-controls="d">More</button><div id="d"></div>"#);
    let (b, d) = (by_id(&page, "b"), by_id(&page, "d"));
    let setup: Setup<Disclosure> = Setup::new()
        .extension(UseHiddenAttribute)
        .extension(StayClosed);
    let mut disclosure = Disclosure::new(&mut page, b, DisclosureOptions::default(), setup).unwrap();

    page.click(&mut [&mut disclosure], b);

    assert!(!disclosure.expanded());
    assert_eq!(attr(&page, b, "aria-expanded"), Some("false"));
    assert_eq!(attr(&page, d, "hidden"), Some(""));
}
