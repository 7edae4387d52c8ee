#![allow(dead_code)]

use std::rc::Rc;

use aw_a11y::ManualClock;
use aw_dom::NodeId;
use aw_widgets::Page;

/// Route widget logs to the test harness; `RUST_LOG=aw_widgets=trace`
/// shows listener routing
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn page(html: &str) -> Page {
    init_tracing();
    Page::new(aw_html::parse(html).unwrap())
}

/// Page driven by a clock the test advances by hand
pub fn page_with_clock(html: &str) -> (Page, ManualClock) {
    init_tracing();
    let clock = ManualClock::new();
    let page = Page::with_clock(aw_html::parse(html).unwrap(), Rc::new(clock.clone()));
    (page, clock)
}

pub fn by_id(page: &Page, id: &str) -> NodeId {
    page.document
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("no element #{id}"))
}

pub fn attr<'a>(page: &'a Page, node: NodeId, name: &str) -> Option<&'a str> {
    page.document.get_attribute(node, name)
}
