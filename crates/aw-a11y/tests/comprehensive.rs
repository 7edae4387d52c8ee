//! Engine tests over parsed markup

use std::time::Duration;

use aw_a11y::{
    AttributeTracker, IdGenerator, Orientation, Search, interactive_children, next_index,
    resolve_pair, roving_tab_index,
};
use aw_dom::Key;
use aw_html::parse;

const CITIES: &str = r#"
<ul id="cities">
  <li>Anchorage</li><li>Baltimore</li><li>Chicago</li><li>Dallas</li>
  <li>El Paso</li><li>Fresno</li><li>Green Bay</li><li>Hartford</li>
</ul>"#;

#[test]
fn test_type_ahead_over_cities() {
    let doc = parse(CITIES).unwrap();
    let list = doc.get_element_by_id("cities").unwrap();
    let items = doc.element_children(list);
    let mut search = Search::children_of(&doc, list);
    let ms = Duration::from_millis;

    assert_eq!(search.get_item(&doc, 'e', ms(0)), Some(items[4]));
    assert_eq!(search.get_item(&doc, 'l', ms(120)), Some(items[4]));
    assert_eq!(search.get_item(&doc, 'h', ms(700)), Some(items[7]));
    assert_eq!(search.get_item(&doc, 'a', ms(750)), Some(items[7]));
}

#[test]
fn test_pair_then_deny_hidden_content() {
    let mut doc = parse(
        r#"<button id="toggle" aria-controls="panel">More</button>
           <div id="panel"><a href="/a">A</a><p>text</p><input type="text"></div>"#,
    )
    .unwrap();
    let toggle = doc.get_element_by_id("toggle").unwrap();
    let pair = resolve_pair(&doc, toggle).unwrap();
    let children = interactive_children(&doc, pair.target);
    assert_eq!(children.len(), 2);

    let mut tracker = AttributeTracker::new();
    roving_tab_index(&mut doc, &mut tracker, &children, &[]);
    assert_eq!(doc.sequential_focus_order(), vec![toggle]);

    tracker.remove_all(&mut doc);
    assert_eq!(doc.sequential_focus_order().len(), 3);
}

#[test]
fn test_tracked_ids_and_restore() {
    let mut doc = parse(r#"<ul id="l"><li>One</li><li>Two</li></ul>"#).unwrap();
    let list = doc.get_element_by_id("l").unwrap();
    let before = doc.outer_html(list);
    let mut tracker = AttributeTracker::new();
    let mut ids = IdGenerator::default();

    for item in doc.element_children(list) {
        tracker.ensure_id(&mut doc, &mut ids, item);
        tracker.add_attribute(&mut doc, item, "role", Some("option"));
    }
    assert!(doc.get_element_by_id("aw-1").is_some());

    tracker.remove_all(&mut doc);
    assert_eq!(doc.outer_html(list), before);
}

#[test]
fn test_navigation_matches_orientation() {
    assert_eq!(
        next_index(&Key::ArrowRight, Orientation::Horizontal, 2, 2, true),
        Some(0)
    );
    assert_eq!(
        next_index(&Key::ArrowRight, Orientation::Vertical, 2, 2, true),
        None
    );
}
