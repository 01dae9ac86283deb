#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::NewElement;
use crate::geometry::Rect;
use crate::page::LETTER_LANDSCAPE;

fn core_with_box() -> (EngineCore, ElementId) {
    let mut core = EngineCore::new();
    let id = core.doc.add(NewElement::new(ElementKind::Shape, Rect::new(100.0, 100.0, 50.0, 50.0))).id.clone();
    (core, id)
}

// =============================================================
// Action encoding
// =============================================================

#[test]
fn actions_encode_as_json_array() {
    let json = actions_json(&[Action::SetCursor("move".into()), Action::RenderNeeded]).unwrap();
    assert_eq!(json, r#"[{"type":"setCursor","data":"move"},{"type":"renderNeeded"}]"#);
}

#[test]
fn no_actions_encode_as_empty_array() {
    assert_eq!(actions_json(&[]).unwrap(), "[]");
}

// =============================================================
// Name-based operations
// =============================================================

#[test]
fn drop_by_wire_name() {
    let mut core = EngineCore::new();
    let actions = drop_named(&mut core, "Circle", Point::new(40.0, 60.0)).unwrap();
    assert!(matches!(&actions[0], Action::ElementCreated(el) if el.kind == ElementKind::Circle));
    assert_eq!(core.doc.len(), 1);
}

#[test]
fn drop_unknown_kind_is_rejected() {
    let mut core = EngineCore::new();
    let err = drop_named(&mut core, "hexagon", Point::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, BindingError::UnknownKind(ref k) if k == "hexagon"));
    assert_eq!(err.to_string(), "unknown element kind \"hexagon\"");
    assert!(core.doc.is_empty());
}

#[test]
fn update_from_json_patch_is_constrained() {
    let (mut core, id) = core_with_box();
    let actions = update_from_json(&mut core, id.as_str(), r#"{ "x": -40, "rotation": 450 }"#).unwrap();
    assert!(matches!(actions[0], Action::ElementUpdated { .. }));
    let el = core.element(&id).unwrap();
    assert_eq!(el.x, 0.0);
    assert_eq!(el.rotation, Some(90.0));
}

#[test]
fn update_from_malformed_json_is_rejected() {
    let (mut core, id) = core_with_box();
    let err = update_from_json(&mut core, id.as_str(), r#"{ "x": "left" }"#).unwrap_err();
    assert!(matches!(err, BindingError::InvalidPatch(_)));
    assert_eq!(core.element(&id).unwrap().x, 100.0);
}

#[test]
fn set_page_by_name() {
    let mut core = EngineCore::new();
    set_page_named(&mut core, "Letter Landscape").unwrap();
    assert_eq!(core.page, LETTER_LANDSCAPE);
    assert!(matches!(set_page_named(&mut core, "B5"), Err(BindingError::UnknownPage(_))));
    assert_eq!(core.page, LETTER_LANDSCAPE);
}

#[test]
fn load_template_by_id() {
    let mut core = EngineCore::new();
    let actions = load_template_named(&mut core, "event-1").unwrap();
    assert!(actions.contains(&Action::DocumentReplaced { count: 5 }));
    assert!(matches!(load_template_named(&mut core, "Wedding"), Err(BindingError::UnknownTemplate(_))));
    assert_eq!(core.doc.len(), 5);
}
