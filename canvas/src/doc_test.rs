#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::style::TextAlign;

fn make_new(kind: ElementKind) -> NewElement {
    NewElement::new(kind, Rect::new(10.0, 20.0, 100.0, 80.0))
}

fn make_element(id: &str, kind: ElementKind) -> Element {
    make_new(kind).with_id(ElementId::new(id))
}

fn doc_with(ids: &[&str]) -> Document {
    let mut doc = Document::new();
    doc.replace_all(ids.iter().map(|id| make_element(id, ElementKind::Shape)).collect());
    doc
}

// =============================================================
// ElementId
// =============================================================

#[test]
fn fresh_ids_are_prefixed_and_distinct() {
    let a = ElementId::fresh();
    let b = ElementId::fresh();
    assert!(a.as_str().starts_with("element-"));
    assert_ne!(a, b);
}

#[test]
fn id_serializes_as_plain_string() {
    let id = ElementId::new("title-1");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"title-1\"");
    assert_eq!(id.to_string(), "title-1");
}

// =============================================================
// ElementKind
// =============================================================

#[test]
fn kind_serde_all_variants() {
    for kind in ElementKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.as_str()));
        let back: ElementKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}

#[test]
fn kind_deserialize_invalid_rejects() {
    assert!(serde_json::from_str::<ElementKind>("\"hexagon\"").is_err());
}

#[test]
fn kind_parse_ignores_case() {
    assert_eq!(ElementKind::parse("Circle"), Some(ElementKind::Circle));
    assert_eq!(ElementKind::parse(" arrow "), Some(ElementKind::Arrow));
    assert_eq!(ElementKind::parse("star"), None);
}

// =============================================================
// Element wire format
// =============================================================

#[test]
fn element_serializes_kind_under_type() {
    let el = make_element("a", ElementKind::Circle);
    let v = serde_json::to_value(&el).unwrap();
    assert_eq!(v["type"], "circle");
    assert_eq!(v["id"], "a");
    assert!(v.get("kind").is_none());
    assert!(v.get("rotation").is_none());
    assert!(v.get("content").is_none());
    assert_eq!(v["style"], json!({}));
}

#[test]
fn element_deserializes_original_shape() {
    let v = json!({
        "id": "title-1",
        "type": "text",
        "x": 50, "y": 50, "width": 495, "height": 80,
        "content": "Your Business Name",
        "style": { "fontSize": 36, "fontWeight": "bold", "textAlign": "center", "borderWidth": 3 }
    });
    let el: Element = serde_json::from_value(v).unwrap();
    assert_eq!(el.id, ElementId::new("title-1"));
    assert_eq!(el.kind, ElementKind::Text);
    assert_eq!(el.rect(), Rect::new(50.0, 50.0, 495.0, 80.0));
    assert_eq!(el.content.as_deref(), Some("Your Business Name"));
    let Style::Text(ref s) = el.style else {
        panic!("expected text style, got {:?}", el.style);
    };
    assert_eq!(s.font_size, Some(36.0));
    assert_eq!(s.text_align, Some(TextAlign::Center));
    assert_eq!(el.style.to_fields().border_width, None);
}

#[test]
fn element_missing_style_is_empty() {
    let v = json!({ "id": "l", "type": "line", "x": 0, "y": 0, "width": 150, "height": 4 });
    let el: Element = serde_json::from_value(v).unwrap();
    assert_eq!(el.style, Style::default_for(ElementKind::Line));
}

#[test]
fn element_rejects_non_positive_size() {
    let v = json!({ "id": "a", "type": "shape", "x": 0, "y": 0, "width": 0, "height": 10 });
    let err = serde_json::from_value::<Element>(v).unwrap_err();
    assert!(err.to_string().contains("width"), "{err}");
}

#[test]
fn element_rejects_empty_id() {
    let v = json!({ "id": "", "type": "shape", "x": 0, "y": 0, "width": 10, "height": 10 });
    assert!(serde_json::from_value::<Element>(v).is_err());
}

#[test]
fn element_rejects_missing_geometry() {
    let v = json!({ "id": "a", "type": "shape", "x": 0, "width": 10, "height": 10 });
    assert!(serde_json::from_value::<Element>(v).is_err());
}

#[test]
fn element_wire_roundtrip_keeps_rotation_and_src() {
    let mut el = make_element("img", ElementKind::Image);
    el.rotation = Some(15.0);
    el.src = Some("https://example.com/a.png".into());
    let json = serde_json::to_string(&el).unwrap();
    let back: Element = serde_json::from_str(&json).unwrap();
    assert_eq!(back, el);
}

// =============================================================
// ElementPatch
// =============================================================

#[test]
fn patch_default_is_empty() {
    assert!(ElementPatch::default().is_empty());
    assert!(!ElementPatch::position(1.0, 2.0).is_empty());
}

#[test]
fn patch_skips_absent_fields() {
    let json = serde_json::to_value(ElementPatch::position(1.0, 2.0)).unwrap();
    assert_eq!(json, json!({ "x": 1.0, "y": 2.0 }));
}

#[test]
fn patch_geometry_sets_all_four() {
    let p = ElementPatch::geometry(Rect::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!((p.x, p.y, p.width, p.height), (Some(1.0), Some(2.0), Some(3.0), Some(4.0)));
    assert!(p.style.is_none());
}

#[test]
fn apply_reports_change() {
    let mut el = make_element("a", ElementKind::Shape);
    assert!(el.apply(&ElementPatch::position(50.0, 60.0)));
    assert!(!el.apply(&ElementPatch::position(50.0, 60.0)));
    assert_eq!((el.x, el.y), (50.0, 60.0));
}

// =============================================================
// Document: add
// =============================================================

#[test]
fn document_new_is_empty() {
    let doc = Document::new();
    assert!(doc.is_empty());
    assert_eq!(doc.len(), 0);
    assert!(doc.selected().is_none());
}

#[test]
fn add_appends_on_top_with_fresh_id() {
    let mut doc = doc_with(&["a"]);
    let id = doc.add(make_new(ElementKind::Circle)).id.clone();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.elements()[1].id, id);
    assert_eq!(doc.get(&id).map(|e| e.kind), Some(ElementKind::Circle));
}

#[test]
fn add_does_not_validate_geometry() {
    let mut doc = Document::new();
    let el = doc.add(NewElement::new(ElementKind::Line, Rect::new(-5.0, 0.0, 150.0, 4.0)));
    assert_eq!(el.x, -5.0);
    assert_eq!(el.height, 4.0);
}

#[test]
fn clear_then_add_gives_single_fresh_id() {
    let mut doc = Document::new();
    let before: Vec<ElementId> = (0..5).map(|_| doc.add(make_new(ElementKind::Shape)).id.clone()).collect();
    doc.replace_all(Vec::new());
    let id = doc.add(make_new(ElementKind::Text)).id.clone();
    assert_eq!(doc.len(), 1);
    assert!(!before.contains(&id));
}

// =============================================================
// Document: update
// =============================================================

#[test]
fn update_merges_top_level_fields() {
    let mut doc = doc_with(&["a"]);
    let id = ElementId::new("a");
    let patch = ElementPatch { width: Some(300.0), content: Some("hi".into()), ..ElementPatch::default() };
    assert!(doc.update(&id, &patch));
    let el = doc.get(&id).unwrap();
    assert_eq!(el.width, 300.0);
    assert_eq!(el.height, 80.0);
    assert_eq!(el.content.as_deref(), Some("hi"));
}

#[test]
fn update_merges_style_subfields() {
    let mut doc = Document::new();
    let fields = StyleFields {
        background_color: Some("#3b82f6".into()),
        border_radius: Some(8.0),
        ..StyleFields::default()
    };
    let id = doc.add(make_new(ElementKind::Shape).with_style(&fields)).id.clone();
    let patch = ElementPatch {
        style: Some(StyleFields { background_color: Some("#ff0000".into()), ..StyleFields::default() }),
        ..ElementPatch::default()
    };
    doc.update(&id, &patch);
    let f = doc.get(&id).unwrap().style.to_fields();
    assert_eq!(f.background_color.as_deref(), Some("#ff0000"));
    assert_eq!(f.border_radius, Some(8.0));
}

#[test]
fn update_unknown_id_is_noop() {
    let mut doc = doc_with(&["a"]);
    let before = doc.elements().to_vec();
    assert!(!doc.update(&ElementId::new("zzz"), &ElementPatch::position(1.0, 1.0)));
    assert_eq!(doc.elements(), before.as_slice());
}

// =============================================================
// Document: remove
// =============================================================

#[test]
fn remove_returns_element_and_keeps_order() {
    let mut doc = doc_with(&["a", "b", "c"]);
    let removed = doc.remove(&ElementId::new("b")).unwrap();
    assert_eq!(removed.id, ElementId::new("b"));
    let ids: Vec<&str> = doc.elements().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["a", "c"]);
}

#[test]
fn remove_selected_clears_selection() {
    let mut doc = doc_with(&["a", "b"]);
    doc.select(Some(&ElementId::new("a")));
    doc.remove(&ElementId::new("a"));
    assert!(doc.selected().is_none());
}

#[test]
fn remove_other_keeps_selection() {
    let mut doc = doc_with(&["a", "b"]);
    doc.select(Some(&ElementId::new("a")));
    doc.remove(&ElementId::new("b"));
    assert_eq!(doc.selected(), Some(&ElementId::new("a")));
}

#[test]
fn remove_nonexistent_returns_none() {
    let mut doc = doc_with(&["a"]);
    assert!(doc.remove(&ElementId::new("nope")).is_none());
    assert_eq!(doc.len(), 1);
}

// =============================================================
// Document: replace_all and select
// =============================================================

#[test]
fn replace_all_clears_selection() {
    let mut doc = doc_with(&["a"]);
    doc.select(Some(&ElementId::new("a")));
    doc.replace_all(vec![make_element("x", ElementKind::Text)]);
    assert!(doc.selected().is_none());
    assert_eq!(doc.len(), 1);
    assert!(doc.contains(&ElementId::new("x")));
    assert!(!doc.contains(&ElementId::new("a")));
}

#[test]
fn select_existing_reports_change_once() {
    let mut doc = doc_with(&["a"]);
    let id = ElementId::new("a");
    assert!(doc.select(Some(&id)));
    assert!(!doc.select(Some(&id)));
    assert_eq!(doc.selected_element().map(|e| &e.id), Some(&id));
}

#[test]
fn select_dangling_is_ignored() {
    let mut doc = doc_with(&["a"]);
    doc.select(Some(&ElementId::new("a")));
    assert!(!doc.select(Some(&ElementId::new("ghost"))));
    assert_eq!(doc.selected(), Some(&ElementId::new("a")));
}

#[test]
fn select_none_clears() {
    let mut doc = doc_with(&["a"]);
    doc.select(Some(&ElementId::new("a")));
    assert!(doc.select(None));
    assert!(doc.selected().is_none());
    assert!(!doc.select(None));
}
