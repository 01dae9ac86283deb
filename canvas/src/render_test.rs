#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{ElementKind, ElementPatch, NewElement};
use crate::palette::palette_element;
use crate::style::StyleFields;
use crate::viewport::Point;

fn bare(doc: &mut Document, kind: ElementKind) -> ElementId {
    doc.add(NewElement::new(kind, Rect::new(10.0, 10.0, 100.0, 50.0))).id.clone()
}

fn only_visual(doc: &Document) -> Visual {
    project(doc, &Viewport::default()).items[0].visual.clone()
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn text_defaults() {
    let mut doc = Document::new();
    bare(&mut doc, ElementKind::Text);
    let Visual::Text(run) = only_visual(&doc) else {
        panic!("expected text");
    };
    assert_eq!(run.content, "Text");
    assert_eq!(run.font_size, 16.0);
    assert_eq!(run.font_family, "Inter");
    assert_eq!(run.font_weight, "normal");
    assert_eq!(run.color, "#000000");
    assert_eq!(run.background, None);
    assert_eq!(run.align, TextAlign::Left);
}

#[test]
fn empty_text_content_falls_back() {
    let mut doc = Document::new();
    let id = bare(&mut doc, ElementKind::Text);
    doc.update(&id, &ElementPatch { content: Some(String::new()), ..ElementPatch::default() });
    let Visual::Text(run) = only_visual(&doc) else {
        panic!("expected text");
    };
    assert_eq!(run.content, "Text");
}

#[test]
fn shape_circle_line_default_colors() {
    let cases = [
        (ElementKind::Shape, Visual::Box { fill: "#3b82f6".into(), radius: 0.0, border: None }),
        (ElementKind::Circle, Visual::Ellipse { fill: "#10b981".into(), border: None }),
        (ElementKind::Line, Visual::Stroke { color: "#374151".into() }),
    ];
    for (kind, expected) in cases {
        let mut doc = Document::new();
        bare(&mut doc, kind);
        assert_eq!(only_visual(&doc), expected, "{kind}");
    }
}

#[test]
fn glyph_defaults() {
    let mut doc = Document::new();
    bare(&mut doc, ElementKind::Arrow);
    bare(&mut doc, ElementKind::Icon);
    let scene = project(&doc, &Viewport::default());
    let symbols: Vec<&str> = scene
        .items
        .iter()
        .map(|i| match &i.visual {
            Visual::Glyph { symbol, font_size, color, .. } => {
                assert_eq!(*font_size, 24.0);
                assert_eq!(color, "#374151");
                symbol.as_str()
            }
            other => panic!("expected glyph, got {other:?}"),
        })
        .collect();
    assert_eq!(symbols, ["→", "★"]);
}

#[test]
fn image_without_src_is_placeholder() {
    let mut doc = Document::new();
    bare(&mut doc, ElementKind::Logo);
    assert_eq!(only_visual(&doc), Visual::Image { src: None, radius: 0.0 });
}

#[test]
fn border_only_when_width_positive() {
    let mut doc = Document::new();
    let fields = StyleFields { border_width: Some(2.0), ..StyleFields::default() };
    doc.add(NewElement::new(ElementKind::Shape, Rect::new(0.0, 0.0, 50.0, 50.0)).with_style(&fields));
    let Visual::Box { border, .. } = only_visual(&doc) else {
        panic!("expected box");
    };
    assert_eq!(border, Some(Border { width: 2.0, color: "#000000".into() }));

    let mut doc = Document::new();
    doc.add(palette_element(ElementKind::Shape, Point::new(0.0, 0.0)));
    let Visual::Box { border, radius, .. } = only_visual(&doc) else {
        panic!("expected box");
    };
    assert_eq!(border, None);
    assert_eq!(radius, 8.0);
}

// =============================================================
// Item fields
// =============================================================

#[test]
fn items_keep_paint_order_and_geometry() {
    let mut doc = Document::new();
    let a = bare(&mut doc, ElementKind::Shape);
    let b = bare(&mut doc, ElementKind::Circle);
    let scene = project(&doc, &Viewport::default());
    assert_eq!(scene.items.len(), 2);
    assert_eq!(scene.items[0].id, a);
    assert_eq!(scene.items[1].id, b);
    assert_eq!(scene.items[0].bounds, Rect::new(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn rotation_and_opacity_resolved() {
    let mut doc = Document::new();
    let id = bare(&mut doc, ElementKind::Shape);
    let patch = ElementPatch {
        rotation: Some(30.0),
        style: Some(StyleFields { opacity: Some(0.25), ..StyleFields::default() }),
        ..ElementPatch::default()
    };
    doc.update(&id, &patch);
    let item = &project(&doc, &Viewport::default()).items[0];
    assert_eq!(item.rotation, 30.0);
    assert_eq!(item.opacity, 0.25);
    assert_eq!(item.bounds, Rect::new(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn shadow_resolved_only_with_color() {
    let mut doc = Document::new();
    let id = bare(&mut doc, ElementKind::Shape);
    let patch = ElementPatch {
        style: Some(StyleFields {
            shadow_color: Some("#00000080".into()),
            shadow_blur: Some(6.0),
            ..StyleFields::default()
        }),
        ..ElementPatch::default()
    };
    assert!(project(&doc, &Viewport::default()).items[0].shadow.is_none());
    doc.update(&id, &patch);
    let shadow = project(&doc, &Viewport::default()).items[0].shadow.clone().unwrap();
    assert_eq!(shadow, DropShadow { color: "#00000080".into(), blur: 6.0, offset_x: 0.0, offset_y: 0.0 });
}

// =============================================================
// Selection
// =============================================================

#[test]
fn only_selected_item_has_handles() {
    let mut doc = Document::new();
    let a = bare(&mut doc, ElementKind::Shape);
    bare(&mut doc, ElementKind::Shape);
    doc.select(Some(&a));
    let scene = project(&doc, &Viewport::default());
    assert!(scene.items[0].selected);
    assert_eq!(scene.items[0].handles.len(), 8);
    assert!(!scene.items[1].selected);
    assert!(scene.items[1].handles.is_empty());
}

#[test]
fn handles_are_twelve_screen_pixels() {
    let mut doc = Document::new();
    let a = bare(&mut doc, ElementKind::Shape);
    doc.select(Some(&a));
    let vp = Viewport { origin_x: 0.0, origin_y: 0.0, scale: 0.8 };
    let scene = project(&doc, &vp);
    for (_, b) in &scene.items[0].handles {
        assert!((b.width * vp.scale - 12.0).abs() < 1e-9);
    }
}

#[test]
fn without_selection_strips_chrome() {
    let mut doc = Document::new();
    let a = bare(&mut doc, ElementKind::Shape);
    doc.select(Some(&a));
    let scene = project(&doc, &Viewport::default()).without_selection();
    assert!(!scene.items[0].selected);
    assert!(scene.items[0].handles.is_empty());
}
