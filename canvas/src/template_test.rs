#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use super::*;
use crate::page::A4_PORTRAIT;

#[test]
fn three_templates_in_gallery_order() {
    let names: Vec<&str> = TEMPLATES.iter().map(|t| t.name).collect();
    assert_eq!(names, ["Modern Business", "Creative Portfolio", "Event Promotion"]);
}

#[test]
fn element_counts() {
    let counts: Vec<usize> = TEMPLATES.iter().map(|t| t.elements().len()).collect();
    assert_eq!(counts, [4, 4, 5]);
}

#[test]
fn ids_unique_within_each_template() {
    for t in TEMPLATES {
        let els = t.elements();
        let ids: HashSet<&ElementId> = els.iter().map(|e| &e.id).collect();
        assert_eq!(ids.len(), els.len(), "{}", t.name);
    }
}

#[test]
fn every_element_fits_a4_portrait() {
    for t in TEMPLATES {
        for el in t.elements() {
            let r = el.rect();
            assert!(r.x >= 0.0 && r.y >= 0.0, "{} {}", t.name, el.id);
            assert!(r.right() <= A4_PORTRAIT.width, "{} {}", t.name, el.id);
            assert!(r.bottom() <= A4_PORTRAIT.height, "{} {}", t.name, el.id);
        }
    }
}

#[test]
fn business_title_matches_layout() {
    let els = Template::find("business-1").unwrap().elements();
    let title = &els[0];
    assert_eq!(title.id, ElementId::new("title-1"));
    assert_eq!(title.kind, ElementKind::Text);
    assert_eq!(title.rect(), Rect::new(50.0, 50.0, 400.0, 60.0));
    assert_eq!(title.content.as_deref(), Some("Your Business Name"));
    let f = title.style.to_fields();
    assert_eq!(f.font_size, Some(36.0));
    assert_eq!(f.font_family.as_deref(), Some("Inter"));
    assert_eq!(f.color.as_deref(), Some("#1f2937"));
}

#[test]
fn event_header_is_a_square_cornered_shape() {
    let els = Template::find("Event Promotion").unwrap().elements();
    let header = &els[0];
    assert_eq!(header.kind, ElementKind::Shape);
    let f = header.style.to_fields();
    assert_eq!(f.background_color.as_deref(), Some("#7c3aed"));
    assert_eq!(f.border_radius, Some(0.0));
}

#[test]
fn find_by_id_or_name() {
    assert_eq!(Template::find("creative-1").map(|t| t.name), Some("Creative Portfolio"));
    assert_eq!(Template::find("modern business").map(|t| t.id), Some("business-1"));
    assert!(Template::find("wedding").is_none());
}

#[test]
fn elements_are_fresh_copies() {
    let t = TEMPLATES[0];
    let mut a = t.elements();
    a[0].x = 999.0;
    assert_eq!(t.elements()[0].x, 50.0);
}

#[test]
fn templates_compare_by_id() {
    assert_eq!(Template::find("Creative Portfolio"), Some(TEMPLATES[1]));
    assert_eq!(Template::find(" EVENT-1 "), Template::find("event promotion"));
    assert_ne!(TEMPLATES[0], TEMPLATES[1]);
}
