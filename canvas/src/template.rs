//! Built-in brochure templates.
//!
//! A template is a named element sequence. Loading one replaces the whole
//! document; element ids are kept as written so a loaded template exports
//! with the same ids.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use crate::doc::{Element, ElementId, ElementKind, NewElement};
use crate::geometry::Rect;
use crate::style::StyleFields;

/// A named starting layout. Two templates are equal when their ids are.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// Stable identifier (`"business-1"`).
    pub id: &'static str,
    /// Display name (`"Modern Business"`).
    pub name: &'static str,
    build: fn() -> Vec<Element>,
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Template {}

impl Template {
    /// Fresh copies of the template's elements.
    #[must_use]
    pub fn elements(&self) -> Vec<Element> {
        (self.build)()
    }

    /// Look up a template by id or by display name (ASCII case-insensitive).
    #[must_use]
    pub fn find(key: &str) -> Option<Template> {
        let key = key.trim();
        TEMPLATES
            .iter()
            .copied()
            .find(|t| t.id.eq_ignore_ascii_case(key) || t.name.eq_ignore_ascii_case(key))
    }
}

/// Every built-in template, in gallery order.
pub const TEMPLATES: [Template; 3] = [
    Template { id: "business-1", name: "Modern Business", build: modern_business },
    Template { id: "creative-1", name: "Creative Portfolio", build: creative_portfolio },
    Template { id: "event-1", name: "Event Promotion", build: event_promotion },
];

fn text(id: &str, rect: Rect, content: &str, font_size: f64, color: &str) -> Element {
    let style = StyleFields {
        font_size: Some(font_size),
        font_family: Some("Inter".into()),
        color: Some(color.into()),
        ..StyleFields::default()
    };
    NewElement::new(ElementKind::Text, rect)
        .with_content(content)
        .with_style(&style)
        .with_id(ElementId::new(id))
}

fn block(id: &str, rect: Rect, color: &str, radius: f64) -> Element {
    let style = StyleFields {
        background_color: Some(color.into()),
        border_radius: Some(radius),
        ..StyleFields::default()
    };
    NewElement::new(ElementKind::Shape, rect).with_style(&style).with_id(ElementId::new(id))
}

fn modern_business() -> Vec<Element> {
    vec![
        text("title-1", Rect::new(50.0, 50.0, 400.0, 60.0), "Your Business Name", 36.0, "#1f2937"),
        text(
            "subtitle-1",
            Rect::new(50.0, 120.0, 400.0, 30.0),
            "Professional Services & Solutions",
            18.0,
            "#6b7280",
        ),
        block("logo-1", Rect::new(50.0, 180.0, 80.0, 80.0), "#3b82f6", 12.0),
        text(
            "contact-1",
            Rect::new(150.0, 200.0, 300.0, 40.0),
            "contact@business.com | (555) 123-4567",
            14.0,
            "#374151",
        ),
    ]
}

fn creative_portfolio() -> Vec<Element> {
    vec![
        block("bg-shape-1", Rect::new(0.0, 0.0, 200.0, 300.0), "#ec4899", 0.0),
        text("title-2", Rect::new(220.0, 80.0, 300.0, 50.0), "Creative Studio", 32.0, "#1f2937"),
        text(
            "subtitle-2",
            Rect::new(220.0, 140.0, 280.0, 60.0),
            "Bringing your ideas to life through innovative design",
            16.0,
            "#4b5563",
        ),
        block("accent-1", Rect::new(400.0, 220.0, 60.0, 60.0), "#f59e0b", 30.0),
    ]
}

fn event_promotion() -> Vec<Element> {
    vec![
        block("header-bg", Rect::new(0.0, 0.0, 500.0, 120.0), "#7c3aed", 0.0),
        text("event-title", Rect::new(50.0, 30.0, 400.0, 60.0), "SUMMER FESTIVAL 2024", 28.0, "#ffffff"),
        text("event-date", Rect::new(50.0, 150.0, 300.0, 40.0), "June 15-17, 2024", 20.0, "#1f2937"),
        text("event-location", Rect::new(50.0, 190.0, 300.0, 30.0), "Central Park, New York", 16.0, "#6b7280"),
        block("star-decoration", Rect::new(400.0, 150.0, 50.0, 50.0), "#fbbf24", 0.0),
    ]
}
