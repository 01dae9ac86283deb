//! Document model: placed elements, their properties, and the in-memory store.
//!
//! This module defines what is on the page (`Element`, `ElementKind`), the
//! creation request the palette and upload paths build (`NewElement`), a
//! sparse-update type for property edits and gestures (`ElementPatch`), and the
//! store that owns the live elements plus the current selection (`Document`).
//!
//! Elements are kept in insertion order, which is also paint order: the first
//! element is drawn at the back, the last on top. The store performs CRUD
//! only; geometry constraints belong to the geometry engine.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Rect;
use crate::style::{Style, StyleFields};

/// Unique identifier for an element.
///
/// Opaque string so ids from templates (`"title-1"`) and imported files
/// survive a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A new random id of the form `element-<uuid>`.
    #[must_use]
    pub fn fresh() -> Self {
        Self(format!("element-{}", Uuid::new_v4().simple()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The kind of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Wrapped text run.
    Text,
    /// Raster image referenced by `src`.
    Image,
    /// Filled rectangle, optionally rounded.
    Shape,
    /// Filled ellipse inscribed in the bounding box.
    Circle,
    /// Image treated as a brand mark.
    Logo,
    /// Single symbol glyph from `content`.
    Icon,
    /// Horizontal stroke; the box height is the thickness.
    Line,
    /// Arrow glyph from `content`.
    Arrow,
}

impl ElementKind {
    /// Every kind, in palette order.
    pub const ALL: [ElementKind; 8] = [
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Shape,
        ElementKind::Circle,
        ElementKind::Logo,
        ElementKind::Icon,
        ElementKind::Line,
        ElementKind::Arrow,
    ];

    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Shape => "shape",
            Self::Circle => "circle",
            Self::Logo => "logo",
            Self::Icon => "icon",
            Self::Line => "line",
            Self::Arrow => "arrow",
        }
    }

    /// Parse a lowercase wire name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|k| k.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An element as stored in the document and in exported files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ElementWire", into = "ElementWire")]
pub struct Element {
    /// Unique identifier, immutable for the element's lifetime.
    pub id: ElementId,
    /// Element type; immutable.
    pub kind: ElementKind,
    /// Left edge of the box in page coordinates.
    pub x: f64,
    /// Top edge of the box in page coordinates.
    pub y: f64,
    /// Width of the box in page units.
    pub width: f64,
    /// Height of the box in page units.
    pub height: f64,
    /// Clockwise rotation in degrees about the box center. Render-only.
    pub rotation: Option<f64>,
    /// Text or symbol payload.
    pub content: Option<String>,
    /// Image reference (URL or `data:` URI).
    pub src: Option<String>,
    /// Presentation attributes for this kind.
    pub style: Style,
}

impl Element {
    /// Bounding box of the element, ignoring rotation.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Rotation in degrees, `0.0` when unset.
    #[must_use]
    pub fn rotation_deg(&self) -> f64 {
        self.rotation.unwrap_or(0.0)
    }

    /// Apply a patch in place. Returns `true` if any field changed.
    pub fn apply(&mut self, patch: &ElementPatch) -> bool {
        let before = self.clone();
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
        if let Some(r) = patch.rotation {
            self.rotation = Some(r);
        }
        if let Some(ref content) = patch.content {
            self.content = Some(content.clone());
        }
        if let Some(ref src) = patch.src {
            self.src = Some(src.clone());
        }
        if let Some(ref style) = patch.style {
            self.style.merge(style);
        }
        *self != before
    }
}

/// Flat wire shape of an element.
#[derive(Serialize, Deserialize)]
struct ElementWire {
    id: ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    src: Option<String>,
    #[serde(default)]
    style: StyleFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rotation: Option<f64>,
}

/// Reason a wire element was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidElement {
    #[error("element id is empty")]
    EmptyId,
    #[error("element {id}: {field} is not a finite number")]
    NotFinite { id: String, field: &'static str },
    #[error("element {id}: {field} must be positive, got {value}")]
    NotPositive { id: String, field: &'static str, value: f64 },
}

impl TryFrom<ElementWire> for Element {
    type Error = InvalidElement;

    fn try_from(w: ElementWire) -> Result<Self, Self::Error> {
        if w.id.as_str().is_empty() {
            return Err(InvalidElement::EmptyId);
        }
        let id = w.id.to_string();
        let numbers = [("x", w.x), ("y", w.y), ("width", w.width), ("height", w.height)];
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(InvalidElement::NotFinite { id, field });
            }
        }
        if let Some(r) = w.rotation {
            if !r.is_finite() {
                return Err(InvalidElement::NotFinite { id, field: "rotation" });
            }
        }
        for (field, value) in [("width", w.width), ("height", w.height)] {
            if value <= 0.0 {
                return Err(InvalidElement::NotPositive { id, field, value });
            }
        }
        Ok(Self {
            style: Style::from_fields(w.kind, &w.style),
            id: w.id,
            kind: w.kind,
            x: w.x,
            y: w.y,
            width: w.width,
            height: w.height,
            rotation: w.rotation,
            content: w.content,
            src: w.src,
        })
    }
}

impl From<Element> for ElementWire {
    fn from(e: Element) -> Self {
        Self {
            style: e.style.to_fields(),
            id: e.id,
            kind: e.kind,
            x: e.x,
            y: e.y,
            width: e.width,
            height: e.height,
            content: e.content,
            src: e.src,
            rotation: e.rotation,
        }
    }
}

/// An element that has not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewElement {
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: Option<f64>,
    pub content: Option<String>,
    pub src: Option<String>,
    pub style: Style,
}

impl NewElement {
    /// A bare element of `kind` occupying `rect`, with an empty style.
    #[must_use]
    pub fn new(kind: ElementKind, rect: Rect) -> Self {
        Self {
            kind,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            rotation: None,
            content: None,
            src: None,
            style: Style::default_for(kind),
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Replace the style, keeping only the fields this kind uses.
    #[must_use]
    pub fn with_style(mut self, fields: &StyleFields) -> Self {
        self.style = Style::from_fields(self.kind, fields);
        self
    }

    /// Attach an id, producing a storable element.
    #[must_use]
    pub fn with_id(self, id: ElementId) -> Element {
        Element {
            id,
            kind: self.kind,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            content: self.content,
            src: self.src,
            style: self.style,
        }
    }
}

/// Sparse update for an element. Only present fields are applied; `style`
/// is merged field by field rather than replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleFields>,
}

impl ElementPatch {
    /// Patch that sets the full geometry of a box.
    #[must_use]
    pub fn geometry(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Self::default()
        }
    }

    /// Patch that only moves the box.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    /// Returns `true` if the patch sets nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// In-memory store of the elements on the page and the current selection.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    selected: Option<ElementId>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new element on top of the others and return it.
    ///
    /// The id is fresh and unique among the live elements. Geometry is not
    /// validated here.
    pub fn add(&mut self, new: NewElement) -> &Element {
        let mut id = ElementId::fresh();
        while self.contains(&id) {
            id = ElementId::fresh();
        }
        let idx = self.elements.len();
        self.elements.push(new.with_id(id));
        &self.elements[idx]
    }

    /// Apply a partial update. Returns `false` if the element doesn't exist.
    pub fn update(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(el) = self.elements.iter_mut().find(|e| &e.id == id) else {
            return false;
        };
        el.apply(patch);
        true
    }

    /// Remove an element, returning it if it was present. Clears the
    /// selection when it pointed at the removed element.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let idx = self.elements.iter().position(|e| &e.id == id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Some(self.elements.remove(idx))
    }

    /// Replace every element (template load, import, clear) and clear the
    /// selection.
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        log::info!("document replaced: {} elements", elements.len());
        self.elements = elements;
        self.selected = None;
    }

    /// Set or clear the selection. An id that names no element is ignored.
    /// Returns `true` if the selection changed.
    pub fn select(&mut self, id: Option<&ElementId>) -> bool {
        let next = match id {
            Some(id) if self.contains(id) => Some(id.clone()),
            Some(_) => return false,
            None => None,
        };
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// All elements in paint order, back to front.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Id of the selected element, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// The selected element, if any.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.iter().any(|e| &e.id == id)
    }

    /// Number of elements on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
