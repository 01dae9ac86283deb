use serde::Serialize;
use time::OffsetDateTime;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use std::collections::HashMap;

use crate::codec::{self, ExportError, ImportError};
use crate::doc::{Document, Element, ElementId, ElementKind, ElementPatch};
use crate::consts::MIN_ELEMENT_SIZE;
use crate::geometry::{Bounds, Rect, clamp_axis, compute_drag, compute_resize, normalize_rotation};
use crate::hit::{HitPart, hit_test};
use crate::input::{Button, InputState, Key};
use crate::page::PageSize;
use crate::palette;
use crate::pdf::{self, PdfLayout};
use crate::render;
use crate::template::Template;
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
///
/// Serialized for JavaScript hosts as `{"type": "elementUpdated", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Action {
    ElementCreated(Element),
    ElementUpdated { id: ElementId, fields: ElementPatch },
    ElementDeleted { id: ElementId },
    SelectionChanged(Option<ElementId>),
    DocumentReplaced { count: usize },
    SetCursor(String),
    RenderNeeded,
}

/// A gesture that could not be continued. The engine logs it and returns to
/// idle; it never reaches the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GestureError {
    #[error("element {0} vanished during gesture")]
    ElementVanished(ElementId),
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: Document,
    pub page: PageSize,
    pub viewport: Viewport,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    pending_move: Option<Point>,
    cursor: &'static str,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: Document::new(),
            page: PageSize::default(),
            viewport: Viewport::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            pending_move: None,
            cursor: "default",
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Viewport and page ---

    /// Update viewport dimensions and device pixel ratio, re-centering the page.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.viewport = Viewport::centered(&self.page, width_css, height_css);
        vec![Action::RenderNeeded]
    }

    /// Switch page format. Existing elements are left where they are.
    pub fn set_page(&mut self, page: PageSize) -> Vec<Action> {
        log::info!("page set to {}", page.name);
        self.page = page;
        if self.viewport_width > 0.0 && self.viewport_height > 0.0 {
            self.viewport = Viewport::centered(&page, self.viewport_width, self.viewport_height);
        }
        vec![Action::RenderNeeded]
    }

    // --- Element creation and edits ---

    /// Drop a palette item of `kind` with its top-left at `screen_pt`.
    pub fn drop_element(&mut self, kind: ElementKind, screen_pt: Point) -> Vec<Action> {
        let at = self.viewport.screen_to_page(screen_pt);
        let created = self.doc.add(palette::palette_element(kind, at)).clone();
        log::debug!("dropped {kind} as {}", created.id);
        vec![Action::ElementCreated(created), Action::RenderNeeded]
    }

    /// Add an uploaded image, inlined as a `data:` URI.
    pub fn add_uploaded_image(&mut self, mime: &str, bytes: &[u8]) -> Vec<Action> {
        let created = self.doc.add(palette::uploaded_image(mime, bytes)).clone();
        log::debug!("uploaded {} bytes of {mime} as {}", bytes.len(), created.id);
        vec![Action::ElementCreated(created), Action::RenderNeeded]
    }

    /// Property edit from the host's inspector panel.
    ///
    /// Values that are not finite, and sizes that are not positive, are
    /// dropped. The rest is pulled back inside the page invariants before it
    /// is applied; the reported fields are the ones actually stored.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> Vec<Action> {
        let Some(current) = self.doc.get(id) else {
            return Vec::new();
        };
        let patch = constrain_patch(current, patch, self.page.bounds());
        if patch.is_empty() || !self.doc.update(id, &patch) {
            return Vec::new();
        }
        vec![Action::ElementUpdated { id: id.clone(), fields: patch }, Action::RenderNeeded]
    }

    // --- Whole-document operations ---

    /// Replace the document with a template's elements.
    pub fn load_template(&mut self, template: &Template) -> Vec<Action> {
        log::info!("loading template {}", template.name);
        self.replace_document(template.elements())
    }

    /// Remove every element.
    pub fn clear(&mut self) -> Vec<Action> {
        self.replace_document(Vec::new())
    }

    /// Import a document file. On error the document is untouched.
    ///
    /// # Errors
    ///
    /// Returns the [`ImportError`] describing why the file was rejected.
    pub fn import_json(&mut self, text: &str) -> Result<Vec<Action>, ImportError> {
        match codec::import_json(text) {
            Ok(imported) => Ok(self.replace_document(imported.elements)),
            Err(e) => {
                log::warn!("import rejected: {e}");
                Err(e)
            }
        }
    }

    /// Export the document as a JSON file stamped with `created`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] if serialization fails.
    pub fn export_json(&self, created: OffsetDateTime, pretty: bool) -> Result<String, ExportError> {
        codec::export_json(self.doc.elements(), created, pretty)
    }

    /// PDF placement for the current page.
    #[must_use]
    pub fn pdf_layout(&self, raster_scale: f64) -> PdfLayout {
        pdf::layout(&self.page, raster_scale)
    }

    fn replace_document(&mut self, elements: Vec<Element>) -> Vec<Action> {
        let had_selection = self.doc.selected().is_some();
        let mut actions = self.cancel_gesture();
        let count = elements.len();
        self.doc.replace_all(elements);
        actions.push(Action::DocumentReplaced { count });
        if had_selection {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_idle() {
            return Vec::new();
        }
        self.pending_move = None;
        let page_pt = self.viewport.screen_to_page(screen_pt);

        let Some(hit) = hit_test(page_pt, &self.doc, &self.viewport) else {
            if self.doc.select(None) {
                return vec![Action::SelectionChanged(None), Action::RenderNeeded];
            }
            return Vec::new();
        };
        let Some(start) = self.doc.get(&hit.id).map(Element::rect) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if self.doc.select(Some(&hit.id)) {
            actions.push(Action::SelectionChanged(Some(hit.id.clone())));
        }
        self.input = match hit.part {
            HitPart::Body => InputState::Dragging { id: hit.id, start, start_pointer: page_pt },
            HitPart::ResizeHandle(handle) => InputState::Resizing { id: hit.id, handle, start, start_pointer: page_pt },
        };
        log::debug!("gesture start: {:?}", self.input);
        self.push_cursor(self.input.cursor(), &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.input.is_idle() {
            let mut actions = Vec::new();
            let cursor = self.hover_cursor(screen_pt);
            self.push_cursor(cursor, &mut actions);
            return actions;
        }

        match self.apply_gesture(screen_pt) {
            Ok(actions) => actions,
            Err(e) => {
                log::warn!("gesture reset: {e}");
                self.input = InputState::Idle;
                self.pending_move = None;
                let mut actions = Vec::new();
                self.push_cursor("default", &mut actions);
                actions
            }
        }
    }

    /// Record a pointer move to be applied on the next frame. Only the latest
    /// position is kept. Returns `true` if no move was pending, i.e. the host
    /// should schedule a frame.
    pub fn queue_pointer_move(&mut self, screen_pt: Point) -> bool {
        self.pending_move.replace(screen_pt).is_none()
    }

    /// Apply the queued pointer move, if any.
    pub fn flush_pointer_move(&mut self) -> Vec<Action> {
        match self.pending_move.take() {
            Some(pt) => self.on_pointer_move(pt),
            None => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = self.flush_pointer_move();
        let prev = std::mem::take(&mut self.input);
        if prev.is_idle() {
            return actions;
        }
        log::debug!("gesture end: {prev:?}");
        let cursor = self.hover_cursor(screen_pt);
        self.push_cursor(cursor, &mut actions);
        actions
    }

    /// Abandon the active gesture (pointer left the canvas or capture was
    /// lost). Changes already applied are kept.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        self.pending_move = None;
        let prev = std::mem::take(&mut self.input);
        let mut actions = Vec::new();
        if !prev.is_idle() {
            log::debug!("gesture cancelled: {prev:?}");
            self.push_cursor("default", &mut actions);
        }
        actions
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        if key.is_delete() {
            let Some(id) = self.doc.selected().cloned() else {
                return Vec::new();
            };
            self.doc.remove(&id);
            return vec![Action::ElementDeleted { id }, Action::SelectionChanged(None), Action::RenderNeeded];
        }
        if key.is_escape() && self.doc.select(None) {
            return vec![Action::SelectionChanged(None), Action::RenderNeeded];
        }
        Vec::new()
    }

    // --- Queries ---

    /// The currently selected element id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&ElementId> {
        self.doc.selected()
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.doc.get(id)
    }

    /// An element's box in screen coordinates, for hosts that overlay an
    /// inline editor on it. Rotation is ignored.
    #[must_use]
    pub fn screen_rect(&self, id: &ElementId) -> Option<Rect> {
        let rect = self.doc.get(id)?.rect();
        let top_left = self.viewport.page_to_screen(Point::new(rect.x, rect.y));
        let scale = self.viewport.scale;
        Some(Rect::new(top_left.x, top_left.y, rect.width * scale, rect.height * scale))
    }

    /// The cursor most recently requested via [`Action::SetCursor`].
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.cursor
    }

    // --- Internals ---

    fn apply_gesture(&mut self, screen_pt: Point) -> Result<Vec<Action>, GestureError> {
        let page_pt = self.viewport.screen_to_page(screen_pt);
        let bounds = self.page.bounds();
        let (id, patch) = match &self.input {
            InputState::Idle => return Ok(Vec::new()),
            InputState::Dragging { id, start, start_pointer } => {
                let pos = compute_drag(start, page_pt.delta_from(*start_pointer), bounds);
                (id.clone(), ElementPatch::position(pos.x, pos.y))
            }
            InputState::Resizing { id, handle, start, start_pointer } => {
                let rect = compute_resize(start, *handle, page_pt.delta_from(*start_pointer), bounds);
                (id.clone(), ElementPatch::geometry(rect))
            }
        };

        let Some(current) = self.doc.get(&id) else {
            return Err(GestureError::ElementVanished(id));
        };
        if unchanged(current, &patch) {
            return Ok(Vec::new());
        }
        self.doc.update(&id, &patch);
        Ok(vec![Action::ElementUpdated { id, fields: patch }, Action::RenderNeeded])
    }

    fn hover_cursor(&self, screen_pt: Point) -> &'static str {
        let page_pt = self.viewport.screen_to_page(screen_pt);
        match hit_test(page_pt, &self.doc, &self.viewport) {
            Some(hit) => match hit.part {
                HitPart::Body => "move",
                HitPart::ResizeHandle(handle) => handle.cursor(),
            },
            None => "default",
        }
    }

    fn push_cursor(&mut self, cursor: &'static str, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor.to_owned()));
        }
    }
}

fn unchanged(el: &Element, patch: &ElementPatch) -> bool {
    let target = Rect {
        x: patch.x.unwrap_or(el.x),
        y: patch.y.unwrap_or(el.y),
        width: patch.width.unwrap_or(el.width),
        height: patch.height.unwrap_or(el.height),
    };
    target == el.rect()
}

/// Limit an edit to what `el` may hold on a page of `bounds`.
///
/// Edited sizes are kept within the page and at least `MIN_ELEMENT_SIZE`,
/// except a line's height, which is its stroke thickness. Any geometry edit
/// also carries the position, clamped with the final size, so a growing
/// element is pushed back onto the page even when `x` and `y` were not named.
fn constrain_patch(el: &Element, mut patch: ElementPatch, bounds: Bounds) -> ElementPatch {
    for v in [&mut patch.x, &mut patch.y, &mut patch.rotation] {
        if v.is_some_and(|n| !n.is_finite()) {
            *v = None;
        }
    }
    for v in [&mut patch.width, &mut patch.height] {
        if v.is_some_and(|n| !n.is_finite() || n <= 0.0) {
            *v = None;
        }
    }
    patch.rotation = patch.rotation.map(normalize_rotation);

    if patch.x.is_none() && patch.y.is_none() && patch.width.is_none() && patch.height.is_none() {
        return patch;
    }
    let min_height = if el.kind == ElementKind::Line { 0.0 } else { MIN_ELEMENT_SIZE };
    patch.width = patch.width.map(|w| w.min(bounds.width).max(MIN_ELEMENT_SIZE));
    patch.height = patch.height.map(|h| h.min(bounds.height).max(min_height));

    let width = patch.width.unwrap_or(el.width);
    let height = patch.height.unwrap_or(el.height);
    patch.x = Some(clamp_axis(patch.x.unwrap_or(el.x), bounds.width - width));
    patch.y = Some(clamp_axis(patch.y.unwrap_or(el.y), bounds.height - height));
    patch
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    images: HashMap<String, HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, images: HashMap::new(), core: EngineCore::new() }
    }

    // --- Delegated operations ---
    //
    // Name-based operations (page, palette drop, edits, templates) go through
    // `core` directly; see `bindings`.

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.core.set_viewport(width_css, height_css, dpr)
    }

    pub fn add_uploaded_image(&mut self, mime: &str, bytes: &[u8]) -> Vec<Action> {
        self.core.add_uploaded_image(mime, bytes)
    }

    pub fn clear(&mut self) -> Vec<Action> {
        self.core.clear()
    }

    /// # Errors
    ///
    /// Returns the [`ImportError`] describing why the file was rejected.
    pub fn import_json(&mut self, text: &str) -> Result<Vec<Action>, ImportError> {
        self.core.import_json(text)
    }

    /// Export the document stamped with the browser's current time.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] if the clock is out of range or serialization fails.
    pub fn export_json(&self, pretty: bool) -> Result<String, ExportError> {
        #[allow(clippy::cast_possible_truncation)]
        let nanos = (js_sys::Date::now() * 1_000_000.0) as i128;
        let created = OffsetDateTime::from_unix_timestamp_nanos(nanos)?;
        self.core.export_json(created, pretty)
    }

    #[must_use]
    pub fn pdf_layout(&self, raster_scale: f64) -> PdfLayout {
        self.core.pdf_layout(raster_scale)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn queue_pointer_move(&mut self, screen_pt: Point) -> bool {
        self.core.queue_pointer_move(screen_pt)
    }

    pub fn flush_pointer_move(&mut self) -> Vec<Action> {
        self.core.flush_pointer_move()
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button)
    }

    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        self.core.cancel_gesture()
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        self.core.on_key_down(key)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// Images that have not finished loading are drawn as placeholders; the
    /// host re-renders once they arrive.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.load_images()?;
        let ctx = context_2d(&self.canvas)?;
        let scene = render::project(&self.core.doc, &self.core.viewport);
        let surface = render::Surface {
            width: self.core.viewport_width,
            height: self.core.viewport_height,
            dpr: self.core.dpr,
            chrome: true,
        };
        render::draw(&ctx, &scene, &self.core.viewport, &self.core.page, surface, &self.images)
    }

    /// Render the page alone (no selection chrome, no grid) at `raster_scale`
    /// pixels per page unit and return it as a PNG data URL.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Raster`] if an offscreen canvas cannot be
    /// created or the canvas is tainted by a cross-origin image.
    pub fn rasterize_png(&mut self, raster_scale: f64) -> Result<String, ExportError> {
        let layout = self.core.pdf_layout(raster_scale);
        self.load_images().map_err(raster_error)?;

        let offscreen = offscreen_canvas().map_err(raster_error)?;
        offscreen.set_width(layout.raster_width_px);
        offscreen.set_height(layout.raster_height_px);
        let ctx = context_2d(&offscreen).map_err(raster_error)?;

        let scale = f64::from(layout.raster_width_px) / self.core.page.width;
        let viewport = Viewport { origin_x: 0.0, origin_y: 0.0, scale };
        let scene = render::project(&self.core.doc, &viewport).without_selection();
        let surface = render::Surface {
            width: f64::from(layout.raster_width_px),
            height: f64::from(layout.raster_height_px),
            dpr: 1.0,
            chrome: false,
        };
        render::draw(&ctx, &scene, &viewport, &self.core.page, surface, &self.images).map_err(raster_error)?;
        offscreen.to_data_url_with_type("image/png").map_err(raster_error)
    }

    /// Start loading every image source not seen before.
    fn load_images(&mut self) -> Result<(), JsValue> {
        for el in self.core.doc.elements() {
            let Some(src) = el.src.as_deref() else {
                continue;
            };
            if self.images.contains_key(src) {
                continue;
            }
            let img = HtmlImageElement::new()?;
            img.set_cross_origin(Some("anonymous"));
            img.set_src(src);
            self.images.insert(src.to_owned(), img);
        }
        Ok(())
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&ElementId> {
        self.core.selection()
    }

    #[must_use]
    pub fn screen_rect(&self, id: &ElementId) -> Option<Rect> {
        self.core.screen_rect(id)
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

fn offscreen_canvas() -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    document.create_element("canvas")?.dyn_into::<HtmlCanvasElement>().map_err(JsValue::from)
}

fn raster_error(e: JsValue) -> ExportError {
    ExportError::Raster(format!("{e:?}"))
}
