//! Rendering: projects the document into a drawable scene and paints it.
//!
//! [`project`] is pure: it turns each element plus its selection flag into a
//! [`DrawItem`] with every style default resolved, so it can be tested
//! without a browser. [`draw`] is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]; it reads a scene and produces pixels
//! and does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::GRID_SPACING;
use crate::doc::{Document, Element, ElementId};
use crate::geometry::{Rect, ResizeHandle};
use crate::hit::handle_boxes;
use crate::page::PageSize;
use crate::style::{Shadow, Style, TextAlign};
use crate::viewport::Viewport;

/// Inner padding of text boxes, in page units.
const TEXT_PADDING: f64 = 4.0;
/// Selection ring color.
const SELECTION_COLOR: &str = "#3b82f6";
/// Selection ring width in screen pixels.
const SELECTION_RING_PX: f64 = 2.0;
const PLACEHOLDER_FILL: &str = "#e5e7eb";
const PLACEHOLDER_TEXT: &str = "#6b7280";
const WORKSPACE_FILL: &str = "#f3f4f6";
const GRID_COLOR: &str = "rgba(0, 0, 0, 0.06)";

/// Border drawn around a box or ellipse.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: f64,
    pub color: String,
}

/// Resolved drop shadow.
#[derive(Debug, Clone, PartialEq)]
pub struct DropShadow {
    pub color: String,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Resolved text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub content: String,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: String,
    pub color: String,
    pub background: Option<String>,
    pub radius: f64,
    pub align: TextAlign,
}

/// Kind-specific appearance of an element with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Text(TextRun),
    /// `src: None` draws the placeholder.
    Image { src: Option<String>, radius: f64 },
    Box { fill: String, radius: f64, border: Option<Border> },
    Ellipse { fill: String, border: Option<Border> },
    /// Filled bar the size of the box.
    Stroke { color: String },
    Glyph { symbol: String, font_size: f64, font_weight: String, color: String },
}

/// One element ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub id: ElementId,
    /// Unrotated box in page coordinates.
    pub bounds: Rect,
    /// Degrees, applied about the box center at draw time only.
    pub rotation: f64,
    pub opacity: f64,
    pub shadow: Option<DropShadow>,
    pub visual: Visual,
    pub selected: bool,
    /// Page-space handle squares; empty unless selected.
    pub handles: Vec<(ResizeHandle, Rect)>,
}

/// Everything on the page, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub items: Vec<DrawItem>,
}

impl Scene {
    /// The same scene with selection chrome removed (used for export).
    #[must_use]
    pub fn without_selection(mut self) -> Self {
        for item in &mut self.items {
            item.selected = false;
            item.handles.clear();
        }
        self
    }
}

/// Project the document into a scene. Handle squares are sized for `viewport`.
#[must_use]
pub fn project(doc: &Document, viewport: &Viewport) -> Scene {
    let selected = doc.selected();
    let items = doc
        .elements()
        .iter()
        .map(|el| {
            let is_selected = selected == Some(&el.id);
            let bounds = el.rect();
            DrawItem {
                id: el.id.clone(),
                bounds,
                rotation: el.rotation_deg(),
                opacity: el.style.opacity(),
                shadow: el.style.shadow().and_then(resolve_shadow),
                visual: visual_for(el),
                selected: is_selected,
                handles: if is_selected { handle_boxes(&bounds, viewport).to_vec() } else { Vec::new() },
            }
        })
        .collect();
    Scene { items }
}

fn resolve_shadow(shadow: &Shadow) -> Option<DropShadow> {
    let color = shadow.color.clone()?;
    Some(DropShadow {
        color,
        blur: shadow.blur.unwrap_or(0.0),
        offset_x: shadow.offset_x.unwrap_or(0.0),
        offset_y: shadow.offset_y.unwrap_or(0.0),
    })
}

fn border(width: Option<f64>, color: Option<&String>) -> Option<Border> {
    let width = width.filter(|w| *w > 0.0)?;
    Some(Border { width, color: color.map_or_else(|| "#000000".to_owned(), Clone::clone) })
}

fn non_empty(s: Option<&String>, fallback: &str) -> String {
    match s {
        Some(s) if !s.is_empty() => s.clone(),
        _ => fallback.to_owned(),
    }
}

fn visual_for(el: &Element) -> Visual {
    match &el.style {
        Style::Text(s) => Visual::Text(TextRun {
            content: non_empty(el.content.as_ref(), "Text"),
            font_size: s.font_size.unwrap_or(16.0),
            font_family: non_empty(s.font_family.as_ref(), "Inter"),
            font_weight: non_empty(s.font_weight.as_ref(), "normal"),
            color: non_empty(s.color.as_ref(), "#000000"),
            background: s.background_color.clone(),
            radius: s.border_radius.unwrap_or(0.0),
            align: s.text_align.unwrap_or_default(),
        }),
        Style::Media(s) => Visual::Image {
            src: el.src.clone().filter(|src| !src.is_empty()),
            radius: s.border_radius.unwrap_or(0.0),
        },
        Style::Box(s) => Visual::Box {
            fill: non_empty(s.background_color.as_ref(), "#3b82f6"),
            radius: s.border_radius.unwrap_or(0.0),
            border: border(s.border_width, s.border_color.as_ref()),
        },
        Style::Ellipse(s) => Visual::Ellipse {
            fill: non_empty(s.background_color.as_ref(), "#10b981"),
            border: border(s.border_width, s.border_color.as_ref()),
        },
        Style::Line(s) => Visual::Stroke { color: non_empty(s.color.as_ref(), "#374151") },
        Style::Glyph(s) => {
            let fallback = if el.kind == crate::doc::ElementKind::Arrow { "→" } else { "★" };
            Visual::Glyph {
                symbol: non_empty(el.content.as_ref(), fallback),
                font_size: s.font_size.unwrap_or(24.0),
                font_weight: non_empty(s.font_weight.as_ref(), "normal"),
                color: non_empty(s.color.as_ref(), "#374151"),
            }
        }
    }
}

// =============================================================
// Drawing
// =============================================================

/// Target surface of a [`draw`] call.
#[derive(Debug, Clone, Copy)]
pub struct Surface {
    /// Size in CSS pixels.
    pub width: f64,
    pub height: f64,
    /// Device pixel ratio.
    pub dpr: f64,
    /// Paint the workspace background and page grid.
    pub chrome: bool,
}

/// Draw a projected scene: page, grid, items back to front, then selection.
///
/// `images` maps image sources to loaded elements; sources that are missing
/// or not yet decoded draw as placeholders.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    viewport: &Viewport,
    page: &PageSize,
    surface: Surface,
    images: &HashMap<String, HtmlImageElement>,
) -> Result<(), JsValue> {
    // Layer 1: clear and set up transforms.
    ctx.set_transform(surface.dpr, 0.0, 0.0, surface.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, surface.width, surface.height);
    if surface.chrome {
        ctx.set_fill_style_str(WORKSPACE_FILL);
        ctx.fill_rect(0.0, 0.0, surface.width, surface.height);
    }
    ctx.translate(viewport.origin_x, viewport.origin_y)?;
    ctx.scale(viewport.scale, viewport.scale)?;

    // Layer 2: page and grid.
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(0.0, 0.0, page.width, page.height);
    if surface.chrome {
        draw_grid(ctx, page, viewport.scale);
    }

    // Layer 3: elements, clipped to the page.
    ctx.save();
    ctx.begin_path();
    ctx.rect(0.0, 0.0, page.width, page.height);
    ctx.clip();
    for item in &scene.items {
        draw_item(ctx, item, images)?;
    }
    ctx.restore();

    // Layer 4: selection UI.
    for item in scene.items.iter().filter(|i| i.selected) {
        draw_selection(ctx, item, viewport.scale)?;
    }

    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, page: &PageSize, scale: f64) {
    ctx.save();
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(1.0 / scale);
    ctx.begin_path();
    let mut x = GRID_SPACING;
    while x < page.width {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, page.height);
        x += GRID_SPACING;
    }
    let mut y = GRID_SPACING;
    while y < page.height {
        ctx.move_to(0.0, y);
        ctx.line_to(page.width, y);
        y += GRID_SPACING;
    }
    ctx.stroke();
    ctx.restore();
}

fn draw_item(
    ctx: &CanvasRenderingContext2d,
    item: &DrawItem,
    images: &HashMap<String, HtmlImageElement>,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(item.opacity);
    if let Some(shadow) = &item.shadow {
        ctx.set_shadow_color(&shadow.color);
        ctx.set_shadow_blur(shadow.blur);
        ctx.set_shadow_offset_x(shadow.offset_x);
        ctx.set_shadow_offset_y(shadow.offset_y);
    }
    translate_and_rotate(ctx, &item.bounds, item.rotation)?;

    let w = item.bounds.width;
    let h = item.bounds.height;
    match &item.visual {
        Visual::Text(run) => draw_text(ctx, run, w, h)?,
        Visual::Image { src, radius } => {
            let loaded = src.as_ref().and_then(|s| images.get(s)).filter(|img| img.complete() && img.natural_width() > 0);
            draw_image(ctx, loaded, *radius, w, h)?;
        }
        Visual::Box { fill, radius, border } => {
            rounded_rect_path(ctx, -w / 2.0, -h / 2.0, w, h, *radius)?;
            ctx.set_fill_style_str(fill);
            ctx.fill();
            stroke_border(ctx, border.as_ref());
        }
        Visual::Ellipse { fill, border } => {
            ctx.begin_path();
            ctx.ellipse(0.0, 0.0, w / 2.0, h / 2.0, 0.0, 0.0, 2.0 * PI)?;
            ctx.set_fill_style_str(fill);
            ctx.fill();
            stroke_border(ctx, border.as_ref());
        }
        Visual::Stroke { color } => {
            ctx.set_fill_style_str(color);
            ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);
        }
        Visual::Glyph { symbol, font_size, font_weight, color } => {
            ctx.set_fill_style_str(color);
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.set_font(&format!("{font_weight} {font_size}px sans-serif"));
            ctx.fill_text(symbol, 0.0, 0.0)?;
        }
    }

    ctx.restore();
    Ok(())
}

fn stroke_border(ctx: &CanvasRenderingContext2d, border: Option<&Border>) {
    if let Some(b) = border {
        ctx.set_shadow_color("transparent");
        ctx.set_stroke_style_str(&b.color);
        ctx.set_line_width(b.width);
        ctx.stroke();
    }
}

fn draw_image(
    ctx: &CanvasRenderingContext2d,
    img: Option<&HtmlImageElement>,
    radius: f64,
    w: f64,
    h: f64,
) -> Result<(), JsValue> {
    rounded_rect_path(ctx, -w / 2.0, -h / 2.0, w, h, radius)?;
    if let Some(img) = img {
        ctx.save();
        ctx.clip();
        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, -h / 2.0, w, h)?;
        ctx.restore();
        return Ok(());
    }

    ctx.set_fill_style_str(PLACEHOLDER_FILL);
    ctx.fill();
    ctx.set_fill_style_str(PLACEHOLDER_TEXT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let font_size = (h.min(w) / 6.0).clamp(8.0, 24.0);
    ctx.set_font(&format!("{font_size}px sans-serif"));
    ctx.fill_text("Image", 0.0, 0.0)?;
    Ok(())
}

fn draw_text(ctx: &CanvasRenderingContext2d, run: &TextRun, w: f64, h: f64) -> Result<(), JsValue> {
    let hw = w / 2.0;
    let hh = h / 2.0;

    if let Some(bg) = &run.background {
        rounded_rect_path(ctx, -hw, -hh, w, h, run.radius)?;
        ctx.set_fill_style_str(bg);
        ctx.fill();
    }

    ctx.set_fill_style_str(&run.color);
    ctx.set_text_align(run.align.as_str());
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{} {}px {}", run.font_weight, run.font_size, run.font_family));

    let max_w = (w - TEXT_PADDING * 2.0).max(1.0);
    let x = match run.align {
        TextAlign::Left => -hw + TEXT_PADDING,
        TextAlign::Center => 0.0,
        TextAlign::Right => hw - TEXT_PADDING,
    };

    // Wrapped lines centered vertically; overflow is clipped by the page only.
    let line_height = run.font_size * 1.2;
    let lines = wrap_text_lines(ctx, &run.content, max_w);
    let total_height = line_height * (lines.len().saturating_sub(1) as f64);
    let start_y = -total_height * 0.5;
    for (idx, line) in lines.iter().enumerate() {
        ctx.fill_text(line, x, start_y + idx as f64 * line_height)?;
    }
    Ok(())
}

fn wrap_text_lines(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> Vec<String> {
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let words: Vec<&str> = raw_line.split_whitespace().collect();
        if words.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in words {
            let candidate = if current.is_empty() { word.to_owned() } else { format!("{current} {word}") };
            if measured_text_width(ctx, &candidate) <= max_w {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            let mut chunks = break_long_word(ctx, word, max_w);
            current = chunks.pop().unwrap_or_default();
            out.extend(chunks);
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn break_long_word(ctx: &CanvasRenderingContext2d, word: &str, max_w: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if !current.is_empty() && measured_text_width(ctx, &candidate) > max_w {
            lines.push(current);
            current = ch.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => f64::INFINITY,
    }
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, item: &DrawItem, scale: f64) -> Result<(), JsValue> {
    // Ring follows the rotated element; handles stay on the unrotated box.
    ctx.save();
    translate_and_rotate(ctx, &item.bounds, item.rotation)?;
    let ring = SELECTION_RING_PX / scale;
    let w = item.bounds.width + ring * 2.0;
    let h = item.bounds.height + ring * 2.0;
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(ring);
    ctx.stroke_rect(-w / 2.0, -h / 2.0, w, h);
    ctx.restore();

    ctx.save();
    ctx.set_fill_style_str(SELECTION_COLOR);
    ctx.set_stroke_style_str("#ffffff");
    ctx.set_line_width(1.0 / scale);
    for (_, b) in &item.handles {
        ctx.fill_rect(b.x, b.y, b.width, b.height);
        ctx.stroke_rect(b.x, b.y, b.width, b.height);
    }
    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Translate to the box center and apply its rotation.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, bounds: &Rect, rotation_deg: f64) -> Result<(), JsValue> {
    ctx.translate(bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0)?;
    ctx.rotate(rotation_deg.to_radians())?;
    Ok(())
}

/// Begin a path tracing a rectangle with corners rounded to `radius`
/// (limited to half the shorter side).
fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, radius: f64) -> Result<(), JsValue> {
    let r = radius.clamp(0.0, w.min(h) / 2.0);
    ctx.begin_path();
    if r <= 0.0 {
        ctx.rect(x, y, w, h);
        return Ok(());
    }
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    ctx.close_path();
    Ok(())
}
