//! Palette defaults and image upload.
//!
//! Dropping a palette item creates an element of that kind with its default
//! size, content, and style, top-left corner at the drop point. Uploaded
//! images are inlined as `data:` URIs so the document stays self-contained.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::doc::{ElementKind, NewElement};
use crate::geometry::Rect;
use crate::style::{StyleFields, TextAlign};
use crate::viewport::Point;

/// Image shown for palette-dropped images until the user sets a source.
pub const PLACEHOLDER_IMAGE_SRC: &str = "https://via.placeholder.com/100x100/e5e7eb/6b7280?text=Image";

/// Top-left corner of an uploaded image.
pub const UPLOAD_ORIGIN: Point = Point { x: 100.0, y: 100.0 };
/// Size of an uploaded image.
pub const UPLOAD_WIDTH: f64 = 200.0;
pub const UPLOAD_HEIGHT: f64 = 150.0;

/// Default size of a freshly dropped element of `kind`.
#[must_use]
pub fn default_size(kind: ElementKind) -> (f64, f64) {
    match kind {
        ElementKind::Text => (200.0, 40.0),
        ElementKind::Line => (150.0, 4.0),
        ElementKind::Arrow => (120.0, 40.0),
        ElementKind::Image | ElementKind::Shape | ElementKind::Circle | ElementKind::Logo | ElementKind::Icon => {
            (100.0, 100.0)
        }
    }
}

/// A new element of `kind` with its palette defaults, top-left at `at`
/// (page coordinates). The drop point is not clamped.
#[must_use]
pub fn palette_element(kind: ElementKind, at: Point) -> NewElement {
    let (width, height) = default_size(kind);
    let base = NewElement::new(kind, Rect::new(at.x, at.y, width, height));
    match kind {
        ElementKind::Text => base.with_content("Click to edit text").with_style(&StyleFields {
            font_size: Some(16.0),
            font_family: Some("Inter".into()),
            font_weight: Some("normal".into()),
            color: Some("#000000".into()),
            text_align: Some(TextAlign::Left),
            ..StyleFields::default()
        }),
        ElementKind::Shape => base.with_style(&StyleFields {
            background_color: Some("#3b82f6".into()),
            border_radius: Some(8.0),
            border_width: Some(0.0),
            border_color: Some("#000000".into()),
            ..StyleFields::default()
        }),
        ElementKind::Circle => base.with_style(&StyleFields {
            background_color: Some("#10b981".into()),
            border_width: Some(0.0),
            border_color: Some("#000000".into()),
            ..StyleFields::default()
        }),
        ElementKind::Line => base.with_style(&StyleFields {
            background_color: Some("#374151".into()),
            ..StyleFields::default()
        }),
        ElementKind::Arrow => base.with_content("→").with_style(&StyleFields {
            font_size: Some(24.0),
            color: Some("#374151".into()),
            text_align: Some(TextAlign::Center),
            ..StyleFields::default()
        }),
        ElementKind::Icon => base.with_content("★").with_style(&StyleFields {
            font_size: Some(32.0),
            color: Some("#f59e0b".into()),
            text_align: Some(TextAlign::Center),
            ..StyleFields::default()
        }),
        ElementKind::Image | ElementKind::Logo => base.with_src(PLACEHOLDER_IMAGE_SRC),
    }
}

/// Encode raw image bytes as a `data:` URI.
#[must_use]
pub fn image_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// A new image element holding the uploaded bytes inline.
#[must_use]
pub fn uploaded_image(mime: &str, bytes: &[u8]) -> NewElement {
    let rect = Rect::new(UPLOAD_ORIGIN.x, UPLOAD_ORIGIN.y, UPLOAD_WIDTH, UPLOAD_HEIGHT);
    NewElement::new(ElementKind::Image, rect).with_src(image_data_uri(mime, bytes))
}

/// MIME type for a common image file extension.
#[must_use]
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
