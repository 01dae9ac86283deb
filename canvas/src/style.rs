//! Presentation styles, one variant per family of element kinds.
//!
//! On the wire an element's style is a flat bag of optional camelCase fields
//! ([`StyleFields`]). In memory each kind only carries the fields it can
//! render, so a line cannot hold a border radius and a text run cannot hold a
//! border width. Conversion drops fields the kind does not use.
//!
//! Absent fields stay absent (they are not filled with defaults) so an
//! imported document exports back unchanged; the render projector applies the
//! per-kind defaults at draw time.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use serde::{Deserialize, Serialize};

use crate::doc::ElementKind;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// CSS / Canvas2D spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Flat wire representation of a style, and the shape of a style patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_offset_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_offset_y: Option<f64>,
}

impl StyleFields {
    /// Copy every field that is set in `patch` over `self`.
    pub fn overlay(&mut self, patch: &StyleFields) {
        if let Some(v) = patch.font_size {
            self.font_size = Some(v);
        }
        if let Some(ref v) = patch.font_family {
            self.font_family = Some(v.clone());
        }
        if let Some(ref v) = patch.font_weight {
            self.font_weight = Some(v.clone());
        }
        if let Some(ref v) = patch.color {
            self.color = Some(v.clone());
        }
        if let Some(ref v) = patch.background_color {
            self.background_color = Some(v.clone());
        }
        if let Some(v) = patch.border_radius {
            self.border_radius = Some(v);
        }
        if let Some(ref v) = patch.border_color {
            self.border_color = Some(v.clone());
        }
        if let Some(v) = patch.border_width {
            self.border_width = Some(v);
        }
        if let Some(v) = patch.opacity {
            self.opacity = Some(v);
        }
        if let Some(v) = patch.text_align {
            self.text_align = Some(v);
        }
        if let Some(ref v) = patch.shadow_color {
            self.shadow_color = Some(v.clone());
        }
        if let Some(v) = patch.shadow_blur {
            self.shadow_blur = Some(v);
        }
        if let Some(v) = patch.shadow_offset_x {
            self.shadow_offset_x = Some(v);
        }
        if let Some(v) = patch.shadow_offset_y {
            self.shadow_offset_y = Some(v);
        }
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Drop shadow; every part optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shadow {
    pub color: Option<String>,
    pub blur: Option<f64>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
}

impl Shadow {
    fn from_fields(f: &StyleFields) -> Self {
        Self {
            color: f.shadow_color.clone(),
            blur: f.shadow_blur,
            offset_x: f.shadow_offset_x,
            offset_y: f.shadow_offset_y,
        }
    }

    fn write_fields(&self, f: &mut StyleFields) {
        f.shadow_color.clone_from(&self.color);
        f.shadow_blur = self.blur;
        f.shadow_offset_x = self.offset_x;
        f.shadow_offset_y = self.offset_y;
    }

    /// A shadow is drawn only when it has a color.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.color.is_some()
    }
}

/// Style of a `text` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub border_radius: Option<f64>,
    pub text_align: Option<TextAlign>,
    pub opacity: Option<f64>,
    pub shadow: Shadow,
}

/// Style of `image` and `logo` elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaStyle {
    pub border_radius: Option<f64>,
    pub opacity: Option<f64>,
    pub shadow: Shadow,
}

/// Style of a `shape` (rectangle) element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxStyle {
    pub background_color: Option<String>,
    pub border_radius: Option<f64>,
    pub border_width: Option<f64>,
    pub border_color: Option<String>,
    pub opacity: Option<f64>,
    pub shadow: Shadow,
}

/// Style of a `circle` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EllipseStyle {
    pub background_color: Option<String>,
    pub border_width: Option<f64>,
    pub border_color: Option<String>,
    pub opacity: Option<f64>,
    pub shadow: Shadow,
}

/// Style of a `line` element. The line's thickness is its height.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStyle {
    /// Stroke color; `backgroundColor` on the wire.
    pub color: Option<String>,
    pub opacity: Option<f64>,
}

/// Style of `icon` and `arrow` elements, drawn as a single glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphStyle {
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub color: Option<String>,
    pub text_align: Option<TextAlign>,
    pub opacity: Option<f64>,
    pub shadow: Shadow,
}

/// Per-kind style of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    Text(TextStyle),
    Media(MediaStyle),
    Box(BoxStyle),
    Ellipse(EllipseStyle),
    Line(LineStyle),
    Glyph(GlyphStyle),
}

impl Style {
    /// An empty style of the variant `kind` uses.
    #[must_use]
    pub fn default_for(kind: ElementKind) -> Self {
        Self::from_fields(kind, &StyleFields::default())
    }

    /// Build the variant `kind` uses from a flat bag, dropping fields the
    /// kind cannot render.
    #[must_use]
    pub fn from_fields(kind: ElementKind, f: &StyleFields) -> Self {
        match kind {
            ElementKind::Text => Self::Text(TextStyle {
                font_size: f.font_size,
                font_family: f.font_family.clone(),
                font_weight: f.font_weight.clone(),
                color: f.color.clone(),
                background_color: f.background_color.clone(),
                border_radius: f.border_radius,
                text_align: f.text_align,
                opacity: f.opacity,
                shadow: Shadow::from_fields(f),
            }),
            ElementKind::Image | ElementKind::Logo => Self::Media(MediaStyle {
                border_radius: f.border_radius,
                opacity: f.opacity,
                shadow: Shadow::from_fields(f),
            }),
            ElementKind::Shape => Self::Box(BoxStyle {
                background_color: f.background_color.clone(),
                border_radius: f.border_radius,
                border_width: f.border_width,
                border_color: f.border_color.clone(),
                opacity: f.opacity,
                shadow: Shadow::from_fields(f),
            }),
            ElementKind::Circle => Self::Ellipse(EllipseStyle {
                background_color: f.background_color.clone(),
                border_width: f.border_width,
                border_color: f.border_color.clone(),
                opacity: f.opacity,
                shadow: Shadow::from_fields(f),
            }),
            ElementKind::Line => Self::Line(LineStyle { color: f.background_color.clone(), opacity: f.opacity }),
            ElementKind::Icon | ElementKind::Arrow => Self::Glyph(GlyphStyle {
                font_size: f.font_size,
                font_weight: f.font_weight.clone(),
                color: f.color.clone(),
                text_align: f.text_align,
                opacity: f.opacity,
                shadow: Shadow::from_fields(f),
            }),
        }
    }

    /// Flatten back to the wire bag.
    #[must_use]
    pub fn to_fields(&self) -> StyleFields {
        let mut f = StyleFields::default();
        match self {
            Self::Text(s) => {
                f.font_size = s.font_size;
                f.font_family.clone_from(&s.font_family);
                f.font_weight.clone_from(&s.font_weight);
                f.color.clone_from(&s.color);
                f.background_color.clone_from(&s.background_color);
                f.border_radius = s.border_radius;
                f.text_align = s.text_align;
                f.opacity = s.opacity;
                s.shadow.write_fields(&mut f);
            }
            Self::Media(s) => {
                f.border_radius = s.border_radius;
                f.opacity = s.opacity;
                s.shadow.write_fields(&mut f);
            }
            Self::Box(s) => {
                f.background_color.clone_from(&s.background_color);
                f.border_radius = s.border_radius;
                f.border_width = s.border_width;
                f.border_color.clone_from(&s.border_color);
                f.opacity = s.opacity;
                s.shadow.write_fields(&mut f);
            }
            Self::Ellipse(s) => {
                f.background_color.clone_from(&s.background_color);
                f.border_width = s.border_width;
                f.border_color.clone_from(&s.border_color);
                f.opacity = s.opacity;
                s.shadow.write_fields(&mut f);
            }
            Self::Line(s) => {
                f.background_color.clone_from(&s.color);
                f.opacity = s.opacity;
            }
            Self::Glyph(s) => {
                f.font_size = s.font_size;
                f.font_weight.clone_from(&s.font_weight);
                f.color.clone_from(&s.color);
                f.text_align = s.text_align;
                f.opacity = s.opacity;
                s.shadow.write_fields(&mut f);
            }
        }
        f
    }

    /// Merge a patch into this style. Fields absent from the patch keep
    /// their value; fields this variant does not carry are ignored.
    pub fn merge(&mut self, patch: &StyleFields) {
        let mut fields = self.to_fields();
        fields.overlay(patch);
        let kind = self.representative_kind();
        *self = Self::from_fields(kind, &fields);
    }

    /// Opacity in `[0, 1]`; `1.0` when unset.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        let raw = match self {
            Self::Text(s) => s.opacity,
            Self::Media(s) => s.opacity,
            Self::Box(s) => s.opacity,
            Self::Ellipse(s) => s.opacity,
            Self::Line(s) => s.opacity,
            Self::Glyph(s) => s.opacity,
        };
        raw.unwrap_or(1.0).clamp(0.0, 1.0)
    }

    /// Drop shadow, for the variants that carry one.
    #[must_use]
    pub fn shadow(&self) -> Option<&Shadow> {
        match self {
            Self::Text(s) => Some(&s.shadow),
            Self::Media(s) => Some(&s.shadow),
            Self::Box(s) => Some(&s.shadow),
            Self::Ellipse(s) => Some(&s.shadow),
            Self::Glyph(s) => Some(&s.shadow),
            Self::Line(_) => None,
        }
    }

    /// Whether this variant is the one `kind` uses.
    #[cfg(test)]
    pub(crate) fn fits(&self, kind: ElementKind) -> bool {
        matches!(
            (self, kind),
            (Self::Text(_), ElementKind::Text)
                | (Self::Media(_), ElementKind::Image | ElementKind::Logo)
                | (Self::Box(_), ElementKind::Shape)
                | (Self::Ellipse(_), ElementKind::Circle)
                | (Self::Line(_), ElementKind::Line)
                | (Self::Glyph(_), ElementKind::Icon | ElementKind::Arrow)
        )
    }

    /// Any kind that maps to this variant; used to rebuild after a merge.
    fn representative_kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Media(_) => ElementKind::Image,
            Self::Box(_) => ElementKind::Shape,
            Self::Ellipse(_) => ElementKind::Circle,
            Self::Line(_) => ElementKind::Line,
            Self::Glyph(_) => ElementKind::Icon,
        }
    }
}
