#![allow(clippy::float_cmp)]

use super::*;

fn fields_json(s: &str) -> StyleFields {
    serde_json::from_str(s).unwrap()
}

// =============================================================
// StyleFields wire format
// =============================================================

#[test]
fn fields_deserialize_camel_case() {
    let f = fields_json(
        r##"{"fontSize":16,"fontFamily":"Inter","textAlign":"center","backgroundColor":"#fff","shadowOffsetX":2}"##,
    );
    assert_eq!(f.font_size, Some(16.0));
    assert_eq!(f.font_family.as_deref(), Some("Inter"));
    assert_eq!(f.text_align, Some(TextAlign::Center));
    assert_eq!(f.background_color.as_deref(), Some("#fff"));
    assert_eq!(f.shadow_offset_x, Some(2.0));
}

#[test]
fn fields_ignore_unknown_keys() {
    let f = fields_json(r#"{"letterSpacing":3,"opacity":0.5}"#);
    assert_eq!(f.opacity, Some(0.5));
}

#[test]
fn fields_serialize_omits_absent() {
    let f = StyleFields { color: Some("#000000".into()), ..StyleFields::default() };
    assert_eq!(serde_json::to_string(&f).unwrap(), r##"{"color":"#000000"}"##);
    assert_eq!(serde_json::to_string(&StyleFields::default()).unwrap(), "{}");
}

#[test]
fn overlay_keeps_fields_absent_from_patch() {
    let mut base = StyleFields {
        font_size: Some(16.0),
        color: Some("#000000".into()),
        ..StyleFields::default()
    };
    base.overlay(&StyleFields { color: Some("#ff0000".into()), ..StyleFields::default() });
    assert_eq!(base.font_size, Some(16.0));
    assert_eq!(base.color.as_deref(), Some("#ff0000"));
}

#[test]
fn is_empty_tracks_any_field() {
    assert!(StyleFields::default().is_empty());
    assert!(!StyleFields { border_width: Some(0.0), ..StyleFields::default() }.is_empty());
}

// =============================================================
// Per-kind variants
// =============================================================

#[test]
fn every_kind_gets_a_fitting_variant() {
    for kind in ElementKind::ALL {
        assert!(Style::default_for(kind).fits(kind), "{kind:?}");
    }
}

#[test]
fn line_keeps_only_color_and_opacity() {
    let f = fields_json(r##"{"backgroundColor":"#374151","borderRadius":8,"fontSize":12,"opacity":0.4}"##);
    let style = Style::from_fields(ElementKind::Line, &f);
    assert_eq!(
        style,
        Style::Line(LineStyle { color: Some("#374151".into()), opacity: Some(0.4) })
    );
    let back = style.to_fields();
    assert_eq!(back.background_color.as_deref(), Some("#374151"));
    assert_eq!(back.border_radius, None);
    assert_eq!(back.font_size, None);
}

#[test]
fn shape_round_trips_its_fields() {
    let f = fields_json(
        r##"{"backgroundColor":"#3b82f6","borderRadius":8,"borderWidth":0,"borderColor":"#000000"}"##,
    );
    assert_eq!(Style::from_fields(ElementKind::Shape, &f).to_fields(), f);
}

#[test]
fn text_round_trips_its_fields() {
    let f = fields_json(
        r##"{"fontSize":16,"fontFamily":"Inter","fontWeight":"normal","color":"#000000","textAlign":"left","shadowColor":"#00000033","shadowBlur":4}"##,
    );
    assert_eq!(Style::from_fields(ElementKind::Text, &f).to_fields(), f);
}

#[test]
fn circle_drops_border_radius() {
    let f = fields_json(r##"{"backgroundColor":"#10b981","borderRadius":50}"##);
    let back = Style::from_fields(ElementKind::Circle, &f).to_fields();
    assert_eq!(back.background_color.as_deref(), Some("#10b981"));
    assert_eq!(back.border_radius, None);
}

#[test]
fn image_and_logo_share_media_style() {
    let f = fields_json(r#"{"borderRadius":12,"fontSize":40}"#);
    let image = Style::from_fields(ElementKind::Image, &f);
    let logo = Style::from_fields(ElementKind::Logo, &f);
    assert_eq!(image, logo);
    assert_eq!(image.to_fields().font_size, None);
}

#[test]
fn glyph_drops_font_family() {
    let f = fields_json(r##"{"fontSize":32,"fontFamily":"Inter","color":"#f59e0b","textAlign":"center"}"##);
    let back = Style::from_fields(ElementKind::Icon, &f).to_fields();
    assert_eq!(back.font_size, Some(32.0));
    assert_eq!(back.font_family, None);
    assert_eq!(back.text_align, Some(TextAlign::Center));
}

// =============================================================
// merge
// =============================================================

#[test]
fn merge_overlays_and_preserves() {
    let mut style = Style::from_fields(
        ElementKind::Text,
        &fields_json(r##"{"fontSize":16,"color":"#000000"}"##),
    );
    style.merge(&fields_json(r#"{"fontSize":24}"#));
    let f = style.to_fields();
    assert_eq!(f.font_size, Some(24.0));
    assert_eq!(f.color.as_deref(), Some("#000000"));
}

#[test]
fn merge_ignores_fields_the_variant_lacks() {
    let mut style = Style::default_for(ElementKind::Line);
    style.merge(&fields_json(r##"{"fontSize":24,"backgroundColor":"#111111"}"##));
    assert_eq!(
        style,
        Style::Line(LineStyle { color: Some("#111111".into()), opacity: None })
    );
}

#[test]
fn merge_keeps_variant() {
    let mut style = Style::default_for(ElementKind::Arrow);
    style.merge(&fields_json(r#"{"fontSize":30}"#));
    assert!(style.fits(ElementKind::Arrow));
}

// =============================================================
// Accessors
// =============================================================

#[test]
fn opacity_defaults_to_one_and_clamps() {
    assert_eq!(Style::default_for(ElementKind::Shape).opacity(), 1.0);
    let over = Style::from_fields(ElementKind::Shape, &fields_json(r#"{"opacity":3}"#));
    assert_eq!(over.opacity(), 1.0);
    let under = Style::from_fields(ElementKind::Shape, &fields_json(r#"{"opacity":-1}"#));
    assert_eq!(under.opacity(), 0.0);
}

#[test]
fn shadow_visible_only_with_color() {
    let style = Style::from_fields(ElementKind::Shape, &fields_json(r#"{"shadowBlur":4}"#));
    assert!(!style.shadow().is_some_and(Shadow::is_visible));
    let style = Style::from_fields(ElementKind::Shape, &fields_json(r##"{"shadowColor":"#000"}"##));
    assert!(style.shadow().is_some_and(Shadow::is_visible));
    assert!(Style::default_for(ElementKind::Line).shadow().is_none());
}

#[test]
fn text_align_css_names() {
    assert_eq!(TextAlign::Left.as_str(), "left");
    assert_eq!(TextAlign::Center.as_str(), "center");
    assert_eq!(TextAlign::Right.as_str(), "right");
}
