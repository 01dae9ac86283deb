//! Page layout for PDF export.
//!
//! The page is rasterized at `raster_scale` pixels per page unit and the
//! raster is placed at the top-left of a single PDF page of the same physical
//! size. The PDF writer itself lives with the host; this module only does the
//! arithmetic it needs.

#[cfg(test)]
#[path = "pdf_test.rs"]
mod pdf_test;

use serde::Serialize;

use crate::consts::{DEFAULT_RASTER_SCALE, MM_PER_UNIT};
use crate::page::PageSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Everything the PDF writer needs to place the page raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfLayout {
    pub orientation: Orientation,
    /// PDF page width in millimetres.
    pub page_width_mm: f64,
    /// PDF page height in millimetres.
    pub page_height_mm: f64,
    /// Raster size in device pixels.
    pub raster_width_px: u32,
    pub raster_height_px: u32,
    /// Placed image size in millimetres; width spans the page, height keeps
    /// the raster aspect ratio.
    pub image_width_mm: f64,
    pub image_height_mm: f64,
}

/// Page units to millimetres.
#[must_use]
pub fn units_to_mm(units: f64) -> f64 {
    units * MM_PER_UNIT
}

/// Layout for exporting `page` rasterized at `raster_scale`.
///
/// A scale that is not a positive finite number falls back to
/// [`DEFAULT_RASTER_SCALE`].
#[must_use]
pub fn layout(page: &PageSize, raster_scale: f64) -> PdfLayout {
    let scale = if raster_scale.is_finite() && raster_scale > 0.0 { raster_scale } else { DEFAULT_RASTER_SCALE };
    let raster_width_px = raster_px(page.width * scale);
    let raster_height_px = raster_px(page.height * scale);

    let page_width_mm = units_to_mm(page.width);
    let page_height_mm = units_to_mm(page.height);
    let image_width_mm = page_width_mm;
    let image_height_mm = f64::from(raster_height_px) * image_width_mm / f64::from(raster_width_px);

    PdfLayout {
        orientation: if page.is_landscape() { Orientation::Landscape } else { Orientation::Portrait },
        page_width_mm,
        page_height_mm,
        raster_width_px,
        raster_height_px,
        image_width_mm,
        image_height_mm,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn raster_px(len: f64) -> u32 {
    len.round().clamp(1.0, f64::from(u32::MAX)) as u32
}
