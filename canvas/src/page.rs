//! Page sizes offered by the editor.
//!
//! The page defines the coordinate space every element lives in: its width
//! and height are the clamp bounds used by the geometry engine.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use crate::geometry::Bounds;

/// A named page format. Dimensions are in page units (typographic points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
    pub name: &'static str,
}

pub const A4_PORTRAIT: PageSize = PageSize { width: 595.0, height: 842.0, name: "A4 Portrait" };
pub const A4_LANDSCAPE: PageSize = PageSize { width: 842.0, height: 595.0, name: "A4 Landscape" };
pub const LETTER_PORTRAIT: PageSize = PageSize { width: 612.0, height: 792.0, name: "Letter Portrait" };
pub const LETTER_LANDSCAPE: PageSize = PageSize { width: 792.0, height: 612.0, name: "Letter Landscape" };
pub const PRESENTATION: PageSize = PageSize { width: 1200.0, height: 800.0, name: "Presentation" };
pub const SOCIAL_MEDIA_POST: PageSize = PageSize { width: 800.0, height: 1200.0, name: "Social Media Post" };
pub const HD_LANDSCAPE: PageSize = PageSize { width: 1920.0, height: 1080.0, name: "HD Landscape" };
pub const SQUARE: PageSize = PageSize { width: 1080.0, height: 1080.0, name: "Square" };

/// Every page format, in the order the page picker lists them.
pub const PAGE_SIZES: [PageSize; 8] = [
    A4_PORTRAIT,
    A4_LANDSCAPE,
    LETTER_PORTRAIT,
    LETTER_LANDSCAPE,
    PRESENTATION,
    SOCIAL_MEDIA_POST,
    HD_LANDSCAPE,
    SQUARE,
];

impl Default for PageSize {
    fn default() -> Self {
        A4_PORTRAIT
    }
}

impl PageSize {
    /// Look up a page format by name, ignoring ASCII case and treating `-`
    /// and `_` as spaces (`"a4-portrait"` finds "A4 Portrait").
    #[must_use]
    pub fn find(name: &str) -> Option<PageSize> {
        let wanted = name.trim().replace(['-', '_'], " ");
        PAGE_SIZES
            .iter()
            .copied()
            .find(|page| page.name.eq_ignore_ascii_case(&wanted))
    }

    /// Clamp bounds for element geometry on this page.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds { width: self.width, height: self.height }
    }

    /// Whether the page is wider than it is tall.
    #[must_use]
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}
