#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::DEFAULT_PAGE_SCALE;
use crate::page::PageSize;

/// A point (or displacement) in either screen or page space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Point {
        Point { x: self.x - origin.x, y: self.y - origin.y }
    }
}

/// Placement of the page inside the editor viewport.
///
/// `origin_x` / `origin_y` are the screen position (CSS pixels) of the page's
/// top-left corner. `scale` is CSS pixels per page unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin_x: f64,
    pub origin_y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { origin_x: 0.0, origin_y: 0.0, scale: 1.0 }
    }
}

impl Viewport {
    /// Center `page` inside a `width` x `height` viewport at the editor's
    /// default page scale.
    #[must_use]
    pub fn centered(page: &PageSize, width: f64, height: f64) -> Self {
        Self::centered_with_scale(page, width, height, DEFAULT_PAGE_SCALE)
    }

    /// Center `page` inside a `width` x `height` viewport at `scale`.
    ///
    /// Non-positive scales fall back to 1.0.
    #[must_use]
    pub fn centered_with_scale(page: &PageSize, width: f64, height: f64, scale: f64) -> Self {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        Self {
            origin_x: (width - page.width * scale) * 0.5,
            origin_y: (height - page.height * scale) * 0.5,
            scale,
        }
    }

    /// Convert a screen-space point (CSS pixels) to page coordinates.
    #[must_use]
    pub fn screen_to_page(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.origin_x) / self.scale,
            y: (screen.y - self.origin_y) / self.scale,
        }
    }

    /// Convert a page-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn page_to_screen(&self, page: Point) -> Point {
        Point {
            x: page.x * self.scale + self.origin_x,
            y: page.y * self.scale + self.origin_y,
        }
    }

    /// Convert a screen-space distance (pixels) to a page-space distance.
    #[must_use]
    pub fn screen_dist_to_page(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }
}
