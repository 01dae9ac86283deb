//! Hit testing: which element body or resize handle lies under a point.
//!
//! Handles belong to the selected element only and win over bodies, so a
//! handle overlapping a neighbouring element still starts a resize. Bodies are
//! tested topmost first. Rotation is ignored: both handles and bodies use the
//! unrotated box.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::HANDLE_SIZE_PX;
use crate::doc::{Document, ElementId};
use crate::geometry::{Rect, ResizeHandle, handle_point};
use crate::viewport::{Point, Viewport};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeHandle),
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub id: ElementId,
    pub part: HitPart,
}

/// Page-space hit boxes of the eight handles around `rect`, each
/// [`HANDLE_SIZE_PX`] screen pixels square at the current zoom.
#[must_use]
pub fn handle_boxes(rect: &Rect, viewport: &Viewport) -> [(ResizeHandle, Rect); 8] {
    let size = viewport.screen_dist_to_page(HANDLE_SIZE_PX);
    ResizeHandle::ALL.map(|h| (h, Rect::centered_square(handle_point(rect, h), size)))
}

/// Test what is under `page_pt`, checking the selected element's handles first.
#[must_use]
pub fn hit_test(page_pt: Point, doc: &Document, viewport: &Viewport) -> Option<Hit> {
    if let Some(sel) = doc.selected_element() {
        for (handle, hit_box) in handle_boxes(&sel.rect(), viewport) {
            if hit_box.contains(page_pt) {
                return Some(Hit { id: sel.id.clone(), part: HitPart::ResizeHandle(handle) });
            }
        }
    }

    doc.elements()
        .iter()
        .rev()
        .find(|el| el.rect().contains(page_pt))
        .map(|el| Hit { id: el.id.clone(), part: HitPart::Body })
}
