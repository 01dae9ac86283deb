//! Geometry engine: pointer deltas to element position and size.
//!
//! Every function here is pure. Gestures always compute from the geometry
//! recorded when the gesture started plus the total pointer displacement since
//! then, never from the previous move, so any subset of move events can be
//! skipped or coalesced without drift.
//!
//! Rotation is deliberately ignored: resize math and handle placement operate
//! on the unrotated, axis-aligned box even when the element is drawn rotated.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_ELEMENT_SIZE;
use crate::viewport::Point;

/// Axis-aligned box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Box of `size` x `size` centered on `center`.
    #[must_use]
    pub fn centered_square(center: Point, size: f64) -> Self {
        let half = size * 0.5;
        Self { x: center.x - half, y: center.y - half, width: size, height: size }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `pt` lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }
}

/// Extent of the page that element geometry is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

/// One of the eight resize handles, named by the edges it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    /// All handles, clockwise from the top edge.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::Ne,
        ResizeHandle::E,
        ResizeHandle::Se,
        ResizeHandle::S,
        ResizeHandle::Sw,
        ResizeHandle::W,
        ResizeHandle::Nw,
    ];

    /// Moves the top edge.
    #[must_use]
    pub fn north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Moves the bottom edge.
    #[must_use]
    pub fn south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Moves the right edge.
    #[must_use]
    pub fn east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Moves the left edge.
    #[must_use]
    pub fn west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Edge-tag spelling: `"n"`, `"ne"`, ... `"nw"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N => "n-resize",
            Self::Ne => "ne-resize",
            Self::E => "e-resize",
            Self::Se => "se-resize",
            Self::S => "s-resize",
            Self::Sw => "sw-resize",
            Self::W => "w-resize",
            Self::Nw => "nw-resize",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// New top-left position for an element dragged by `delta` from `start`.
///
/// Size is unchanged, so the clamp uses the element's original extent. When
/// the element is larger than the page the lower bound wins.
#[must_use]
pub fn compute_drag(start: &Rect, delta: Point, bounds: Bounds) -> Point {
    Point {
        x: clamp_axis(start.x + delta.x, bounds.width - start.width),
        y: clamp_axis(start.y + delta.y, bounds.height - start.height),
    }
}

/// New geometry for an element resized through `handle` by `delta` from `start`.
///
/// Each edge tag of the handle moves one edge while the opposite edge stays
/// anchored. The moving edge stops at the page edge and never makes the
/// dimension smaller than [`MIN_ELEMENT_SIZE`]. The position is then clamped
/// into the page using the final size.
#[must_use]
pub fn compute_resize(start: &Rect, handle: ResizeHandle, delta: Point, bounds: Bounds) -> Rect {
    let mut out = *start;

    if handle.west() {
        let right = start.right();
        out.width = fit_size(start.width - delta.x, right);
        out.x = right - out.width;
    }
    if handle.east() {
        out.width = fit_size(start.width + delta.x, bounds.width - start.x);
        out.x = start.x;
    }
    if handle.north() {
        let bottom = start.bottom();
        out.height = fit_size(start.height - delta.y, bottom);
        out.y = bottom - out.height;
    }
    if handle.south() {
        out.height = fit_size(start.height + delta.y, bounds.height - start.y);
        out.y = start.y;
    }

    out.x = clamp_axis(out.x, bounds.width - out.width);
    out.y = clamp_axis(out.y, bounds.height - out.height);
    out
}

/// Page-space point a handle sits on: a corner or an edge midpoint of the
/// unrotated box.
#[must_use]
pub fn handle_point(rect: &Rect, handle: ResizeHandle) -> Point {
    let x = if handle.west() {
        rect.x
    } else if handle.east() {
        rect.right()
    } else {
        rect.x + rect.width * 0.5
    };
    let y = if handle.north() {
        rect.y
    } else if handle.south() {
        rect.bottom()
    } else {
        rect.y + rect.height * 0.5
    };
    Point { x, y }
}

/// `degrees` folded into `[0, 360)`.
#[must_use]
pub fn normalize_rotation(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if r >= 360.0 { 0.0 } else { r }
}

/// `raw` limited to `[MIN_ELEMENT_SIZE, room]`; the minimum wins when the
/// room is smaller than it.
fn fit_size(raw: f64, room: f64) -> f64 {
    raw.min(room).max(MIN_ELEMENT_SIZE)
}

/// `value` limited to `[0, max]`; zero wins when `max` is negative.
pub(crate) fn clamp_axis(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}
