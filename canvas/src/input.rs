//! Input model: mouse buttons, keys, and the gesture state machine.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. Active variants carry the element geometry and pointer position
//! recorded at pointer-down; every move recomputes from that start state rather
//! than from the previous move.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ElementId;
use crate::geometry::{Rect, ResizeHandle};
use crate::viewport::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Unknown codes are treated as
    /// secondary so they never start a gesture.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            _ => Self::Secondary,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Removes the selected element.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete"
    }

    /// Clears the selection.
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an element across the page.
    Dragging {
        /// Id of the element being dragged.
        id: ElementId,
        /// Element geometry at pointer-down.
        start: Rect,
        /// Page-space pointer position at pointer-down.
        start_pointer: Point,
    },
    /// The user is resizing an element by dragging one of its eight handles.
    Resizing {
        /// Id of the element being resized.
        id: ElementId,
        /// Which corner/edge handle is being dragged.
        handle: ResizeHandle,
        /// Element geometry at pointer-down.
        start: Rect,
        /// Page-space pointer position at pointer-down.
        start_pointer: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Id of the element the active gesture targets.
    #[must_use]
    pub fn element_id(&self) -> Option<&ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(id),
        }
    }

    /// CSS cursor to show while this gesture is active.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        match self {
            Self::Idle => "default",
            Self::Dragging { .. } => "move",
            Self::Resizing { handle, .. } => handle.cursor(),
        }
    }
}
