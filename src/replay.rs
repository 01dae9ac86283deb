//! Scripted input replay.
//!
//! A script sizes the viewport and then feeds a list of steps through
//! [`EngineCore`] exactly as the browser host would: screen coordinates,
//! DOM button codes, key names. Useful for reproducing gesture bugs and for
//! batch edits from the command line.
//!
//! ```json
//! {
//!   "viewport": { "width": 1200, "height": 900 },
//!   "steps": [
//!     { "op": "drop", "kind": "shape", "x": 400, "y": 300 },
//!     { "op": "down", "x": 420, "y": 320 },
//!     { "op": "queue", "x": 500, "y": 320 },
//!     { "op": "frame" },
//!     { "op": "up", "x": 500, "y": 320 },
//!     { "op": "key", "key": "Escape" }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use canvas::doc::{ElementId, ElementKind, ElementPatch};
use canvas::engine::{Action, EngineCore};
use canvas::input::{Button, Key};
use canvas::template::Template;
use canvas::viewport::Point;
use serde::Deserialize;

use crate::config::{self, ConfigError};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("invalid replay script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("step {index}: unknown template {name:?}")]
    UnknownTemplate { index: usize, name: String },
    #[error("step {index}: {source}")]
    Page {
        index: usize,
        #[source]
        source: ConfigError,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub viewport: ScriptViewport,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScriptViewport {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_dpr")]
    pub dpr: f64,
}

impl Default for ScriptViewport {
    fn default() -> Self {
        Self { width: 1200.0, height: 900.0, dpr: default_dpr() }
    }
}

fn default_dpr() -> f64 {
    1.0
}

/// One host event. Coordinates are CSS pixels relative to the canvas.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: i16,
    },
    Move {
        x: f64,
        y: f64,
    },
    /// Coalesced move, applied on the next `frame`.
    Queue {
        x: f64,
        y: f64,
    },
    Frame,
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        button: i16,
    },
    Cancel,
    Key {
        key: String,
    },
    Drop {
        kind: ElementKind,
        x: f64,
        y: f64,
    },
    Update {
        id: ElementId,
        fields: ElementPatch,
    },
    Template {
        name: String,
    },
    Page {
        name: String,
    },
    Clear,
}

/// What a replay did.
#[derive(Debug, Default)]
pub struct Report {
    pub steps: usize,
    pub actions: Vec<Action>,
    /// Frames the host would have scheduled for queued moves.
    pub frames_requested: usize,
}

impl Report {
    #[must_use]
    pub fn updates(&self) -> usize {
        self.actions.iter().filter(|a| matches!(a, Action::ElementUpdated { .. })).count()
    }

    #[must_use]
    pub fn created(&self) -> usize {
        self.actions.iter().filter(|a| matches!(a, Action::ElementCreated(_))).count()
    }

    #[must_use]
    pub fn deleted(&self) -> usize {
        self.actions.iter().filter(|a| matches!(a, Action::ElementDeleted { .. })).count()
    }
}

/// # Errors
///
/// Returns [`ReplayError::Parse`] if `text` is not a valid script.
pub fn parse_script(text: &str) -> Result<Script, ReplayError> {
    Ok(serde_json::from_str(text)?)
}

/// Run `script` against `core`. A gesture left open at the end of the
/// script is cancelled.
///
/// # Errors
///
/// Stops at the first step naming an unknown template or page.
pub fn replay(core: &mut EngineCore, script: &Script) -> Result<Report, ReplayError> {
    let vp = script.viewport;
    let mut report = Report::default();
    report.actions.extend(core.set_viewport(vp.width, vp.height, vp.dpr));

    for (index, step) in script.steps.iter().enumerate() {
        tracing::debug!(index, ?step, "replay step");
        let actions = match step {
            Step::Down { x, y, button } => core.on_pointer_down(Point::new(*x, *y), Button::from_dom(*button)),
            Step::Move { x, y } => core.on_pointer_move(Point::new(*x, *y)),
            Step::Queue { x, y } => {
                if core.queue_pointer_move(Point::new(*x, *y)) {
                    report.frames_requested += 1;
                }
                Vec::new()
            }
            Step::Frame => core.flush_pointer_move(),
            Step::Up { x, y, button } => core.on_pointer_up(Point::new(*x, *y), Button::from_dom(*button)),
            Step::Cancel => core.cancel_gesture(),
            Step::Key { key } => core.on_key_down(&Key(key.clone())),
            Step::Drop { kind, x, y } => core.drop_element(*kind, Point::new(*x, *y)),
            Step::Update { id, fields } => core.update_element(id, fields.clone()),
            Step::Template { name } => {
                let template = Template::find(name)
                    .ok_or_else(|| ReplayError::UnknownTemplate { index, name: name.clone() })?;
                core.load_template(&template)
            }
            Step::Page { name } => {
                let page = config::parse_page(name).map_err(|source| ReplayError::Page { index, source })?;
                core.set_page(page)
            }
            Step::Clear => core.clear(),
        };
        report.steps += 1;
        report.actions.extend(actions);
    }

    if let Some(id) = core.input.element_id() {
        tracing::warn!(element = %id, "script ended mid-gesture; cancelling");
        report.actions.extend(core.cancel_gesture());
    }
    Ok(report)
}
