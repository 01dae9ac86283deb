//! JavaScript entry point for the browser host.
//!
//! [`CanvasEditor`] wraps [`Engine`] for `wasm-bindgen`. Every handler returns
//! the actions it produced as a JSON array the host dispatches on; failures
//! become JS exceptions carrying the error message. Argument parsing lives in
//! free functions over [`EngineCore`] so it runs without a browser.

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::codec::{ExportError, ImportError};
use crate::doc::{ElementId, ElementKind, ElementPatch};
use crate::engine::{Action, Engine, EngineCore};
use crate::input::{Button, Key};
use crate::page::PageSize;
use crate::template::Template;
use crate::viewport::Point;

/// Errors raised across the JS boundary.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("unknown element kind {0:?}")]
    UnknownKind(String),
    #[error("unknown page size {0:?}")]
    UnknownPage(String),
    #[error("unknown template {0:?}")]
    UnknownTemplate(String),
    #[error("invalid element patch: {0}")]
    InvalidPatch(serde_json::Error),
    #[error("could not encode actions: {0}")]
    Encode(serde_json::Error),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<BindingError> for JsValue {
    fn from(e: BindingError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Encode handler output for the host.
///
/// # Errors
///
/// Returns [`BindingError::Encode`] if an action cannot be serialized.
pub fn actions_json(actions: &[Action]) -> Result<String, BindingError> {
    serde_json::to_string(actions).map_err(BindingError::Encode)
}

/// Drop a palette item named by its wire kind (`"circle"`, `"text"`, ...).
///
/// # Errors
///
/// Returns [`BindingError::UnknownKind`] for names outside the palette.
pub fn drop_named(core: &mut EngineCore, kind: &str, screen_pt: Point) -> Result<Vec<Action>, BindingError> {
    let kind = ElementKind::parse(kind).ok_or_else(|| BindingError::UnknownKind(kind.to_owned()))?;
    Ok(core.drop_element(kind, screen_pt))
}

/// Apply a property edit given as a JSON patch object.
///
/// # Errors
///
/// Returns [`BindingError::InvalidPatch`] if `patch_json` is not a patch.
pub fn update_from_json(core: &mut EngineCore, id: &str, patch_json: &str) -> Result<Vec<Action>, BindingError> {
    let patch: ElementPatch = serde_json::from_str(patch_json).map_err(BindingError::InvalidPatch)?;
    Ok(core.update_element(&ElementId::new(id), patch))
}

/// Switch to the page format called `name`.
///
/// # Errors
///
/// Returns [`BindingError::UnknownPage`] if no format has that name.
pub fn set_page_named(core: &mut EngineCore, name: &str) -> Result<Vec<Action>, BindingError> {
    let page = PageSize::find(name).ok_or_else(|| BindingError::UnknownPage(name.to_owned()))?;
    Ok(core.set_page(page))
}

/// Replace the document with the template whose id or name is `key`.
///
/// # Errors
///
/// Returns [`BindingError::UnknownTemplate`] if nothing matches.
pub fn load_template_named(core: &mut EngineCore, key: &str) -> Result<Vec<Action>, BindingError> {
    let template = Template::find(key).ok_or_else(|| BindingError::UnknownTemplate(key.to_owned()))?;
    Ok(core.load_template(&template))
}

/// The brochure canvas as seen from JavaScript.
#[wasm_bindgen]
pub struct CanvasEditor {
    engine: Engine,
}

// Every `Err` is a `BindingError` or browser error converted to a JS exception.
#[allow(clippy::missing_errors_doc)]
#[wasm_bindgen]
impl CanvasEditor {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> CanvasEditor {
        CanvasEditor { engine: Engine::new(canvas) }
    }

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Result<String, JsValue> {
        Ok(actions_json(&self.engine.set_viewport(width_css, height_css, dpr))?)
    }

    #[wasm_bindgen(js_name = setPage)]
    pub fn set_page(&mut self, name: &str) -> Result<String, JsValue> {
        Ok(actions_json(&set_page_named(&mut self.engine.core, name)?)?)
    }

    // --- Pointer and keyboard ---

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsValue> {
        Ok(actions_json(&self.engine.on_pointer_down(Point::new(x, y), Button::from_dom(button)))?)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        Ok(actions_json(&self.engine.on_pointer_move(Point::new(x, y)))?)
    }

    /// Returns `true` when the host should request an animation frame and
    /// call `flushPointerMove` from it.
    #[wasm_bindgen(js_name = queuePointerMove)]
    pub fn queue_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.engine.queue_pointer_move(Point::new(x, y))
    }

    #[wasm_bindgen(js_name = flushPointerMove)]
    pub fn flush_pointer_move(&mut self) -> Result<String, JsValue> {
        Ok(actions_json(&self.engine.flush_pointer_move())?)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsValue> {
        Ok(actions_json(&self.engine.on_pointer_up(Point::new(x, y), Button::from_dom(button)))?)
    }

    #[wasm_bindgen(js_name = cancelGesture)]
    pub fn cancel_gesture(&mut self) -> Result<String, JsValue> {
        Ok(actions_json(&self.engine.cancel_gesture())?)
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: String) -> Result<String, JsValue> {
        Ok(actions_json(&self.engine.on_key_down(&Key(key)))?)
    }

    // --- Creation and edits ---

    #[wasm_bindgen(js_name = dropElement)]
    pub fn drop_element(&mut self, kind: &str, x: f64, y: f64) -> Result<String, JsValue> {
        Ok(actions_json(&drop_named(&mut self.engine.core, kind, Point::new(x, y))?)?)
    }

    #[wasm_bindgen(js_name = addUploadedImage)]
    pub fn add_uploaded_image(&mut self, mime: &str, bytes: &[u8]) -> Result<String, JsValue> {
        Ok(actions_json(&self.engine.add_uploaded_image(mime, bytes))?)
    }

    #[wasm_bindgen(js_name = updateElement)]
    pub fn update_element(&mut self, id: &str, patch_json: &str) -> Result<String, JsValue> {
        Ok(actions_json(&update_from_json(&mut self.engine.core, id, patch_json)?)?)
    }

    // --- Whole document ---

    #[wasm_bindgen(js_name = loadTemplate)]
    pub fn load_template(&mut self, key: &str) -> Result<String, JsValue> {
        Ok(actions_json(&load_template_named(&mut self.engine.core, key)?)?)
    }

    pub fn clear(&mut self) -> Result<String, JsValue> {
        Ok(actions_json(&self.engine.clear())?)
    }

    #[wasm_bindgen(js_name = importJson)]
    pub fn import_json(&mut self, text: &str) -> Result<String, JsValue> {
        let actions = self.engine.import_json(text).map_err(BindingError::from)?;
        Ok(actions_json(&actions)?)
    }

    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self, pretty: bool) -> Result<String, JsValue> {
        Ok(self.engine.export_json(pretty).map_err(BindingError::from)?)
    }

    /// PDF placement for the current page as a JSON object.
    #[wasm_bindgen(js_name = pdfLayout)]
    pub fn pdf_layout(&self, raster_scale: f64) -> Result<String, JsValue> {
        let layout = self.engine.pdf_layout(raster_scale);
        Ok(serde_json::to_string(&layout).map_err(BindingError::Encode)?)
    }

    // --- Drawing ---

    pub fn render(&mut self) -> Result<(), JsValue> {
        self.engine.render()
    }

    /// PNG data URL of the page alone, for PDF export.
    #[wasm_bindgen(js_name = rasterizePng)]
    pub fn rasterize_png(&mut self, raster_scale: f64) -> Result<String, JsValue> {
        Ok(self.engine.rasterize_png(raster_scale).map_err(BindingError::from)?)
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<String> {
        self.engine.selection().map(ToString::to_string)
    }

    #[must_use]
    pub fn cursor(&self) -> String {
        self.engine.core.cursor().to_owned()
    }

    /// `[x, y, width, height]` of an element in CSS pixels.
    #[wasm_bindgen(js_name = screenRect)]
    #[must_use]
    pub fn screen_rect(&self, id: &str) -> Option<Box<[f64]>> {
        let r = self.engine.screen_rect(&ElementId::new(id))?;
        Some(vec![r.x, r.y, r.width, r.height].into_boxed_slice())
    }
}
