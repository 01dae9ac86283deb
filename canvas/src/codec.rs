//! JSON document files: export and all-or-nothing import.
//!
//! File shape:
//!
//! ```json
//! { "elements": [ ... ], "metadata": { "created": "2024-06-01T12:00:00Z", "version": "1.0.0" } }
//! ```
//!
//! Import validates the whole file before returning anything, so a caller
//! can replace its document only on success.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::consts::FORMAT_VERSION;
use crate::doc::{Element, ElementId};

/// File-level metadata written on export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// RFC 3339 creation timestamp.
    pub created: String,
    /// Format version, `"1.0.0"`.
    pub version: String,
}

/// A document file as written by [`export_json`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentFile<'a> {
    pub elements: &'a [Element],
    pub metadata: Metadata,
}

/// A successfully imported file.
#[derive(Debug, Clone, PartialEq)]
pub struct Imported {
    pub elements: Vec<Element>,
    /// `None` when the file carried no (readable) metadata.
    pub metadata: Option<Metadata>,
}

/// Errors from [`import_json`]. The `Display` text is shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("invalid document: expected a JSON object at the top level")]
    NotAnObject,
    #[error("invalid document: missing \"elements\"")]
    MissingElements,
    #[error("invalid document: \"elements\" must be an array, found {found}")]
    ElementsNotArray { found: &'static str },
    #[error("invalid element at index {index}: {source}")]
    InvalidElement {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate element id {0:?}")]
    DuplicateId(String),
}

/// Errors from exporting a document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("clock out of range: {0}")]
    Clock(#[from] time::error::ComponentRange),
    #[error("failed to rasterize page: {0}")]
    Raster(String),
}

/// Metadata for a file created at `created`.
///
/// # Errors
///
/// Returns [`ExportError::Timestamp`] if the timestamp cannot be written as
/// RFC 3339 (years outside 0..=9999).
pub fn metadata_at(created: OffsetDateTime) -> Result<Metadata, ExportError> {
    Ok(Metadata { created: created.format(&Rfc3339)?, version: FORMAT_VERSION.to_owned() })
}

/// Serialize `elements` into a document file.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted or serialization
/// fails.
pub fn export_json(elements: &[Element], created: OffsetDateTime, pretty: bool) -> Result<String, ExportError> {
    let file = DocumentFile { elements, metadata: metadata_at(created)? };
    let text = if pretty { serde_json::to_string_pretty(&file)? } else { serde_json::to_string(&file)? };
    Ok(text)
}

/// Parse and validate a document file.
///
/// # Errors
///
/// Returns an [`ImportError`] describing the first problem found; nothing is
/// partially imported.
pub fn import_json(text: &str) -> Result<Imported, ImportError> {
    let root: Value = serde_json::from_str(text).map_err(ImportError::InvalidJson)?;
    let Value::Object(mut root) = root else {
        return Err(ImportError::NotAnObject);
    };

    let raw = match root.remove("elements") {
        None => return Err(ImportError::MissingElements),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(ImportError::ElementsNotArray { found: json_type_name(&other) }),
    };

    let mut seen: HashSet<ElementId> = HashSet::with_capacity(raw.len());
    let mut elements = Vec::with_capacity(raw.len());
    for (index, item) in raw.into_iter().enumerate() {
        let el: Element =
            serde_json::from_value(item).map_err(|source| ImportError::InvalidElement { index, source })?;
        if !seen.insert(el.id.clone()) {
            return Err(ImportError::DuplicateId(el.id.to_string()));
        }
        elements.push(el);
    }

    let metadata = match root.remove("metadata") {
        None | Some(Value::Null) => None,
        Some(v) => match serde_json::from_value::<Metadata>(v) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("ignoring unreadable document metadata: {e}");
                None
            }
        },
    };

    Ok(Imported { elements, metadata })
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
