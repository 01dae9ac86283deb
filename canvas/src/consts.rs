//! Shared numeric constants for the canvas crate.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height a resize may produce, in page units.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Side length of a resize handle square, in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 12.0;

// ── Viewport ────────────────────────────────────────────────────

/// Scale at which the page is shown inside the editor viewport.
pub const DEFAULT_PAGE_SCALE: f64 = 0.8;

/// Spacing of the background grid, in page units.
pub const GRID_SPACING: f64 = 20.0;

// ── Export ──────────────────────────────────────────────────────

/// Version string written into exported document metadata.
pub const FORMAT_VERSION: &str = "1.0.0";

/// Millimetres per page unit. Page sizes are given in typographic points (1/72 in).
pub const MM_PER_UNIT: f64 = 0.352_778;

/// Raster scale used when the page is rendered for PDF export.
pub const DEFAULT_RASTER_SCALE: f64 = 2.0;
