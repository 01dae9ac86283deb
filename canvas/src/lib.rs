//! Canvas interaction engine for the brochure editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! document being edited, turns raw pointer and keyboard events into element
//! mutations, hit-tests elements and their resize handles, and paints the page
//! onto a 2D canvas. The host JavaScript layer wires DOM events to the engine,
//! shows the property panel, and reacts to the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`bindings`] | `wasm-bindgen` class the JavaScript host drives |
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Element types and the in-memory document store |
//! | [`style`] | Per-kind element styles and the flat wire style bag |
//! | [`viewport`] | Page-to-screen transform and coordinate conversions |
//! | [`page`] | Page formats |
//! | [`geometry`] | Rectangles, resize handles, drag and resize math |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against elements and handles |
//! | [`render`] | Scene projection and `Canvas2D` painting |
//! | [`palette`] | Default elements for palette drops and image uploads |
//! | [`template`] | Built-in starter layouts |
//! | [`codec`] | JSON document import and export |
//! | [`pdf`] | PDF page placement for rasterized exports |
//! | [`consts`] | Shared numeric constants (minimum sizes, handle size, etc.) |

pub mod bindings;
pub mod codec;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod page;
pub mod palette;
pub mod pdf;
pub mod render;
pub mod style;
pub mod template;
pub mod viewport;
