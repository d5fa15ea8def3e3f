//! Canvas interaction engine for the profile board.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! fixed 800×600 logical surface: mapping pointer positions into logical
//! units, hit-testing items and their decorations, running resize and move
//! gestures, turning asset drops into placement requests, and rendering each
//! item safely. The host owns the item list; it feeds the list in and applies
//! the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Asset and placed-item records |
//! | [`geometry`] | Screen → logical coordinate mapping and letterboxing |
//! | [`hit`] | Hit-testing against items, handles and delete buttons |
//! | [`resize`] | Corner-anchored resize gesture |
//! | [`drag`] | Drop payloads, drop placement and move gesture |
//! | [`registry`] | Stable per-item node handles |
//! | [`render`] | Per-item content rendering with fallbacks |
//! | [`markup`] | SVG validation and sanitization |
//! | [`surface`] | Scene markup with decorations |
//! | [`input`] | Buttons, hover state and cursors |
//! | [`consts`] | Shared constants (logical size, handle radii, minimum sizes) |

pub mod consts;
pub mod doc;
pub mod drag;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod markup;
pub mod registry;
pub mod render;
pub mod resize;
pub mod surface;
