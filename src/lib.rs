//! Profile board: collect images and SVGs, lay them out on a fixed 800×600
//! canvas, and export the layout.
//!
//! The interactive surface lives in the `canvas` crate. This crate holds the
//! state the surface reports into, plus ingestion and export.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`state`] | Asset library and item list; applies engine actions |
//! | [`ingest`] | Files and URLs → assets |
//! | [`export`] | Layout JSON, clipboard, standalone SVG rendering |

pub mod export;
pub mod ingest;
pub mod state;
