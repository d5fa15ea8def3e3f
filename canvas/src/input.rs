//! Input model: pointer buttons and the hover state visible to the renderer.
//!
//! Active gestures live in their controllers ([`crate::resize`],
//! [`crate::drag`]); this module only holds what persists between gestures.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ItemId;
use crate::hit::{Hit, HitPart};

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
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// CSS cursor names the engine asks the host to show.
pub mod cursor {
    pub const DEFAULT: &str = "default";
    pub const MOVE: &str = "move";
    pub const POINTER: &str = "pointer";
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// Item under the pointer while no gesture is active. Its decorations are shown.
    pub hovered: Option<ItemId>,
    /// Cursor last requested from the host.
    pub cursor: &'static str,
}

impl Default for UiState {
    fn default() -> Self {
        Self { hovered: None, cursor: cursor::DEFAULT }
    }
}

/// Cursor to show for a hit (or for empty canvas).
#[must_use]
pub fn cursor_for(hit: Option<Hit>) -> &'static str {
    match hit.map(|h| h.part) {
        None => cursor::DEFAULT,
        Some(HitPart::Body) => cursor::MOVE,
        Some(HitPart::DeleteButton) => cursor::POINTER,
        Some(HitPart::ResizeHandle(corner)) => corner.cursor(),
    }
}
