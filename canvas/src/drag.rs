//! Drag/placement controller: repositioning placed items and receiving drops.
//!
//! Repositioning previews the new position locally and commits a single
//! position-only update when the gesture ends. Drops carry a small JSON payload
//! naming the source asset; the controller maps the drop point into logical
//! space and asks the owner to create an item centred there. It never resolves
//! the asset itself.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use serde::Deserialize;

use crate::consts::DEFAULT_ITEM_SIZE;
use crate::doc::{AssetId, ItemId, PlacedItem};
use crate::geometry::{self, GeometryError, Point, ScreenRect, Size};

// =============================================================
// Drop
// =============================================================

/// The transferred drag data. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DropPayload {
    pub id: String,
}

impl DropPayload {
    /// The asset this payload refers to.
    ///
    /// # Errors
    ///
    /// [`DropError::UnknownAsset`] naming the id when it cannot be an asset id.
    pub fn asset_id(&self) -> Result<AssetId, DropError> {
        AssetId::parse_str(self.id.trim()).map_err(|_| DropError::UnknownAsset(self.id.clone()))
    }
}

/// Request to create a new item from an asset, at a top-left position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    pub asset_id: AssetId,
    pub x: f64,
    pub y: f64,
}

/// Why a drop was ignored.
#[derive(Debug, thiserror::Error)]
pub enum DropError {
    #[error("nothing was dropped")]
    MissingPayload,
    #[error("dropped data is not an asset reference: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("dropped asset \"{0}\" is not in the library")]
    UnknownAsset(String),
    #[error("cannot place item: {0}")]
    Geometry(#[from] GeometryError),
}

/// Parse the raw drag data of a drop.
///
/// # Errors
///
/// [`DropError::MissingPayload`] when there is no (or only blank) data, and
/// [`DropError::MalformedPayload`] when it is not `{ "id": <string>, ... }`.
pub fn parse_payload(raw: Option<&str>) -> Result<DropPayload, DropError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(DropError::MissingPayload)?;
    Ok(serde_json::from_str(raw)?)
}

/// Turn a drop at `screen_pt` into a placement whose centre is the drop point.
///
/// # Errors
///
/// Any [`DropError`]; the drop is then a no-op for the caller.
pub fn placement_from_drop(
    raw: Option<&str>,
    screen_pt: Point,
    rect: ScreenRect,
    logical: Size,
) -> Result<PlacementRequest, DropError> {
    let asset_id = parse_payload(raw)?.asset_id()?;
    let at = geometry::map_screen_to_canvas(screen_pt, rect, logical)?;
    Ok(PlacementRequest {
        asset_id,
        x: at.x - DEFAULT_ITEM_SIZE / 2.0,
        y: at.y - DEFAULT_ITEM_SIZE / 2.0,
    })
}

// =============================================================
// Reposition
// =============================================================

/// An in-progress move of an existing item.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveGesture {
    pub item: PlacedItem,
    pub start_pointer: Point,
    pub current_pointer: Point,
}

impl MoveGesture {
    /// The item as it should be drawn right now.
    #[must_use]
    pub fn preview(&self) -> PlacedItem {
        let dx = self.current_pointer.x - self.start_pointer.x;
        let dy = self.current_pointer.y - self.start_pointer.y;
        self.item.moved_to(self.item.x + dx, self.item.y + dy)
    }

    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.current_pointer != self.start_pointer
    }
}

/// Owns the single active move gesture, if any.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<MoveGesture>,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, item: &PlacedItem, pointer: Point) {
        log::debug!("move start: item={}", item.id);
        self.active = Some(MoveGesture { item: item.clone(), start_pointer: pointer, current_pointer: pointer });
    }

    /// Track the pointer. Returns `false` when no move is active.
    pub fn update(&mut self, pointer: Point) -> bool {
        match self.active.as_mut() {
            Some(g) => {
                g.current_pointer = pointer;
                true
            }
            None => false,
        }
    }

    /// Finish the gesture. Returns the committed record when the item moved.
    pub fn end(&mut self) -> Option<PlacedItem> {
        let g = self.active.take()?;
        log::debug!("move end: item={} moved={}", g.item.id, g.has_moved());
        g.has_moved().then(|| g.preview())
    }

    /// Discard the gesture without committing.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn active_item(&self) -> Option<ItemId> {
        self.active.as_ref().map(|g| g.item.id)
    }

    /// Preview record for the item being moved.
    #[must_use]
    pub fn preview(&self) -> Option<PlacedItem> {
        self.active.as_ref().map(MoveGesture::preview)
    }
}
