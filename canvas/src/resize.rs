//! Resize controller: corner-handle gestures with an anchored opposite corner.
//!
//! A gesture is one optional record, created on pointer-down over a handle and
//! cleared on pointer-up. Every move recomputes the geometry from the values
//! captured at gesture start, so intermediate updates never accumulate error.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::consts::MIN_ITEM_SIZE;
use crate::doc::{ItemId, PlacedItem};
use crate::geometry::Point;
use crate::hit::Corner;

/// Position and size of an item box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn of(item: &PlacedItem) -> Self {
        Self { x: item.x, y: item.y, width: item.width, height: item.height }
    }

    /// Absolute position of `corner`.
    #[must_use]
    pub fn corner(&self, corner: Corner) -> Point {
        corner.position(self.x, self.y, self.width, self.height)
    }
}

/// Recompute `start` after dragging `corner` by `(dx, dy)`.
///
/// Width and height never drop below [`MIN_ITEM_SIZE`]; when they would, the
/// position is derived from the opposite edge so that edge stays put.
#[must_use]
pub fn resize_bounds(start: Bounds, corner: Corner, dx: f64, dy: f64) -> Bounds {
    let (x, width) = if corner.is_left() {
        let w = start.width - dx;
        if w < MIN_ITEM_SIZE {
            (start.x + start.width - MIN_ITEM_SIZE, MIN_ITEM_SIZE)
        } else {
            (start.x + dx, w)
        }
    } else {
        (start.x, (start.width + dx).max(MIN_ITEM_SIZE))
    };

    let (y, height) = if corner.is_top() {
        let h = start.height - dy;
        if h < MIN_ITEM_SIZE {
            (start.y + start.height - MIN_ITEM_SIZE, MIN_ITEM_SIZE)
        } else {
            (start.y + dy, h)
        }
    } else {
        (start.y, (start.height + dy).max(MIN_ITEM_SIZE))
    };

    Bounds { x, y, width, height }
}

/// An in-progress resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    /// The item record as it was at pointer-down.
    pub item: PlacedItem,
    /// The corner being dragged; its opposite is the anchor.
    pub corner: Corner,
    /// Logical pointer position at pointer-down.
    pub start_pointer: Point,
}

impl ResizeGesture {
    /// Full replacement record for the pointer at `pointer`.
    #[must_use]
    pub fn item_at(&self, pointer: Point) -> PlacedItem {
        let start = Bounds::of(&self.item);
        let b = resize_bounds(start, self.corner, pointer.x - self.start_pointer.x, pointer.y - self.start_pointer.y);
        PlacedItem { x: b.x, y: b.y, width: b.width, height: b.height, ..self.item.clone() }
    }

    /// The corner that stays fixed.
    #[must_use]
    pub fn anchor(&self) -> Corner {
        self.corner.opposite()
    }
}

/// Owns the single active resize gesture, if any.
#[derive(Debug, Default)]
pub struct ResizeController {
    active: Option<ResizeGesture>,
}

impl ResizeController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start resizing `item` from `corner`. Replaces any gesture already active.
    pub fn begin(&mut self, item: &PlacedItem, corner: Corner, pointer: Point) {
        log::debug!("resize start: item={} corner={}", item.id, corner.as_str());
        self.active = Some(ResizeGesture { item: item.clone(), corner, start_pointer: pointer });
    }

    /// Geometry for the pointer at `pointer`, or `None` when idle.
    #[must_use]
    pub fn update(&self, pointer: Point) -> Option<PlacedItem> {
        self.active.as_ref().map(|g| g.item_at(pointer))
    }

    /// Finish the gesture, returning it if one was active.
    pub fn end(&mut self) -> Option<ResizeGesture> {
        let ended = self.active.take();
        if let Some(g) = &ended {
            log::debug!("resize end: item={}", g.item.id);
        }
        ended
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the item being resized.
    #[must_use]
    pub fn active_item(&self) -> Option<ItemId> {
        self.active.as_ref().map(|g| g.item.id)
    }

    #[must_use]
    pub fn gesture(&self) -> Option<&ResizeGesture> {
        self.active.as_ref()
    }
}
