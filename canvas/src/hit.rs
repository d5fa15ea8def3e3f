//! Hit-testing against placed items and their decorations.
//!
//! Decorations veto the full-bounds drag handle: within one item the delete
//! affordance wins, then the corner handles, then the body. Items are tested
//! topmost first (reverse insertion order).

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{DELETE_OFFSET, DELETE_RADIUS, HANDLE_RADIUS};
use crate::doc::{ItemId, PlacedItem};
use crate::geometry::Point;

/// Which part of an item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The full-bounds drag handle.
    Body,
    /// One of the four corner resize handles.
    ResizeHandle(Corner),
    /// The delete affordance at the top-right corner.
    DeleteButton,
}

/// A corner of an item's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se];

    /// Whether this corner lies on the left edge.
    #[must_use]
    pub fn is_left(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    /// Whether this corner lies on the top edge.
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }

    /// The diagonally opposite corner.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Nw => Self::Se,
            Self::Ne => Self::Sw,
            Self::Sw => Self::Ne,
            Self::Se => Self::Nw,
        }
    }

    /// Short lowercase name (`"nw"`, `"ne"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::Ne => "ne",
            Self::Sw => "sw",
            Self::Se => "se",
        }
    }

    /// CSS cursor shown over this corner's handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }

    /// Position of this corner for a box at `(x, y)` of size `w` × `h`.
    #[must_use]
    pub fn position(self, x: f64, y: f64, w: f64, h: f64) -> Point {
        let px = if self.is_left() { x } else { x + w };
        let py = if self.is_top() { y } else { y + h };
        Point::new(px, py)
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub item_id: ItemId,
    pub part: HitPart,
}

/// Centre of the delete affordance, in logical coordinates.
#[must_use]
pub fn delete_button_center(item: &PlacedItem) -> Point {
    Point::new(item.x + item.width - DELETE_OFFSET, item.y - DELETE_OFFSET)
}

/// Find the item part under `pt`, topmost item first.
#[must_use]
pub fn hit_test(pt: Point, items: &[PlacedItem]) -> Option<Hit> {
    items.iter().rev().find_map(|item| {
        hit_item(pt, item).map(|part| Hit { item_id: item.id, part })
    })
}

fn hit_item(pt: Point, item: &PlacedItem) -> Option<HitPart> {
    if within(pt, delete_button_center(item), DELETE_RADIUS) {
        return Some(HitPart::DeleteButton);
    }
    for corner in Corner::ALL {
        let c = corner.position(item.x, item.y, item.width, item.height);
        if within(pt, c, HANDLE_RADIUS) {
            return Some(HitPart::ResizeHandle(corner));
        }
    }
    if item.contains(pt) {
        return Some(HitPart::Body);
    }
    None
}

fn within(pt: Point, center: Point, radius: f64) -> bool {
    let dx = pt.x - center.x;
    let dy = pt.y - center.y;
    dx * dx + dy * dy <= radius * radius
}
