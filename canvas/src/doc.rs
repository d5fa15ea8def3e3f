//! Document model: uploaded assets and the items placed on the canvas.
//!
//! `Asset` is owned by the ingestion side and read-only here. `PlacedItem` is
//! one positioned instance of an asset; it copies what it needs from the asset
//! at placement time and keeps no back-reference. Both serialize with `serde`
//! so they travel across the host boundary as plain JSON.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_ITEM_SIZE;
use crate::geometry::Point;

/// Unique identifier for an asset.
pub type AssetId = Uuid;

/// Unique identifier for a placed item.
pub type ItemId = Uuid;

/// Whether inline markup embedding is attempted for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Vector graphic; may carry inline markup.
    #[serde(alias = "svg")]
    Vector,
    /// Any other image, referenced by URL only.
    #[serde(alias = "image")]
    Raster,
}

/// An uploaded or referenced visual resource, not yet positioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    /// Blob, remote, file or data URL of the content.
    pub url: String,
    pub kind: AssetKind,
    /// Raw markup, present only for vector assets whose source was readable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// One positioned, sized instance of an asset on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    /// Fresh per placement; never equal to the source asset's id.
    pub id: ItemId,
    pub url: String,
    pub kind: AssetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Left edge in logical units. May be negative.
    pub x: f64,
    /// Top edge in logical units. May be negative.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacedItem {
    /// Instantiate `asset` at `(x, y)` with the default size and a fresh id.
    #[must_use]
    pub fn from_asset(asset: &Asset, x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: asset.url.clone(),
            kind: asset.kind,
            content: asset.content.clone(),
            x,
            y,
            width: DEFAULT_ITEM_SIZE,
            height: DEFAULT_ITEM_SIZE,
        }
    }

    /// Whether `pt` lies inside the item's bounds (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    /// Replacement record with a new position and everything else unchanged.
    #[must_use]
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..self.clone() }
    }
}
