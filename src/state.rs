//! Board state: the asset library and the canvas item list.
//!
//! DESIGN
//! ======
//! `BoardState` is the only writer of both lists. The canvas engine never
//! mutates items; it reports `Action`s and `apply` routes them here. Deleting
//! an asset also removes every canvas item showing the same url.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use canvas::consts::{DEFAULT_PLACE_X, DEFAULT_PLACE_Y};
use canvas::doc::{Asset, AssetId, ItemId, PlacedItem};
use canvas::engine::Action;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("no asset with id {0}")]
    UnknownAsset(AssetId),
}

// =============================================================================
// BOARD STATE
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub assets: Vec<Asset>,
    pub items: Vec<PlacedItem>,
}

impl BoardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn asset(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| &a.id == id)
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    // --- Asset library ---

    pub fn add_asset(&mut self, asset: Asset) {
        tracing::debug!(id = %asset.id, url = %asset.url, "asset added");
        self.assets.push(asset);
    }

    /// Remove an asset and every item sharing its url. Returns how many items went with it.
    pub fn delete_asset(&mut self, id: &AssetId) -> usize {
        let Some(pos) = self.assets.iter().position(|a| &a.id == id) else {
            return 0;
        };
        let asset = self.assets.remove(pos);
        let before = self.items.len();
        self.items.retain(|item| item.url != asset.url);
        let cascaded = before - self.items.len();
        tracing::info!(id = %asset.id, cascaded, "asset deleted");
        cascaded
    }

    // --- Canvas items ---

    /// Place a new instance of an asset at the default position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownAsset`] when no asset has `asset_id`.
    pub fn add_to_canvas(&mut self, asset_id: &AssetId) -> Result<&PlacedItem, BoardError> {
        self.place(asset_id, DEFAULT_PLACE_X, DEFAULT_PLACE_Y)
    }

    /// Place a new instance of an asset where it was dropped.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownAsset`] when no asset has `asset_id`.
    pub fn place_from_drop(&mut self, asset_id: &AssetId, x: f64, y: f64) -> Result<&PlacedItem, BoardError> {
        self.place(asset_id, x, y)
    }

    /// Replace the item with the same id. Unknown ids are ignored.
    pub fn update_item(&mut self, item: PlacedItem) {
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => *slot = item,
            None => tracing::debug!(id = %item.id, "update for unknown item ignored"),
        }
    }

    /// Remove exactly the item with `id`. Returns whether one was removed.
    pub fn delete_item(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.id != id);
        let removed = self.items.len() != before;
        if removed {
            tracing::debug!(%id, "item deleted");
        }
        removed
    }

    /// Route an engine action. Returns a message to show the user, if any.
    pub fn apply(&mut self, action: Action) -> Option<String> {
        match action {
            Action::ItemUpdated(item) => {
                self.update_item(item);
                None
            }
            Action::ItemPlaced { asset_id, x, y } => match self.place_from_drop(&asset_id, x, y) {
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("drop rejected: {e}");
                    Some(e.to_string())
                }
            },
            Action::ItemDeleted { id } => {
                self.delete_item(&id);
                None
            }
            Action::Notify(message) => Some(message),
            Action::SetCursor(_) | Action::CapturePointer | Action::ReleasePointer | Action::RenderNeeded => None,
        }
    }

    fn place(&mut self, asset_id: &AssetId, x: f64, y: f64) -> Result<&PlacedItem, BoardError> {
        let asset = self.asset(asset_id).ok_or(BoardError::UnknownAsset(*asset_id))?;
        let item = PlacedItem::from_asset(asset, x, y);
        tracing::debug!(asset = %asset_id, item = %item.id, x, y, "item placed");
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }
}
