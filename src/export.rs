//! Layout export: the board's items as portable JSON, and back.
//!
//! Exported entries carry geometry and a url only. Inline vector content is
//! left out, so a re-imported layout renders vector items by reference until
//! content is re-attached from the asset library.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use canvas::doc::{Asset, AssetKind, ItemId, PlacedItem};
use canvas::registry::HandleRegistry;
use canvas::surface::{self, SceneItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

/// One exported item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub id: ItemId,
    pub url: String,
    #[serde(alias = "type")]
    pub kind: AssetKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&PlacedItem> for LayoutEntry {
    fn from(item: &PlacedItem) -> Self {
        Self {
            id: item.id,
            url: item.url.clone(),
            kind: item.kind,
            x: item.x,
            y: item.y,
            width: item.width,
            height: item.height,
        }
    }
}

impl From<LayoutEntry> for PlacedItem {
    fn from(entry: LayoutEntry) -> Self {
        Self {
            id: entry.id,
            url: entry.url,
            kind: entry.kind,
            content: None,
            x: entry.x,
            y: entry.y,
            width: entry.width,
            height: entry.height,
        }
    }
}

/// Pretty-printed JSON array of the items, in list order.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails.
pub fn export_layout(items: &[PlacedItem]) -> Result<String, ExportError> {
    let entries: Vec<LayoutEntry> = items.iter().map(LayoutEntry::from).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Parse an exported layout back into items (without content).
///
/// # Errors
///
/// Returns [`ExportError::Json`] when the text is not a layout array.
pub fn import_layout(text: &str) -> Result<Vec<PlacedItem>, ExportError> {
    let entries: Vec<LayoutEntry> = serde_json::from_str(text)?;
    Ok(entries.into_iter().map(PlacedItem::from).collect())
}

/// Give vector items without content the markup of a library asset with the same url.
pub fn reattach_content(items: &mut [PlacedItem], assets: &[Asset]) {
    for item in items.iter_mut().filter(|i| i.kind == AssetKind::Vector && i.content.is_none()) {
        if let Some(content) = assets.iter().find(|a| a.url == item.url).and_then(|a| a.content.clone()) {
            item.content = Some(content);
        }
    }
}

/// A standalone SVG document of the items as the canvas draws them, undecorated.
#[must_use]
pub fn compose_document(items: &[PlacedItem]) -> String {
    let mut registry = HandleRegistry::new();
    registry.reconcile(items);
    let entries: Vec<SceneItem<'_>> =
        items.iter().map(|item| SceneItem { item, handle: registry.handle_for(item.id), decorated: false }).collect();
    surface::document_markup(&entries)
}

/// Put `text` on the system clipboard.
///
/// # Errors
///
/// Returns [`ExportError::Clipboard`] when no clipboard is reachable.
pub fn copy_to_clipboard(text: &str) -> Result<(), ExportError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_owned())?;
    tracing::info!(bytes = text.len(), "layout copied to clipboard");
    Ok(())
}
