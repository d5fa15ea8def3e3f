//! Content rendering: turns a placed item into a safe, correctly sized drawable.
//!
//! Selection is a pure function of the item. Vector items with inline markup
//! are sanitized and embedded; anything else (or any embedding failure) becomes
//! a plain image reference; a reference that cannot be emitted safely becomes a
//! visible placeholder. Sanitization runs on every call; nothing is cached.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::doc::{AssetKind, PlacedItem};
use crate::markup::{self, escape_attr, escape_text};

/// Why the generic reference path could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("item has no url")]
    EmptyUrl,
    #[error("url uses a script scheme")]
    ScriptUrl,
}

/// The renderable form of one item, positioned at the item's local origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// Sanitized inline markup already sized to the item box.
    VectorEmbedded { markup: String },
    /// An image element pointing at the item's url, fit and centred.
    GenericReference { href: String, width: f64, height: f64 },
    /// Drawn when neither of the above is possible.
    ErrorPlaceholder { width: f64, height: f64, reason: String },
}

impl Drawable {
    /// SVG markup for this drawable, in item-local coordinates.
    #[must_use]
    pub fn to_markup(&self) -> String {
        match self {
            Self::VectorEmbedded { markup } => format!("<g class=\"pb-content\">{markup}</g>"),
            Self::GenericReference { href, width, height } => format!(
                "<image class=\"pb-content\" href=\"{}\" width=\"{width}\" height=\"{height}\" \
                 preserveAspectRatio=\"xMidYMid meet\"/>",
                escape_attr(href)
            ),
            Self::ErrorPlaceholder { width, height, reason } => format!(
                "<g class=\"pb-content pb-error\"><rect width=\"{width}\" height=\"{height}\" fill=\"#fee2e2\" \
                 stroke=\"#dc2626\" stroke-width=\"2\"/><path d=\"M0 0L{width} {height}M{width} 0L0 {height}\" \
                 stroke=\"#dc2626\" stroke-width=\"1\"/><title>{}</title></g>",
                escape_text(reason)
            ),
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::ErrorPlaceholder { .. })
    }
}

/// Produce the drawable for `item`.
#[must_use]
pub fn render(item: &PlacedItem) -> Drawable {
    if item.kind == AssetKind::Vector {
        if let Some(content) = item.content.as_deref() {
            match markup::sanitize_svg(content, item.width, item.height) {
                Ok(markup) => return Drawable::VectorEmbedded { markup },
                Err(e) => log::warn!("item {}: embedding failed, using image reference: {e}", item.id),
            }
        }
    }

    match generic_reference(item) {
        Ok(drawable) => drawable,
        Err(e) => {
            log::warn!("item {}: cannot render: {e}", item.id);
            Drawable::ErrorPlaceholder { width: item.width, height: item.height, reason: e.to_string() }
        }
    }
}

fn generic_reference(item: &PlacedItem) -> Result<Drawable, RenderError> {
    let href = item.url.trim();
    if href.is_empty() {
        return Err(RenderError::EmptyUrl);
    }
    if markup::is_script_url(href) {
        return Err(RenderError::ScriptUrl);
    }
    Ok(Drawable::GenericReference { href: href.to_owned(), width: item.width, height: item.height })
}
