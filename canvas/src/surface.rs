//! Surface markup: the scene of placed items plus their interaction decorations.
//!
//! Each item is one group translated to its position. Inside the group the
//! layers run bottom to top: content, corner handles, selection border, delete
//! button, then a transparent full-bounds drag handle. Decorations are only
//! emitted for items that are hovered or under an active gesture.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::consts::{DELETE_OFFSET, DELETE_RADIUS, HANDLE_RADIUS, LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::doc::PlacedItem;
use crate::hit::Corner;
use crate::markup::{SVG_NS, escape_attr};
use crate::registry::NodeHandle;
use crate::render;

const ACCENT: &str = "#3b82f6";
const DANGER: &str = "#ef4444";

/// One item as the surface should draw it.
#[derive(Debug, Clone, Copy)]
pub struct SceneItem<'a> {
    pub item: &'a PlacedItem,
    pub handle: NodeHandle,
    /// Show handles, border and delete button.
    pub decorated: bool,
}

/// Markup for a single item group.
#[must_use]
pub fn item_markup(entry: &SceneItem<'_>) -> String {
    let item = entry.item;
    let (w, h) = (item.width, item.height);
    let mut out = format!(
        "<g id=\"{}\" class=\"pb-item\" data-item-id=\"{}\" transform=\"translate({} {})\">",
        entry.handle, item.id, item.x, item.y
    );
    out.push_str(&render::render(item).to_markup());

    if entry.decorated {
        for corner in Corner::ALL {
            let c = corner.position(0.0, 0.0, w, h);
            out.push_str(&format!(
                "<circle class=\"pb-handle\" data-corner=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{HANDLE_RADIUS}\" \
                 fill=\"{ACCENT}\" stroke=\"#fff\" stroke-width=\"1\" style=\"cursor:{}\"/>",
                corner.as_str(),
                c.x,
                c.y,
                corner.cursor()
            ));
        }
        out.push_str(&format!(
            "<rect class=\"pb-border\" x=\"-1\" y=\"-1\" width=\"{}\" height=\"{}\" fill=\"none\" \
             stroke=\"{ACCENT}\" stroke-width=\"1\" stroke-dasharray=\"4 2\" pointer-events=\"none\"/>",
            w + 2.0,
            h + 2.0
        ));
        out.push_str(&format!(
            "<g class=\"pb-delete\" transform=\"translate({} {})\" style=\"cursor:pointer\">\
             <circle r=\"{DELETE_RADIUS}\" fill=\"{DANGER}\"/>\
             <path d=\"M-4 -4L4 4M4 -4L-4 4\" stroke=\"#fff\" stroke-width=\"2\"/></g>",
            w - DELETE_OFFSET,
            -DELETE_OFFSET
        ));
    }

    out.push_str(&format!(
        "<rect class=\"pb-drag-handle\" width=\"{w}\" height=\"{h}\" fill=\"transparent\" style=\"cursor:move\"/>"
    ));
    out.push_str("</g>");
    out
}

/// Markup for every item, in list order (later items on top).
#[must_use]
pub fn scene_markup(entries: &[SceneItem<'_>]) -> String {
    entries.iter().map(item_markup).collect()
}

/// Attributes for the root `<svg>` element of the surface.
#[must_use]
pub fn root_attributes() -> [(&'static str, String); 3] {
    [
        ("xmlns", SVG_NS.to_string()),
        ("viewBox", format!("0 0 {LOGICAL_WIDTH} {LOGICAL_HEIGHT}")),
        ("preserveAspectRatio", "xMidYMid meet".to_string()),
    ]
}

/// A standalone SVG document of the whole surface.
#[must_use]
pub fn document_markup(entries: &[SceneItem<'_>]) -> String {
    let attrs: String = root_attributes()
        .iter()
        .map(|(k, v)| format!(" {k}=\"{}\"", escape_attr(v)))
        .collect();
    format!(
        "<svg{attrs}><rect class=\"pb-background\" width=\"{LOGICAL_WIDTH}\" height=\"{LOGICAL_HEIGHT}\" \
         fill=\"#fff\"/>{}</svg>",
        scene_markup(entries)
    )
}
