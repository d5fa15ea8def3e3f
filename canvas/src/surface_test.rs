use uuid::Uuid;

use super::*;
use crate::doc::AssetKind;
use crate::registry::HandleRegistry;

fn item(x: f64, y: f64) -> PlacedItem {
    PlacedItem {
        id: Uuid::new_v4(),
        url: "https://example.com/a.png".into(),
        kind: AssetKind::Raster,
        content: None,
        x,
        y,
        width: 100.0,
        height: 100.0,
    }
}

fn entry<'a>(reg: &mut HandleRegistry, item: &'a PlacedItem, decorated: bool) -> SceneItem<'a> {
    SceneItem { item, handle: reg.handle_for(item.id), decorated }
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack.find(needle).unwrap_or_else(|| panic!("missing {needle} in {haystack}"))
}

// =============================================================
// Item groups
// =============================================================

#[test]
fn group_is_keyed_and_translated() {
    let mut reg = HandleRegistry::new();
    let it = item(50.0, 70.0);
    let out = item_markup(&entry(&mut reg, &it, false));
    assert!(out.starts_with("<g id=\"pb-node-0\" class=\"pb-item\""));
    assert!(out.contains(&format!("data-item-id=\"{}\"", it.id)));
    assert!(out.contains("transform=\"translate(50 70)\""));
    assert!(out.ends_with("</g>"));
}

#[test]
fn undecorated_item_has_content_and_drag_handle_only() {
    let mut reg = HandleRegistry::new();
    let it = item(0.0, 0.0);
    let out = item_markup(&entry(&mut reg, &it, false));
    assert!(out.contains("pb-content"));
    assert!(out.contains("pb-drag-handle"));
    assert!(!out.contains("pb-handle\""));
    assert!(!out.contains("pb-border"));
    assert!(!out.contains("pb-delete"));
}

#[test]
fn decorated_item_has_four_handles_border_and_delete() {
    let mut reg = HandleRegistry::new();
    let it = item(0.0, 0.0);
    let out = item_markup(&entry(&mut reg, &it, true));
    assert_eq!(out.matches("class=\"pb-handle\"").count(), 4);
    for corner in ["nw", "ne", "sw", "se"] {
        assert!(out.contains(&format!("data-corner=\"{corner}\"")), "{corner}");
    }
    assert!(out.contains("cx=\"100\" cy=\"100\" r=\"6\""));
    assert!(out.contains("x=\"-1\" y=\"-1\" width=\"102\" height=\"102\""));
    assert!(out.contains("translate(92 -8)"));
    assert!(out.contains("r=\"10\""));
}

#[test]
fn layers_run_content_handles_border_delete_drag() {
    let mut reg = HandleRegistry::new();
    let it = item(0.0, 0.0);
    let out = item_markup(&entry(&mut reg, &it, true));
    let content = position(&out, "pb-content");
    let handle = position(&out, "pb-handle\"");
    let border = position(&out, "pb-border");
    let delete = position(&out, "pb-delete");
    let drag = position(&out, "pb-drag-handle");
    assert!(content < handle && handle < border && border < delete && delete < drag);
}

#[test]
fn handle_cursors_follow_diagonals() {
    let mut reg = HandleRegistry::new();
    let it = item(0.0, 0.0);
    let out = item_markup(&entry(&mut reg, &it, true));
    assert_eq!(out.matches("cursor:nwse-resize").count(), 2);
    assert_eq!(out.matches("cursor:nesw-resize").count(), 2);
}

// =============================================================
// Scene and document
// =============================================================

#[test]
fn scene_keeps_list_order() {
    let mut reg = HandleRegistry::new();
    let a = item(0.0, 0.0);
    let b = item(10.0, 10.0);
    let entries = [entry(&mut reg, &a, false), entry(&mut reg, &b, false)];
    let out = scene_markup(&entries);
    assert!(position(&out, &a.id.to_string()) < position(&out, &b.id.to_string()));
}

#[test]
fn empty_scene_is_empty() {
    assert!(scene_markup(&[]).is_empty());
}

#[test]
fn document_has_fixed_logical_viewbox() {
    let out = document_markup(&[]);
    assert!(out.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(out.contains("viewBox=\"0 0 800 600\""));
    assert!(out.contains("preserveAspectRatio=\"xMidYMid meet\""));
    assert!(out.ends_with("</svg>"));
    assert!(roxmltree::Document::parse(&out).is_ok());
}

#[test]
fn document_with_items_is_well_formed() {
    let mut reg = HandleRegistry::new();
    let a = item(5.0, 5.0);
    let out = document_markup(&[entry(&mut reg, &a, true)]);
    let doc = roxmltree::Document::parse(&out).unwrap();
    let groups = doc.descendants().filter(|n| n.attribute("class") == Some("pb-item")).count();
    assert_eq!(groups, 1);
}
