#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn item(kind: AssetKind, content: Option<&str>) -> PlacedItem {
    PlacedItem {
        id: Uuid::new_v4(),
        url: "blob:abc".into(),
        kind,
        content: content.map(str::to_owned),
        x: -12.5,
        y: 40.0,
        width: 130.0,
        height: 30.0,
    }
}

#[test]
fn export_has_expected_fields_and_no_content() {
    let it = item(AssetKind::Vector, Some("<svg/>"));
    let json = export_layout(std::slice::from_ref(&it)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let entry = &value[0];
    assert_eq!(entry["id"], it.id.to_string());
    assert_eq!(entry["url"], "blob:abc");
    assert_eq!(entry["kind"], "vector");
    assert!(entry.get("type").is_none());
    assert_eq!(entry["x"], -12.5);
    assert_eq!(entry["width"], 130.0);
    assert!(entry.get("content").is_none());
    assert_eq!(entry.as_object().unwrap().len(), 7);
}

#[test]
fn export_keeps_list_order() {
    let items = vec![item(AssetKind::Raster, None), item(AssetKind::Vector, None)];
    let json = export_layout(&items).unwrap();
    let back = import_layout(&json).unwrap();
    assert_eq!(back.iter().map(|i| i.id).collect::<Vec<_>>(), items.iter().map(|i| i.id).collect::<Vec<_>>());
}

#[test]
fn empty_board_exports_empty_array() {
    assert_eq!(export_layout(&[]).unwrap(), "[]");
}

#[test]
fn import_drops_content_but_keeps_geometry() {
    let it = item(AssetKind::Vector, Some("<svg/>"));
    let back = import_layout(&export_layout(std::slice::from_ref(&it)).unwrap()).unwrap();
    assert_eq!(back, vec![PlacedItem { content: None, ..it }]);
}

#[test]
fn import_accepts_legacy_kind_names() {
    let id = Uuid::new_v4();
    let json = format!(
        "[{{\"id\":\"{id}\",\"url\":\"https://x/y.svg\",\"type\":\"svg\",\"x\":1,\"y\":2,\"width\":3,\"height\":4}}]"
    );
    let items = import_layout(&json).unwrap();
    assert_eq!(items[0].kind, AssetKind::Vector);
    assert_eq!((items[0].x, items[0].height), (1.0, 4.0));
}

#[test]
fn import_reads_current_kind_key() {
    let id = Uuid::new_v4();
    let json = format!(
        "[{{\"id\":\"{id}\",\"url\":\"blob:a\",\"kind\":\"raster\",\"x\":0,\"y\":0,\"width\":30,\"height\":30}}]"
    );
    assert_eq!(import_layout(&json).unwrap()[0].kind, AssetKind::Raster);
}

#[test]
fn import_rejects_non_layout_json() {
    assert!(matches!(import_layout("{\"id\":1}"), Err(ExportError::Json(_))));
    assert!(matches!(import_layout("not json"), Err(ExportError::Json(_))));
}

// =============================================================================
// Composition
// =============================================================================

fn library_asset(url: &str, content: Option<&str>) -> Asset {
    Asset { id: Uuid::new_v4(), url: url.into(), kind: AssetKind::Vector, content: content.map(str::to_owned) }
}

#[test]
fn reattach_fills_vector_content_by_url() {
    let mut items = vec![item(AssetKind::Vector, None), PlacedItem { url: "blob:other".into(), ..item(AssetKind::Vector, None) }];
    let assets = vec![library_asset("blob:abc", Some("<svg/>"))];
    reattach_content(&mut items, &assets);
    assert_eq!(items[0].content.as_deref(), Some("<svg/>"));
    assert!(items[1].content.is_none());
}

#[test]
fn reattach_leaves_raster_and_existing_content_alone() {
    let mut items = vec![item(AssetKind::Raster, None), item(AssetKind::Vector, Some("<svg id=\"mine\"/>"))];
    let assets = vec![library_asset("blob:abc", Some("<svg/>"))];
    reattach_content(&mut items, &assets);
    assert!(items[0].content.is_none());
    assert_eq!(items[1].content.as_deref(), Some("<svg id=\"mine\"/>"));
}

#[test]
fn composed_document_is_undecorated_svg() {
    let items = vec![item(AssetKind::Raster, None), item(AssetKind::Raster, None)];
    let doc = compose_document(&items);
    assert!(doc.starts_with("<svg"));
    assert!(doc.contains("viewBox=\"0 0 800 600\""));
    assert_eq!(doc.matches("class=\"pb-item\"").count(), 2);
    assert!(!doc.contains("pb-delete"));
    assert!(doc.contains("pb-node-0") && doc.contains("pb-node-1"));
}
