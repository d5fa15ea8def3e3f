#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::AssetKind;

fn item(x: f64, y: f64) -> PlacedItem {
    PlacedItem { id: Uuid::new_v4(), url: "u".into(), kind: AssetKind::Raster, content: None, x, y, width: 64.0, height: 48.0 }
}

fn logical() -> Size {
    Size::new(800.0, 600.0)
}

// =============================================================
// parse_payload
// =============================================================

#[test]
fn payload_with_id_parses() {
    let id = Uuid::new_v4();
    let raw = format!("{{\"id\":\"{id}\"}}");
    let payload = parse_payload(Some(&raw)).unwrap();
    assert_eq!(payload, DropPayload { id: id.to_string() });
    assert_eq!(payload.asset_id().unwrap(), id);
}

#[test]
fn payload_tolerates_unknown_fields() {
    let id = Uuid::new_v4();
    let raw = format!("{{\"id\":\"{id}\",\"kind\":\"vector\",\"extra\":[1,2]}}");
    assert_eq!(parse_payload(Some(&raw)).unwrap().asset_id().unwrap(), id);
}

#[test]
fn missing_payload_is_reported() {
    assert!(matches!(parse_payload(None), Err(DropError::MissingPayload)));
    assert!(matches!(parse_payload(Some("   ")), Err(DropError::MissingPayload)));
}

#[test]
fn malformed_payloads_are_reported() {
    for raw in ["not json", "{}", "{\"id\": 5}", "{\"id\": null}", "[\"id\"]"] {
        assert!(matches!(parse_payload(Some(raw)), Err(DropError::MalformedPayload(_))), "{raw}");
    }
}

#[test]
fn unresolvable_id_is_reported_by_name() {
    let payload = parse_payload(Some("{\"id\": \"abc\"}")).unwrap();
    assert_eq!(payload.id, "abc");
    let err = payload.asset_id().unwrap_err();
    assert!(matches!(&err, DropError::UnknownAsset(id) if id == "abc"));
    assert_eq!(err.to_string(), "dropped asset \"abc\" is not in the library");
}

#[test]
fn placement_rejects_unresolvable_id_before_mapping() {
    let rect = ScreenRect::new(0.0, 0.0, 0.0, 0.0);
    let err = placement_from_drop(Some("{\"id\":\"logo-1\"}"), Point::new(1.0, 1.0), rect, logical()).unwrap_err();
    assert!(matches!(err, DropError::UnknownAsset(id) if id == "logo-1"));
}

// =============================================================
// placement_from_drop
// =============================================================

#[test]
fn drop_is_centred_on_the_mapped_point() {
    let id = Uuid::new_v4();
    let raw = format!("{{\"id\":\"{id}\"}}");
    // Half-scale canvas at (20, 10): screen (120, 85) maps to (200, 150).
    let rect = ScreenRect::new(20.0, 10.0, 400.0, 300.0);
    let req = placement_from_drop(Some(&raw), Point::new(120.0, 85.0), rect, logical()).unwrap();
    assert_eq!(req, PlacementRequest { asset_id: id, x: 150.0, y: 100.0 });
}

#[test]
fn drop_near_origin_goes_negative() {
    let id = Uuid::new_v4();
    let raw = format!("{{\"id\":\"{id}\"}}");
    let rect = ScreenRect::new(0.0, 0.0, 800.0, 600.0);
    let req = placement_from_drop(Some(&raw), Point::new(10.0, 0.0), rect, logical()).unwrap();
    assert_eq!((req.x, req.y), (-40.0, -50.0));
}

#[test]
fn drop_on_unlaid_canvas_is_geometry_error() {
    let raw = format!("{{\"id\":\"{}\"}}", Uuid::new_v4());
    let rect = ScreenRect::new(0.0, 0.0, 0.0, 0.0);
    let err = placement_from_drop(Some(&raw), Point::new(1.0, 1.0), rect, logical()).unwrap_err();
    assert!(matches!(err, DropError::Geometry(_)));
}

#[test]
fn drop_error_messages_are_user_readable() {
    assert_eq!(DropError::MissingPayload.to_string(), "nothing was dropped");
    let err = parse_payload(Some("{}")).unwrap_err();
    assert!(err.to_string().starts_with("dropped data is not an asset reference"));
}

// =============================================================
// DragController
// =============================================================

#[test]
fn controller_starts_idle() {
    let mut c = DragController::new();
    assert!(!c.is_active());
    assert!(!c.update(Point::new(1.0, 1.0)));
    assert!(c.end().is_none());
    assert!(c.preview().is_none());
}

#[test]
fn preview_follows_pointer_delta() {
    let it = item(10.0, 20.0);
    let mut c = DragController::new();
    c.begin(&it, Point::new(30.0, 30.0));
    assert!(c.update(Point::new(45.0, 10.0)));
    let p = c.preview().unwrap();
    assert_eq!((p.x, p.y), (25.0, 0.0));
    assert_eq!((p.width, p.height), (64.0, 48.0));
    assert_eq!(c.active_item(), Some(it.id));
}

#[test]
fn end_commits_position_only() {
    let it = item(10.0, 20.0);
    let mut c = DragController::new();
    c.begin(&it, Point::new(0.0, 0.0));
    c.update(Point::new(-5.0, 7.0));
    let committed = c.end().unwrap();
    assert_eq!(committed, it.moved_to(5.0, 27.0));
    assert!(!c.is_active());
}

#[test]
fn end_without_movement_commits_nothing() {
    let it = item(10.0, 20.0);
    let mut c = DragController::new();
    c.begin(&it, Point::new(3.0, 3.0));
    assert!(c.end().is_none());
    assert!(!c.is_active());
}

#[test]
fn moving_back_to_start_commits_nothing() {
    let mut c = DragController::new();
    c.begin(&item(0.0, 0.0), Point::new(3.0, 3.0));
    c.update(Point::new(50.0, 50.0));
    c.update(Point::new(3.0, 3.0));
    assert!(c.end().is_none());
}

#[test]
fn cancel_discards() {
    let mut c = DragController::new();
    c.begin(&item(0.0, 0.0), Point::new(0.0, 0.0));
    c.update(Point::new(10.0, 10.0));
    c.cancel();
    assert!(!c.is_active());
    assert!(c.end().is_none());
}
