//! Shared numeric constants for the canvas crate.

// ── Logical space ───────────────────────────────────────────────

/// Width of the fixed logical viewBox.
pub const LOGICAL_WIDTH: f64 = 800.0;

/// Height of the fixed logical viewBox.
pub const LOGICAL_HEIGHT: f64 = 600.0;

// ── Placement ───────────────────────────────────────────────────

/// Width and height given to a freshly placed item.
pub const DEFAULT_ITEM_SIZE: f64 = 100.0;

/// Top-left corner used when an asset is activated rather than dropped.
pub const DEFAULT_PLACE_X: f64 = 50.0;
pub const DEFAULT_PLACE_Y: f64 = 50.0;

/// Smallest width or height a resize gesture may produce.
pub const MIN_ITEM_SIZE: f64 = 30.0;

// ── Decorations ─────────────────────────────────────────────────

/// Radius of the corner resize handles, in logical units.
pub const HANDLE_RADIUS: f64 = 6.0;

/// Radius of the delete affordance circle.
pub const DELETE_RADIUS: f64 = 10.0;

/// The delete affordance is centred at `(width - DELETE_OFFSET, -DELETE_OFFSET)`.
pub const DELETE_OFFSET: f64 = 8.0;

// ── Drag and drop ───────────────────────────────────────────────

/// Media type under which the asset list serializes its drop payload.
pub const DROP_MEDIA_TYPE: &str = "application/json";

/// Drop effect advertised while an asset is dragged over the surface.
pub const DROP_EFFECT: &str = "copy";
