//! Coordinate spaces: screen pixels versus the canvas's logical viewBox units.
//!
//! Pointer and drop events arrive in screen (CSS pixel) space. Everything the
//! engine stores lives in the fixed logical space declared by the surface's
//! viewBox. The mapper here is the only bridge between the two.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point in either screen or logical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An on-screen rectangle: origin plus extent, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Whether the rectangle has a usable, non-degenerate extent.
    #[must_use]
    pub fn is_laid_out(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Error returned by [`map_screen_to_canvas`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The canvas element has no on-screen extent yet (zero or non-finite size).
    #[error("canvas has no on-screen size ({width}x{height})")]
    Unavailable { width: f64, height: f64 },
}

/// Convert a screen-space point into canvas-local logical coordinates.
///
/// Each axis scales independently: `logical / screen`. The result is
/// `(point - rect.origin) * scale`.
///
/// # Errors
///
/// Returns [`GeometryError::Unavailable`] when `rect` has no usable extent, so
/// that callers never receive `NaN` or infinite coordinates.
pub fn map_screen_to_canvas(point: Point, rect: ScreenRect, logical: Size) -> Result<Point, GeometryError> {
    if !rect.is_laid_out() {
        return Err(GeometryError::Unavailable { width: rect.width, height: rect.height });
    }
    let scale_x = logical.width / rect.width;
    let scale_y = logical.height / rect.height;
    Ok(Point { x: (point.x - rect.left) * scale_x, y: (point.y - rect.top) * scale_y })
}

/// The largest rectangle with `logical`'s aspect ratio that fits inside
/// `container`, centred on both axes (letterboxing).
///
/// Returns the container unchanged when either input is degenerate.
#[must_use]
pub fn fit_within(container: ScreenRect, logical: Size) -> ScreenRect {
    if !container.is_laid_out() || logical.width <= 0.0 || logical.height <= 0.0 {
        return container;
    }
    let scale = (container.width / logical.width).min(container.height / logical.height);
    let width = logical.width * scale;
    let height = logical.height * scale;
    ScreenRect {
        left: container.left + (container.width - width) * 0.5,
        top: container.top + (container.height - height) * 0.5,
        width,
        height,
    }
}
