//! Points and surface sizing.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A position in CSS pixels, relative to the canvas origin for stroke input
/// and to the viewport origin for overlay positioning.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset of `self` from `origin`.
    pub fn offset_from(self, origin: Point) -> Point {
        Point {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Rejects degenerate event coordinates; a single NaN poisons every path
/// operation after it.
pub fn finite(point: Point) -> Option<Point> {
    if point.x.is_finite() && point.y.is_finite() {
        Some(point)
    } else {
        None
    }
}

/// Logical surface size for a viewport: full width, and the height left below
/// the canvas top edge. Never negative.
pub fn surface_size(viewport_width: f64, viewport_height: f64, top_offset: f64) -> (f64, f64) {
    let width = viewport_width.max(0.0);
    let height = (viewport_height - top_offset).max(0.0);
    (width, height)
}
