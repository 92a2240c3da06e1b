//! Plain 2D geometry in map units: points, bounding boxes and polygons.

pub mod bbox;
pub mod polygon;

pub use bbox::BoundingBox;
pub use polygon::{MultiPolygon, Polygon, Ring};

use serde::{Deserialize, Serialize};

/// A location in the map's planar coordinate system.
///
/// Serialized as a two-element array `[x, y]`, matching how region files
/// list their vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
