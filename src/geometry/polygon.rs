use serde::{Deserialize, Serialize};

use super::{BoundingBox, Point};

/// A closed ring of vertices. The closing edge back to the first vertex is
/// implicit; a repeated first vertex at the end is harmless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(pub Vec<Point>);

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate edges as `(start, end)` pairs including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.0.len();
        (0..n).map(move |i| (self.0[i], self.0[(i + 1) % n]))
    }

    /// True if `p` lies on any edge of the ring.
    pub fn on_boundary(&self, p: Point) -> bool {
        self.edges().any(|(a, b)| on_segment(p, a, b))
    }

    /// Even-odd crossing test. Result is unspecified for points exactly on an
    /// edge; callers check `on_boundary` first.
    pub fn encloses(&self, p: Point) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// One connected part of a region: an outer ring minus any holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Ring,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    /// Axis-aligned rectangle polygon, handy for tests and simple maps.
    pub fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Ring::new(vec![
            Point::new(min_x, min_y),
            Point::new(max_x, min_y),
            Point::new(max_x, max_y),
            Point::new(min_x, max_y),
        ]))
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }

    /// Boundary-inclusive containment: interior points and points on the
    /// exterior or on a hole's edge are covered; points strictly inside a
    /// hole are not.
    pub fn covers(&self, p: Point) -> bool {
        if self.rings().any(|ring| ring.on_boundary(p)) {
            return true;
        }
        self.exterior.encloses(p) && !self.holes.iter().any(|hole| hole.encloses(p))
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(self.exterior.points().iter().copied())
    }
}

/// A region's full geometry. States with islands or clipped parts have
/// several polygons.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self(polygons)
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend(&mut self, other: MultiPolygon) {
        self.0.extend(other.0);
    }

    pub fn covers(&self, p: Point) -> bool {
        self.0.iter().any(|poly| poly.covers(p))
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.0
            .iter()
            .filter_map(Polygon::bounding_box)
            .reduce(|acc, b| acc.union(&b))
    }
}

impl From<Polygon> for MultiPolygon {
    fn from(poly: Polygon) -> Self {
        Self(vec![poly])
    }
}

/// Exact collinearity plus range check. No tolerance: a point a hair off an
/// edge is classified by the crossing test like any other point.
fn on_segment(p: Point, a: Point, b: Point) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    cross == 0.0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}
