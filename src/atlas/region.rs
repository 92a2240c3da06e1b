use serde::{Deserialize, Serialize};

use crate::error::AtlasError;
use crate::geometry::{BoundingBox, MultiPolygon, Point};

/// One entry of the region collection supplied by the map loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub name: String,
    pub polygons: MultiPolygon,
}

impl RegionSpec {
    pub fn new(name: impl Into<String>, polygons: impl Into<MultiPolygon>) -> Self {
        Self {
            name: name.into(),
            polygons: polygons.into(),
        }
    }
}

/// Case-insensitive lookup key for a region name.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A validated, immutable region. Fill color lives in the store, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: String,
    key: String,
    geometry: MultiPolygon,
    bbox: BoundingBox,
}

impl Region {
    /// Validate a loader record into a region.
    ///
    /// Every ring needs at least three finite vertices so the region is
    /// always clickable.
    pub fn from_spec(spec: RegionSpec) -> Result<Self, AtlasError> {
        let name = spec.name.trim().to_string();
        if name.is_empty() {
            return Err(AtlasError::EmptyName);
        }
        if spec.polygons.is_empty() {
            return Err(AtlasError::EmptyGeometry { name });
        }
        for ring in spec.polygons.polygons().iter().flat_map(|p| p.rings()) {
            if ring.len() < 3 {
                return Err(AtlasError::DegenerateRing {
                    name,
                    len: ring.len(),
                });
            }
            if !ring.points().iter().all(|p| p.is_finite()) {
                return Err(AtlasError::NonFiniteCoordinate { name });
            }
        }
        let bbox = spec
            .polygons
            .bounding_box()
            .ok_or_else(|| AtlasError::EmptyGeometry { name: name.clone() })?;

        Ok(Self {
            key: name_key(&name),
            name,
            geometry: spec.polygons,
            bbox,
        })
    }

    /// Canonical display name, as first seen in the input.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn geometry(&self) -> &MultiPolygon {
        &self.geometry
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// Boundary-inclusive containment, clamped to the bounding box so that a
    /// point outside the box is never inside the region.
    pub fn covers(&self, p: Point) -> bool {
        self.bbox.contains(p) && self.geometry.covers(p)
    }

    pub fn matches(&self, name: &str) -> bool {
        self.key == name_key(name)
    }

    /// Fold another part of the same region into this one.
    pub(crate) fn absorb(&mut self, other: Region) {
        self.bbox = self.bbox.union(&other.bbox);
        self.geometry.extend(other.geometry);
    }
}
