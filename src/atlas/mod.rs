//! The map: named regions, their fills, and click resolution.
//!
//! `RegionStore` owns the regions sorted by lowercase name, `SpatialIndex`
//! narrows a click to the regions whose bounding box contains it, and
//! `HitTester` picks the first of those whose geometry covers the point.

pub mod hit;
pub mod index;
pub mod load;
pub mod region;
pub mod store;

pub use hit::HitTester;
pub use index::SpatialIndex;
pub use load::{load_regions, parse_regions};
pub use region::{Region, RegionSpec};
pub use store::{Fill, MapSnapshot, RegionFill, RegionStore};

use crate::error::AtlasError;
use crate::geometry::Point;

/// The loaded map: regions with their fills, plus a spatial index over them.
#[derive(Debug, Clone)]
pub struct Atlas {
    store: RegionStore,
    index: SpatialIndex,
}

impl Atlas {
    pub fn new(
        specs: impl IntoIterator<Item = RegionSpec>,
        default_fill: Fill,
    ) -> Result<Self, AtlasError> {
        Ok(Self::from_store(RegionStore::new(specs, default_fill)?))
    }

    pub fn from_store(store: RegionStore) -> Self {
        let index = SpatialIndex::build(store.regions());
        tracing::debug!(regions = store.len(), "built spatial index");
        Self { store, index }
    }

    pub fn store(&self) -> &RegionStore {
        &self.store
    }

    /// Mutable access for recoloring. Region geometry is not reachable
    /// mutably through the store.
    pub fn store_mut(&mut self) -> &mut RegionStore {
        &mut self.store
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn hit_tester(&self) -> HitTester<'_> {
        HitTester::new(&self.store, &self.index)
    }

    pub fn resolve(&self, p: Point) -> Option<&str> {
        self.hit_tester().resolve_name(p)
    }
}
