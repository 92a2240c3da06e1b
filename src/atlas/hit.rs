use super::index::SpatialIndex;
use super::region::Region;
use super::store::RegionStore;
use crate::geometry::Point;

/// Resolves a map coordinate to the region under it.
///
/// Bounding-box candidates come from the index in store order (lowercase
/// name order), and the first one whose geometry covers the point wins. A
/// click exactly on a border shared by two regions therefore always resolves
/// to the alphabetically first of them.
#[derive(Debug, Clone, Copy)]
pub struct HitTester<'a> {
    store: &'a RegionStore,
    index: &'a SpatialIndex,
}

impl<'a> HitTester<'a> {
    pub fn new(store: &'a RegionStore, index: &'a SpatialIndex) -> Self {
        debug_assert_eq!(store.len(), index.len(), "index built from another store");
        Self { store, index }
    }

    pub fn resolve(&self, p: Point) -> Option<&'a Region> {
        let candidates = self.index.candidates(p);
        if candidates.is_empty() {
            return None;
        }
        let hit = candidates
            .into_iter()
            .filter_map(|idx| self.store.get(idx))
            .find(|region| region.covers(p));
        tracing::trace!(x = p.x, y = p.y, hit = hit.map(Region::name), "resolved click");
        hit
    }

    pub fn resolve_name(&self, p: Point) -> Option<&'a str> {
        self.resolve(p).map(Region::name)
    }
}
