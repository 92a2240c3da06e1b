use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::region::{Region, RegionSpec, name_key};
use crate::error::AtlasError;
use crate::geometry::{BoundingBox, MultiPolygon};

/// A display color handed to the renderer, e.g. `"tan"` or `"#4E59FC"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fill(String);

impl Fill {
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of regions for a session plus their current fill colors.
///
/// Regions are ordered by lowercase name. Geometry never changes after
/// construction; only the fill side table mutates.
#[derive(Debug, Clone)]
pub struct RegionStore {
    regions: Vec<Region>,
    positions: HashMap<String, usize>,
    fills: Vec<Fill>,
    default_fill: Fill,
}

impl RegionStore {
    /// Validate and collect the loader's region records.
    ///
    /// Records whose names match case-insensitively are merged into one
    /// multi-part region; the first record's spelling becomes canonical.
    pub fn new(
        specs: impl IntoIterator<Item = RegionSpec>,
        default_fill: Fill,
    ) -> Result<Self, AtlasError> {
        let mut by_key: BTreeMap<String, Region> = BTreeMap::new();
        for spec in specs {
            let region = Region::from_spec(spec)?;
            match by_key.get_mut(region.key()) {
                Some(existing) => existing.absorb(region),
                None => {
                    by_key.insert(region.key().to_string(), region);
                }
            }
        }

        let regions: Vec<Region> = by_key.into_values().collect();
        let positions = regions
            .iter()
            .enumerate()
            .map(|(i, r)| (r.key().to_string(), i))
            .collect();
        let fills = vec![default_fill.clone(); regions.len()];

        Ok(Self {
            regions,
            positions,
            fills,
            default_fill,
        })
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&self, position: usize) -> Option<&Region> {
        self.regions.get(position)
    }

    /// Store position of the region named `name`, ignoring case.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(&name_key(name)).copied()
    }

    pub fn find(&self, name: &str) -> Option<&Region> {
        self.position(name).map(|i| &self.regions[i])
    }

    /// Canonical names of every region.
    pub fn all_names(&self) -> BTreeSet<String> {
        self.regions.iter().map(|r| r.name().to_string()).collect()
    }

    /// Recolor a region by case-insensitive name. Unknown names are ignored.
    /// Returns whether a region was recolored.
    pub fn set_fill(&mut self, name: &str, fill: Fill) -> bool {
        match self.position(name) {
            Some(i) => {
                self.fills[i] = fill;
                true
            }
            None => {
                tracing::warn!(region = name, "recolor skipped, no such region");
                false
            }
        }
    }

    pub fn fill_of(&self, name: &str) -> Option<&Fill> {
        self.position(name).map(|i| &self.fills[i])
    }

    pub fn default_fill(&self) -> &Fill {
        &self.default_fill
    }

    /// Repaint every region with the default fill.
    pub fn reset_fills(&mut self) {
        for fill in &mut self.fills {
            *fill = self.default_fill.clone();
        }
    }

    /// Snapshot of geometry and current fills for the renderer.
    pub fn render(&self) -> MapSnapshot<'_> {
        let entries = self
            .regions
            .iter()
            .zip(&self.fills)
            .map(|(region, fill)| RegionFill {
                name: region.name(),
                geometry: region.geometry(),
                fill,
            })
            .collect();
        let bounds = self
            .regions
            .iter()
            .map(Region::bounding_box)
            .reduce(|acc, b| acc.union(&b));
        MapSnapshot { entries, bounds }
    }
}

/// One region as the renderer sees it.
#[derive(Debug, Clone, Copy)]
pub struct RegionFill<'a> {
    pub name: &'a str,
    pub geometry: &'a MultiPolygon,
    pub fill: &'a Fill,
}

/// Everything needed to paint one frame of the map.
#[derive(Debug, Clone)]
pub struct MapSnapshot<'a> {
    entries: Vec<RegionFill<'a>>,
    bounds: Option<BoundingBox>,
}

impl<'a> MapSnapshot<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &RegionFill<'a>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extent of the whole map, for fitting the view.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn fill_of(&self, name: &str) -> Option<&'a Fill> {
        let key = name_key(name);
        self.entries
            .iter()
            .find(|e| name_key(e.name) == key)
            .map(|e| e.fill)
    }
}
