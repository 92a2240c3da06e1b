use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::region::RegionSpec;
use crate::error::AtlasError;

/// Parse a region collection from JSON text.
///
/// The document is an array of `{"name": ..., "polygons": [...]}` records in
/// map coordinates. Validation happens when the records reach a
/// `RegionStore`.
pub fn parse_regions(json: &str) -> Result<Vec<RegionSpec>, AtlasError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a region collection file. See [`parse_regions`] for the format.
pub fn load_regions(path: &Path) -> Result<Vec<RegionSpec>, AtlasError> {
    let reader = BufReader::new(File::open(path)?);
    let specs: Vec<RegionSpec> = serde_json::from_reader(reader)?;
    tracing::debug!(path = %path.display(), count = specs.len(), "loaded region collection");
    Ok(specs)
}
