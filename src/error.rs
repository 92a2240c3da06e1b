use std::io;

use thiserror::Error;

/// Problems with the region collection handed to the atlas.
#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("region name is empty")]
    EmptyName,
    #[error("region {name:?} has no polygons")]
    EmptyGeometry { name: String },
    #[error("region {name:?} has a ring with {len} vertices, need at least 3")]
    DegenerateRing { name: String, len: usize },
    #[error("region {name:?} has a non-finite coordinate")]
    NonFiniteCoordinate { name: String },
    #[error("failed to read region file")]
    Io(#[from] io::Error),
    #[error("failed to parse region data")]
    Parse(#[from] serde_json::Error),
}

/// A high score could not be written. Reads never fail; see `ScoreStore::load`.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("failed to write high score file")]
    Io(#[from] io::Error),
    #[error("failed to encode high score record")]
    Encode(#[from] serde_json::Error),
}
