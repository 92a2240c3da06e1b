pub mod atlas;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod score;

pub use atlas::{Atlas, Fill, HitTester, MapSnapshot, RegionSpec, RegionStore, SpatialIndex};
pub use config::GameConfig;
pub use error::{AtlasError, ScoreError};
pub use game::{ClickOutcome, GameEngine, GameView, Phase};
pub use geometry::Point;
pub use score::{JsonScoreFile, MemoryScoreStore, ScoreStore};
