use std::path::PathBuf;
use std::time::Duration;

use crate::atlas::Fill;

/// Configuration for a game engine.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for deterministic target order. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Fill for regions not yet solved.
    pub default_fill: Fill,
    /// Fill for regions the player has found.
    pub solved_fill: Fill,
    /// How often the host UI should call `GameEngine::tick`.
    pub tick_interval: Duration,
    /// Where `JsonScoreFile` keeps the best time.
    pub high_score_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_fill: Fill::new("tan"),
            solved_fill: Fill::new("lightgreen"),
            tick_interval: Duration::from_millis(100),
            high_score_path: PathBuf::from("highscore.json"),
        }
    }
}

impl GameConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
