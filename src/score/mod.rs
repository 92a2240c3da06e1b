//! Best-time persistence behind the `ScoreStore` trait.

pub mod json_file;
pub mod memory;

pub use json_file::{HighScoreRecord, JsonScoreFile};
pub use memory::MemoryScoreStore;

use crate::error::ScoreError;

/// Persistence for the single best completion time, in seconds.
pub trait ScoreStore {
    /// The stored best time. Missing or unreadable records read as `None`.
    fn load(&self) -> Option<f64>;

    /// Overwrite the stored record. Callers decide whether `seconds` is a
    /// new best.
    fn save(&mut self, seconds: f64) -> Result<(), ScoreError>;
}

/// Whether a finishing time should replace the stored best.
pub fn is_new_best(elapsed: f64, best: Option<f64>) -> bool {
    best.is_none_or(|best| elapsed < best)
}

/// Stored values that cannot be a real completion time are treated as absent.
pub(crate) fn sanitize(seconds: f64) -> Option<f64> {
    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}
