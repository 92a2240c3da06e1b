use std::cell::Cell;
use std::io;
use std::rc::Rc;

use super::{ScoreStore, sanitize};
use crate::error::ScoreError;

/// Score store that lives only as long as the process. Can be told to fail
/// writes, which is how the engine's save-failure path gets exercised.
///
/// Clones share state, so a test can hand one clone to an engine and keep
/// the other to inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: Rc<Cell<Option<f64>>>,
    fail_writes: bool,
    saves: Rc<Cell<usize>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(seconds: f64) -> Self {
        let store = Self::default();
        store.best.set(sanitize(seconds));
        store
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Option<f64> {
        self.best.get()
    }

    fn save(&mut self, seconds: f64) -> Result<(), ScoreError> {
        if self.fail_writes {
            return Err(ScoreError::Io(io::Error::other("score store is read-only")));
        }
        self.best.set(Some(seconds));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
