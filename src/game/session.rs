use std::collections::BTreeSet;
use std::time::Duration;

use rand::RngCore;
use rand::seq::IteratorRandom;

use crate::atlas::region::name_key;

/// Lifecycle of a play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Before the first start.
    #[default]
    Idle,
    /// A target is announced and the timer is live.
    Running,
    /// Every region solved; timer stopped.
    Finished,
}

/// Result of solving the current target.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Another target was drawn.
    Next { solved: String },
    /// That was the last region.
    Finished { solved: String, elapsed: Duration },
}

/// State of one run: what is left to find, what is being asked for, and when
/// the run started.
///
/// `target` is `Some` exactly when the phase is `Running`, and it is always a
/// member of `remaining`.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    phase: Phase,
    remaining: BTreeSet<String>,
    target: Option<String>,
    started_at: Option<Duration>,
    final_elapsed: Option<Duration>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run over `names`. An empty set finishes immediately.
    pub fn begin(&mut self, names: BTreeSet<String>, now: Duration, rng: &mut dyn RngCore) {
        *self = Self {
            phase: Phase::Running,
            remaining: names,
            target: None,
            started_at: Some(now),
            final_elapsed: None,
        };
        if self.remaining.is_empty() {
            self.finish(now);
        } else {
            self.draw_target(rng);
        }
        debug_assert!(self.invariants_hold());
    }

    /// Drop the solved target from the pool and either draw the next one or
    /// finish the run. Returns `None` unless running.
    pub fn solve_target(&mut self, now: Duration, rng: &mut dyn RngCore) -> Option<Advance> {
        if self.phase != Phase::Running {
            return None;
        }
        let solved = self.target.take()?;
        self.remaining.remove(&solved);

        let advance = if self.remaining.is_empty() {
            let elapsed = self.finish(now);
            Advance::Finished { solved, elapsed }
        } else {
            self.draw_target(rng);
            Advance::Next { solved }
        };
        debug_assert!(self.invariants_hold());
        Some(advance)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn remaining(&self) -> &BTreeSet<String> {
        &self.remaining
    }

    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    /// Case-insensitive comparison against the current target.
    pub fn is_target(&self, name: &str) -> bool {
        self.target
            .as_deref()
            .is_some_and(|target| name_key(target) == name_key(name))
    }

    /// Live time while running, final time once finished, `None` when idle.
    pub fn elapsed(&self, now: Duration) -> Option<Duration> {
        match self.phase {
            Phase::Idle => None,
            Phase::Running => self.started_at.map(|start| now.saturating_sub(start)),
            Phase::Finished => self.final_elapsed,
        }
    }

    pub fn invariants_hold(&self) -> bool {
        match (&self.target, self.phase) {
            (Some(target), Phase::Running) => self.remaining.contains(target),
            (None, Phase::Running) => false,
            (Some(_), _) => false,
            (None, _) => true,
        }
    }

    fn draw_target(&mut self, rng: &mut dyn RngCore) {
        self.target = self.remaining.iter().choose(rng).cloned();
    }

    fn finish(&mut self, now: Duration) -> Duration {
        let elapsed = self
            .started_at
            .map_or(Duration::ZERO, |start| now.saturating_sub(start));
        self.phase = Phase::Finished;
        self.target = None;
        self.final_elapsed = Some(elapsed);
        elapsed
    }
}
