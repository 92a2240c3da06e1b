use std::collections::BTreeSet;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use super::clock::{Clock, SystemClock};
use super::session::{Advance, GameSession, Phase};
use super::status;
use super::view::GameView;
use crate::atlas::Atlas;
use crate::config::GameConfig;
use crate::geometry::Point;
use crate::score::{ScoreStore, is_new_best};

/// What a click did to the game.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// No run in progress; nothing changed.
    Ignored,
    /// The click hit no region.
    Missed,
    /// The click hit a region other than the target.
    WrongRegion { clicked: String },
    /// The target was found and a new one announced.
    Correct { solved: String, remaining: usize },
    /// The last region was found.
    Completed {
        solved: String,
        elapsed: Duration,
        new_best: bool,
    },
}

/// The quiz: owns the map, the current session, the timer and the best time.
///
/// All handlers run synchronously on the host's event loop and report
/// through the `GameView` passed to them. Nothing here returns an error; a
/// failed high-score write shows up in the status text.
pub struct GameEngine {
    atlas: Atlas,
    session: GameSession,
    config: GameConfig,
    scores: Box<dyn ScoreStore>,
    best_time: Option<f64>,
    clock: Box<dyn Clock>,
    rng: Box<dyn RngCore>,
    status_text: String,
    timer_text: String,
}

impl GameEngine {
    /// Build an idle engine. Loads the stored best time once.
    pub fn new(atlas: Atlas, scores: Box<dyn ScoreStore>, config: GameConfig) -> Self {
        let rng: Box<dyn RngCore> = match config.seed {
            Some(seed) => Box::new(SmallRng::seed_from_u64(seed)),
            None => Box::new(SmallRng::from_os_rng()),
        };
        let best_time = scores.load();
        tracing::info!(regions = atlas.store().len(), best_time, "game engine ready");
        Self {
            atlas,
            session: GameSession::new(),
            config,
            scores,
            best_time,
            clock: Box::new(SystemClock::new()),
            rng,
            status_text: String::new(),
            timer_text: status::timer(Duration::ZERO),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Paint everything once so the host can draw before the first start.
    pub fn present(&self, view: &mut dyn GameView) {
        view.render_map(&self.atlas.store().render());
        view.set_best_time_text(&status::best_time(self.best_time));
        view.set_timer_text(&self.timer_text);
        view.set_status_text(&self.status_text);
        view.set_action_label(self.action_label());
    }

    /// Begin a run. Only valid while idle; returns whether a run started.
    pub fn start(&mut self, view: &mut dyn GameView) -> bool {
        if self.session.phase() != Phase::Idle {
            tracing::debug!(phase = ?self.session.phase(), "start ignored");
            return false;
        }

        let now = self.clock.now();
        self.session
            .begin(self.atlas.store().all_names(), now, self.rng.as_mut());
        view.set_action_label(self.action_label());

        match self.session.target().map(str::to_string) {
            Some(target) => {
                tracing::info!(first = %target, remaining = self.session.remaining().len(), "run started");
                self.set_timer(view, status::timer(Duration::ZERO));
                self.set_status(view, status::announce(&target, self.session.remaining().len()));
            }
            None => {
                // Nothing to find; no time worth recording either.
                tracing::info!("run started with an empty map, finished immediately");
                self.set_timer(view, status::timer(Duration::ZERO));
                self.set_status(view, status::completed());
            }
        }
        true
    }

    /// Throw away the current run, repaint the map and start again.
    pub fn restart(&mut self, view: &mut dyn GameView) {
        tracing::info!(phase = ?self.session.phase(), "restarting");
        self.reset(view);
        self.start(view);
    }

    /// The single start/restart button: starts when idle, restarts otherwise.
    pub fn primary_action(&mut self, view: &mut dyn GameView) {
        match self.session.phase() {
            Phase::Idle => {
                self.start(view);
            }
            Phase::Running | Phase::Finished => self.restart(view),
        }
    }

    pub fn action_label(&self) -> &'static str {
        match self.session.phase() {
            Phase::Idle => "START",
            Phase::Running | Phase::Finished => "RESTART",
        }
    }

    /// Handle a click at map coordinates.
    pub fn on_click(&mut self, point: Point, view: &mut dyn GameView) -> ClickOutcome {
        if self.session.phase() != Phase::Running {
            return ClickOutcome::Ignored;
        }
        let Some(target) = self.session.target().map(str::to_string) else {
            return ClickOutcome::Ignored;
        };

        let Some(clicked) = self.atlas.resolve(point).map(str::to_string) else {
            tracing::debug!(x = point.x, y = point.y, "click missed every region");
            self.set_status(view, status::missed(&target));
            return ClickOutcome::Missed;
        };

        if !self.session.is_target(&clicked) {
            tracing::debug!(clicked = %clicked, wanted = %target, "wrong region");
            self.set_status(view, status::wrong_region(&clicked, &target));
            return ClickOutcome::WrongRegion { clicked };
        }

        let solved_fill = self.config.solved_fill.clone();
        self.atlas.store_mut().set_fill(&clicked, solved_fill);
        view.render_map(&self.atlas.store().render());

        let now = self.clock.now();
        match self.session.solve_target(now, self.rng.as_mut()) {
            Some(Advance::Next { solved }) => {
                let remaining = self.session.remaining().len();
                tracing::debug!(solved = %solved, remaining, "correct");
                if let Some(next) = self.session.target().map(str::to_string) {
                    self.set_status(view, status::announce(&next, remaining));
                }
                ClickOutcome::Correct { solved, remaining }
            }
            Some(Advance::Finished { solved, elapsed }) => {
                let new_best = self.complete(elapsed, view);
                ClickOutcome::Completed {
                    solved,
                    elapsed,
                    new_best,
                }
            }
            None => ClickOutcome::Ignored,
        }
    }

    /// Timer callback. Refreshes the elapsed-time display while running and
    /// returns the elapsed time; returns `None` (and does nothing) otherwise,
    /// which is the host's cue to stop scheduling ticks.
    pub fn tick(&mut self, view: &mut dyn GameView) -> Option<Duration> {
        if self.session.phase() != Phase::Running {
            return None;
        }
        let elapsed = self.session.elapsed(self.clock.now())?;
        self.set_timer(view, status::timer(elapsed));
        Some(elapsed)
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn target(&self) -> Option<&str> {
        self.session.target()
    }

    pub fn remaining(&self) -> &BTreeSet<String> {
        self.session.remaining()
    }

    pub fn remaining_count(&self) -> usize {
        self.session.remaining().len()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Live elapsed time while running, the final time once finished.
    pub fn elapsed(&self) -> Option<Duration> {
        self.session.elapsed(self.clock.now())
    }

    pub fn best_time(&self) -> Option<f64> {
        self.best_time
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn timer_text(&self) -> &str {
        &self.timer_text
    }

    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn reset(&mut self, view: &mut dyn GameView) {
        self.session = GameSession::new();
        self.atlas.store_mut().reset_fills();
        view.render_map(&self.atlas.store().render());
        self.set_timer(view, status::timer(Duration::ZERO));
        self.set_status(view, String::new());
    }

    /// Score a finished run. Returns whether it set a new best time.
    fn complete(&mut self, elapsed: Duration, view: &mut dyn GameView) -> bool {
        let seconds = elapsed.as_secs_f64();
        let new_best = is_new_best(seconds, self.best_time);
        let mut message = status::completed();

        if new_best {
            self.best_time = Some(seconds);
            match self.scores.save(seconds) {
                Ok(()) => tracing::info!(seconds, "new best time"),
                Err(e) => {
                    tracing::error!(seconds, error = %e, "failed to save best time");
                    message = status::save_failed(&e.to_string());
                }
            }
            view.set_best_time_text(&status::best_time(self.best_time));
        } else {
            tracing::info!(seconds, best = self.best_time, "run finished");
        }

        self.set_timer(view, status::final_timer(elapsed, new_best));
        self.set_status(view, message);
        new_best
    }

    fn set_status(&mut self, view: &mut dyn GameView, text: String) {
        view.set_status_text(&text);
        self.status_text = text;
    }

    fn set_timer(&mut self, view: &mut dyn GameView, text: String) {
        view.set_timer_text(&text);
        self.timer_text = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{Fill, RegionSpec};
    use crate::game::clock::ManualClock;
    use crate::game::view::RecordingView;
    use crate::geometry::Polygon;
    use crate::score::MemoryScoreStore;

    fn strip_atlas() -> Atlas {
        Atlas::new(
            vec![
                RegionSpec::new("A", Polygon::rect(0.0, 0.0, 1.0, 1.0)),
                RegionSpec::new("B", Polygon::rect(1.0, 0.0, 2.0, 1.0)),
                RegionSpec::new("C", Polygon::rect(2.0, 0.0, 3.0, 1.0)),
            ],
            Fill::new("tan"),
        )
        .unwrap()
    }

    fn center_of(name: &str) -> Point {
        match name {
            "A" => Point::new(0.5, 0.5),
            "B" => Point::new(1.5, 0.5),
            "C" => Point::new(2.5, 0.5),
            other => panic!("unknown region {other}"),
        }
    }

    fn engine_with(scores: MemoryScoreStore) -> (GameEngine, ManualClock) {
        let clock = ManualClock::new();
        let engine = GameEngine::new(strip_atlas(), Box::new(scores), GameConfig::seeded(5))
            .with_clock(clock.clone());
        (engine, clock)
    }

    fn solve_all(engine: &mut GameEngine, view: &mut RecordingView) -> ClickOutcome {
        let mut last = ClickOutcome::Ignored;
        while let Some(target) = engine.target().map(str::to_string) {
            last = engine.on_click(center_of(&target), view);
        }
        last
    }

    #[test]
    fn starts_idle_and_ignores_clicks() {
        let (mut engine, _) = engine_with(MemoryScoreStore::new());
        let mut view = RecordingView::new();
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.target(), None);
        assert_eq!(engine.on_click(Point::new(0.5, 0.5), &mut view), ClickOutcome::Ignored);
        assert!(view.statuses.is_empty());
        assert_eq!(engine.tick(&mut view), None);
    }

    #[test]
    fn present_paints_initial_state() {
        let (engine, _) = engine_with(MemoryScoreStore::with_best(30.0));
        let mut view = RecordingView::new();
        engine.present(&mut view);
        assert_eq!(view.frames.len(), 1);
        assert_eq!(view.last_best_time(), Some("Best time: 30.0s"));
        assert_eq!(view.last_timer(), Some("Time: 0.0s"));
        assert_eq!(view.last_action_label(), Some("START"));
    }

    #[test]
    fn start_announces_target() {
        let (mut engine, _) = engine_with(MemoryScoreStore::new());
        let mut view = RecordingView::new();
        assert!(engine.start(&mut view));
        assert_eq!(engine.phase(), Phase::Running);
        let target = engine.target().unwrap().to_string();
        assert!(engine.remaining().contains(&target));
        assert_eq!(
            view.last_status(),
            Some(format!("Click on: {target}  (3 left)").as_str())
        );
        assert_eq!(view.last_action_label(), Some("RESTART"));
    }

    #[test]
    fn start_while_running_is_noop() {
        let (mut engine, _) = engine_with(MemoryScoreStore::new());
        let mut view = RecordingView::new();
        engine.start(&mut view);
        let target = engine.target().map(str::to_string);
        assert!(!engine.start(&mut view));
        assert_eq!(engine.target().map(str::to_string), target);
    }

    #[test]
    fn miss_keeps_state() {
        let (mut engine, _) = engine_with(MemoryScoreStore::new());
        let mut view = RecordingView::new();
        engine.start(&mut view);
        let target = engine.target().unwrap().to_string();

        let outcome = engine.on_click(Point::new(50.0, 50.0), &mut view);
        assert_eq!(outcome, ClickOutcome::Missed);
        assert_eq!(engine.remaining_count(), 3);
        assert_eq!(engine.target(), Some(target.as_str()));
        assert_eq!(engine.status_text(), status::missed(&target));
    }

    #[test]
    fn wrong_region_names_both_and_keeps_state() {
        let (mut engine, _) = engine_with(MemoryScoreStore::new());
        let mut view = RecordingView::new();
        engine.start(&mut view);
        let target = engine.target().unwrap().to_string();
        let wrong = ["A", "B", "C"].into_iter().find(|n| *n != target).unwrap();

        let outcome = engine.on_click(center_of(wrong), &mut view);
        assert_eq!(
            outcome,
            ClickOutcome::WrongRegion {
                clicked: wrong.to_string()
            }
        );
        assert_eq!(engine.remaining_count(), 3);
        assert_eq!(engine.target(), Some(target.as_str()));
        assert_eq!(view.last_status(), Some(status::wrong_region(wrong, &target).as_str()));
    }

    #[test]
    fn correct_click_recolors_and_draws_next() {
        let (mut engine, _) = engine_with(MemoryScoreStore::new());
        let mut view = RecordingView::new();
        engine.start(&mut view);
        let target = engine.target().unwrap().to_string();

        let outcome = engine.on_click(center_of(&target), &mut view);
        assert_eq!(
            outcome,
            ClickOutcome::Correct {
                solved: target.clone(),
                remaining: 2
            }
        );
        assert!(!engine.remaining().contains(&target));
        let next = engine.target().unwrap();
        assert_ne!(next, target);
        assert!(engine.remaining().contains(next));
        assert_eq!(
            view.fill_in_last_frame(&target),
            Some(&Fill::new("lightgreen"))
        );
    }

    #[test]
    fn tick_reports_elapsed_only_while_running() {
        let (mut engine, clock) = engine_with(MemoryScoreStore::new());
        let mut view = RecordingView::new();
        engine.start(&mut view);
        clock.advance_secs(2.5);
        assert_eq!(engine.tick(&mut view), Some(Duration::from_millis(2500)));
        assert_eq!(view.last_timer(), Some("Time: 2.5s"));

        solve_all(&mut engine, &mut view);
        let timers_before = view.timers.len();
        assert_eq!(engine.tick(&mut view), None);
        assert_eq!(view.timers.len(), timers_before);
    }

    #[test]
    fn completing_first_run_saves_best() {
        let (mut engine, clock) = engine_with(MemoryScoreStore::new());
        let mut view = RecordingView::new();
        engine.start(&mut view);
        clock.advance_secs(12.0);

        let outcome = solve_all(&mut engine, &mut view);
        let ClickOutcome::Completed {
            elapsed, new_best, ..
        } = outcome
        else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(elapsed, Duration::from_secs(12));
        assert!(new_best);
        assert_eq!(engine.phase(), Phase::Finished);
        assert_eq!(engine.target(), None);
        assert_eq!(engine.best_time(), Some(12.0));
        assert_eq!(view.last_timer(), Some("Time: 12.0s — NEW HIGH SCORE!"));
        assert_eq!(view.last_best_time(), Some("Best time: 12.0s"));
        assert_eq!(engine.status_text(), status::completed());
    }

    #[test]
    fn slower_run_keeps_existing_best() {
        let (mut engine, clock) = engine_with(MemoryScoreStore::with_best(5.0));
        let mut view = RecordingView::new();
        engine.start(&mut view);
        clock.advance_secs(8.0);
        let outcome = solve_all(&mut engine, &mut view);
        assert!(matches!(outcome, ClickOutcome::Completed { new_best: false, .. }));
        assert_eq!(engine.best_time(), Some(5.0));
        assert_eq!(view.last_timer(), Some("Time: 8.0s"));
    }

    #[test]
    fn save_failure_is_reported_not_fatal() {
        let (mut engine, clock) = engine_with(MemoryScoreStore::failing());
        let mut view = RecordingView::new();
        engine.start(&mut view);
        clock.advance_secs(3.0);
        let outcome = solve_all(&mut engine, &mut view);
        assert!(matches!(outcome, ClickOutcome::Completed { new_best: true, .. }));
        assert_eq!(engine.phase(), Phase::Finished);
        assert_eq!(engine.best_time(), Some(3.0));
        assert!(engine.status_text().contains("could not save high score"));
    }

    #[test]
    fn clicks_after_finish_are_ignored() {
        let (mut engine, _) = engine_with(MemoryScoreStore::new());
        let mut view = RecordingView::new();
        engine.start(&mut view);
        solve_all(&mut engine, &mut view);
        assert_eq!(engine.on_click(center_of("A"), &mut view), ClickOutcome::Ignored);
        assert!(!engine.start(&mut view), "finished runs only restart");
    }

    #[test]
    fn restart_mid_run_resets_everything() {
        let (mut engine, clock) = engine_with(MemoryScoreStore::new());
        let mut view = RecordingView::new();
        engine.start(&mut view);
        let target = engine.target().unwrap().to_string();
        engine.on_click(center_of(&target), &mut view);
        clock.advance_secs(4.0);

        engine.restart(&mut view);
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.remaining_count(), 3);
        assert!(engine.remaining().contains(engine.target().unwrap()));
        assert_eq!(engine.elapsed(), Some(Duration::ZERO));
        assert!(
            engine
                .atlas()
                .store()
                .render()
                .iter()
                .all(|e| e.fill.as_str() == "tan")
        );
    }

    #[test]
    fn primary_action_starts_then_restarts() {
        let (mut engine, _) = engine_with(MemoryScoreStore::new());
        let mut view = RecordingView::new();
        assert_eq!(engine.action_label(), "START");
        engine.primary_action(&mut view);
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.action_label(), "RESTART");

        solve_all(&mut engine, &mut view);
        assert_eq!(engine.phase(), Phase::Finished);
        engine.primary_action(&mut view);
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.remaining_count(), 3);
    }

    #[test]
    fn empty_map_finishes_without_scoring() {
        let atlas = Atlas::new(Vec::new(), Fill::new("tan")).unwrap();
        let mut engine = GameEngine::new(
            atlas,
            Box::new(MemoryScoreStore::new()),
            GameConfig::seeded(1),
        )
        .with_clock(ManualClock::new());
        let mut view = RecordingView::new();
        assert!(engine.start(&mut view));
        assert_eq!(engine.phase(), Phase::Finished);
        assert_eq!(engine.target(), None);
        assert_eq!(engine.best_time(), None);
        assert_eq!(engine.status_text(), status::completed());
    }
}
