//! Plays a full quiz against the engine without a window.
//!
//! `cargo run --example console_quiz [regions.json]` uses the given region
//! collection, or a tiny built-in map of the Four Corners states.

use std::path::PathBuf;

use nolines::atlas::{Atlas, MapSnapshot, RegionSpec, load_regions};
use nolines::game::{ClickOutcome, GameView, ManualClock};
use nolines::geometry::{Point, Polygon};
use nolines::{GameConfig, GameEngine, JsonScoreFile};
use tracing_subscriber::EnvFilter;

struct ConsoleView;

impl GameView for ConsoleView {
    fn render_map(&mut self, map: &MapSnapshot<'_>) {
        let fills: Vec<String> = map
            .iter()
            .map(|entry| format!("{}={}", entry.name, entry.fill))
            .collect();
        eprintln!("[map]    {}", fills.join(", "));
    }

    fn set_status_text(&mut self, text: &str) {
        eprintln!("[status] {text}");
    }

    fn set_timer_text(&mut self, text: &str) {
        eprintln!("[timer]  {text}");
    }

    fn set_best_time_text(&mut self, text: &str) {
        eprintln!("[best]   {text}");
    }
}

fn four_corners() -> Vec<RegionSpec> {
    vec![
        RegionSpec::new("Utah", Polygon::rect(-114.0, 37.0, -109.05, 42.0)),
        RegionSpec::new("Colorado", Polygon::rect(-109.05, 37.0, -102.05, 41.0)),
        RegionSpec::new("Arizona", Polygon::rect(-114.8, 31.3, -109.05, 37.0)),
        RegionSpec::new("New Mexico", Polygon::rect(-109.05, 31.3, -103.0, 37.0)),
    ]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let specs = match std::env::args().nth(1) {
        Some(path) => load_regions(&PathBuf::from(path)).expect("failed to load regions"),
        None => four_corners(),
    };

    let config = GameConfig {
        seed: Some(2024),
        high_score_path: std::env::temp_dir().join("nolines-demo-highscore.json"),
        ..GameConfig::default()
    };
    let atlas = Atlas::new(specs, config.default_fill.clone()).expect("invalid region data");
    let scores = JsonScoreFile::new(&config.high_score_path);
    let clock = ManualClock::new();
    let tick = config.tick_interval;
    let mut engine = GameEngine::new(atlas, Box::new(scores), config).with_clock(clock.clone());
    let mut view = ConsoleView;

    engine.present(&mut view);
    engine.primary_action(&mut view);

    // A player who first clicks the ocean, then a wrong state, then finds it.
    engine.on_click(Point::new(-130.0, 20.0), &mut view);
    // Bounding-box centers can miss odd shapes in a loaded map; cap the attempts.
    for _ in 0..1000 {
        let Some(target) = engine.target().map(str::to_string) else {
            break;
        };
        let regions = engine.atlas().store().regions();
        let wrong = regions.iter().find(|r| !r.matches(&target));
        if let Some(wrong) = wrong {
            let c = centroid(wrong.bounding_box());
            engine.on_click(c, &mut view);
        }

        for _ in 0..15 {
            clock.advance(tick);
            engine.tick(&mut view);
        }

        let Some(region) = engine.atlas().store().find(&target) else {
            break;
        };
        let c = centroid(region.bounding_box());
        if let ClickOutcome::Completed { elapsed, new_best, .. } = engine.on_click(c, &mut view) {
            eprintln!(
                "finished in {:.1}s{}",
                elapsed.as_secs_f64(),
                if new_best { " (new best)" } else { "" }
            );
        }
    }
}

fn centroid(b: nolines::geometry::BoundingBox) -> Point {
    Point::new((b.min_x + b.max_x) / 2.0, (b.min_y + b.max_y) / 2.0)
}
