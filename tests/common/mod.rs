#![allow(dead_code)]

use nolines::game::{ManualClock, RecordingView};
use nolines::geometry::{Point, Polygon};
use nolines::{Atlas, Fill, GameConfig, GameEngine, RegionSpec, ScoreStore};

/// Two unit squares side by side: "A" on [0,1]x[0,1], "B" on [1,2]x[0,1].
pub fn two_box_atlas() -> Atlas {
    Atlas::new(
        vec![
            RegionSpec::new("A", Polygon::rect(0.0, 0.0, 1.0, 1.0)),
            RegionSpec::new("B", Polygon::rect(1.0, 0.0, 2.0, 1.0)),
        ],
        Fill::new("tan"),
    )
    .unwrap()
}

pub fn box_center(name: &str) -> Point {
    match name {
        "A" => Point::new(0.5, 0.5),
        "B" => Point::new(1.5, 0.5),
        other => panic!("no fixture region named {other}"),
    }
}

/// Engine over the two-box map with a hand-driven clock.
pub fn two_box_engine(scores: impl ScoreStore + 'static, seed: u64) -> (GameEngine, ManualClock) {
    let clock = ManualClock::new();
    let engine = GameEngine::new(two_box_atlas(), Box::new(scores), GameConfig::seeded(seed))
        .with_clock(clock.clone());
    (engine, clock)
}

/// Click the center of every target in turn until the run ends.
pub fn play_to_end(engine: &mut GameEngine, view: &mut RecordingView) {
    while let Some(target) = engine.target().map(str::to_string) {
        engine.on_click(box_center(&target), view);
    }
}
