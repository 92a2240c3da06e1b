//! The quiz itself.
//!
//! `GameEngine` owns a `GameSession` and drives it from clicks and timer
//! ticks, pushing every visible change through a `GameView`.

pub mod clock;
pub mod engine;
pub mod session;
pub mod status;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{ClickOutcome, GameEngine};
pub use session::{Advance, GameSession, Phase};
pub use view::{GameView, RecordingView};
