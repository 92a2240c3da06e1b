//! Player-facing text for the status line, timer and best-time label.

use std::time::Duration;

pub fn announce(target: &str, remaining: usize) -> String {
    format!("Click on: {target}  ({remaining} left)")
}

pub fn missed(target: &str) -> String {
    format!("Missed! You clicked outside. Try again: {target}")
}

pub fn wrong_region(clicked: &str, target: &str) -> String {
    format!("Oops — you clicked {clicked}. Try again: {target}")
}

pub fn completed() -> String {
    "Well done! You've clicked all the states!".to_string()
}

pub fn save_failed(reason: &str) -> String {
    format!("{} (could not save high score: {reason})", completed())
}

pub fn timer(elapsed: Duration) -> String {
    format!("Time: {:.1}s", elapsed.as_secs_f64())
}

pub fn final_timer(elapsed: Duration, new_best: bool) -> String {
    if new_best {
        format!("{} — NEW HIGH SCORE!", timer(elapsed))
    } else {
        timer(elapsed)
    }
}

pub fn best_time(best: Option<f64>) -> String {
    match best {
        Some(seconds) => format!("Best time: {seconds:.1}s"),
        None => "Best time: —".to_string(),
    }
}
