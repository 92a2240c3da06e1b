use crate::atlas::region::name_key;
use crate::atlas::{Fill, MapSnapshot};

/// The host UI as the engine sees it.
///
/// Window layout, fonts and painting live behind this trait. The engine
/// calls it synchronously from inside its own event handlers.
pub trait GameView {
    /// Repaint the map with the current per-region fills.
    fn render_map(&mut self, map: &MapSnapshot<'_>);

    fn set_status_text(&mut self, text: &str);

    fn set_timer_text(&mut self, text: &str);

    /// Default: no-op, for hosts without a best-time label.
    fn set_best_time_text(&mut self, text: &str) {
        let _ = text;
    }

    /// Label for the single start/restart button. Default: no-op.
    fn set_action_label(&mut self, label: &str) {
        let _ = label;
    }
}

/// A view that remembers everything it was told. Used by headless hosts and
/// tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    /// Each rendered frame as `(region name, fill)` pairs in map order.
    pub frames: Vec<Vec<(String, Fill)>>,
    pub statuses: Vec<String>,
    pub timers: Vec<String>,
    pub best_times: Vec<String>,
    pub action_labels: Vec<String>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }

    pub fn last_timer(&self) -> Option<&str> {
        self.timers.last().map(String::as_str)
    }

    pub fn last_best_time(&self) -> Option<&str> {
        self.best_times.last().map(String::as_str)
    }

    pub fn last_action_label(&self) -> Option<&str> {
        self.action_labels.last().map(String::as_str)
    }

    pub fn last_frame(&self) -> Option<&[(String, Fill)]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Fill of `name` in the most recent frame.
    pub fn fill_in_last_frame(&self, name: &str) -> Option<&Fill> {
        let key = name_key(name);
        self.last_frame()?
            .iter()
            .find(|(region, _)| name_key(region) == key)
            .map(|(_, fill)| fill)
    }
}

impl GameView for RecordingView {
    fn render_map(&mut self, map: &MapSnapshot<'_>) {
        self.frames.push(
            map.iter()
                .map(|entry| (entry.name.to_string(), entry.fill.clone()))
                .collect(),
        );
    }

    fn set_status_text(&mut self, text: &str) {
        self.statuses.push(text.to_string());
    }

    fn set_timer_text(&mut self, text: &str) {
        self.timers.push(text.to_string());
    }

    fn set_best_time_text(&mut self, text: &str) {
        self.best_times.push(text.to_string());
    }

    fn set_action_label(&mut self, label: &str) {
        self.action_labels.push(label.to_string());
    }
}
