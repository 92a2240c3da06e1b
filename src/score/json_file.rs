use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ScoreStore, sanitize};
use crate::error::ScoreError;

/// On-disk layout: `{"best_time_seconds": 12.3}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    #[serde(default)]
    pub best_time_seconds: Option<f64>,
}

/// High score kept in a small JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonScoreFile {
    path: PathBuf,
}

impl JsonScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(&self) -> Option<HighScoreRecord> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read high score");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt high score");
                None
            }
        }
    }
}

impl ScoreStore for JsonScoreFile {
    fn load(&self) -> Option<f64> {
        let seconds = self.read_record()?.best_time_seconds?;
        let best = sanitize(seconds);
        if best.is_none() {
            tracing::warn!(path = %self.path.display(), seconds, "ignoring invalid high score");
        }
        best
    }

    fn save(&mut self, seconds: f64) -> Result<(), ScoreError> {
        let record = HighScoreRecord {
            best_time_seconds: Some(seconds),
        };
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, &record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        tracing::debug!(path = %self.path.display(), seconds, "saved high score");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonScoreFile {
        JsonScoreFile::new(dir.path().join("highscore.json"))
    }

    #[test]
    fn missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).load(), None);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.save(12.3).unwrap();
        assert_eq!(store.load(), Some(12.3));
    }

    #[test]
    fn save_overwrites_unconditionally() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.save(10.0).unwrap();
        store.save(99.5).unwrap();
        assert_eq!(store.load(), Some(99.5));
    }

    #[test]
    fn written_document_has_expected_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.save(42.25).unwrap();
        let v: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(v["best_time_seconds"], serde_json::json!(42.25));
    }

    #[test]
    fn corrupt_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn missing_or_mistyped_value_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{}").unwrap();
        assert_eq!(store.load(), None);
        fs::write(store.path(), r#"{"best_time_seconds": null}"#).unwrap();
        assert_eq!(store.load(), None);
        fs::write(store.path(), r#"{"best_time_seconds": "fast"}"#).unwrap();
        assert_eq!(store.load(), None);
        fs::write(store.path(), r#"{"best_time_seconds": -3.0}"#).unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn unwritable_location_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonScoreFile::new(dir.path().join("missing").join("highscore.json"));
        assert!(matches!(store.save(5.0), Err(ScoreError::Io(_))));
        assert_eq!(store.load(), None);
    }
}
