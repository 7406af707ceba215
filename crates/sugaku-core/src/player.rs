//! Persistent player statistics with JSON storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grade::Grade;

/// Default statistics file name, relative to the working directory.
pub const DEFAULT_STATS_FILE: &str = "player_stats.json";

/// Lifetime counters across all quiz sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub problems_attempted: u64,
    /// Never exceeds `problems_attempted`.
    pub problems_correct: u64,
    /// Total think time in seconds.
    pub total_time: f64,
}

impl PlayerStatistics {
    /// Count one answered problem.
    pub fn record(&mut self, correct: bool, elapsed: Duration) {
        self.problems_attempted = self.problems_attempted.saturating_add(1);
        if correct {
            self.problems_correct = self.problems_correct.saturating_add(1);
        }
        self.total_time += elapsed.as_secs_f64();
    }

    /// Percentage of correct answers, `None` before the first attempt.
    pub fn accuracy(&self) -> Option<f64> {
        (self.problems_attempted > 0)
            .then(|| self.problems_correct as f64 / self.problems_attempted as f64 * 100.0)
    }

    /// Mean think time per problem in seconds.
    pub fn average_time(&self) -> Option<f64> {
        (self.problems_attempted > 0).then(|| self.total_time / self.problems_attempted as f64)
    }

    pub fn grade(&self) -> Option<Grade> {
        self.accuracy().map(Grade::from_accuracy)
    }

    /// Check the invariants a loaded record must satisfy.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.problems_correct <= self.problems_attempted,
            "problems_correct ({}) exceeds problems_attempted ({})",
            self.problems_correct,
            self.problems_attempted
        );
        anyhow::ensure!(
            self.total_time.is_finite() && self.total_time >= 0.0,
            "total_time must be a non-negative number of seconds, got {}",
            self.total_time
        );
        Ok(())
    }
}

/// What [`StatsStore::reset`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Removed,
    NothingToReset,
}

/// A statistics record persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record. A missing file yields zeroed statistics; an unreadable
    /// or invalid one is an error for the caller to report.
    pub fn load(&self) -> Result<PlayerStatistics> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no statistics at {}, starting fresh", self.path.display());
                return Ok(PlayerStatistics::default());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read statistics from {}", self.path.display())
                })
            }
        };
        let stats: PlayerStatistics = serde_json::from_str(&content).with_context(|| {
            format!("failed to parse statistics JSON in {}", self.path.display())
        })?;
        stats
            .validate()
            .with_context(|| format!("invalid statistics in {}", self.path.display()))?;
        Ok(stats)
    }

    /// Load the record, falling back to zeroed statistics on any failure.
    /// The failure is returned alongside so the caller can show it.
    pub fn load_or_default(&self) -> (PlayerStatistics, Option<anyhow::Error>) {
        match self.load() {
            Ok(stats) => (stats, None),
            Err(e) => {
                tracing::warn!("falling back to empty statistics: {e:#}");
                (PlayerStatistics::default(), Some(e))
            }
        }
    }

    pub fn save(&self, stats: &PlayerStatistics) -> Result<()> {
        let json = serde_json::to_string_pretty(stats).context("failed to serialize statistics")?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write statistics to {}", self.path.display()))?;
        tracing::info!(
            attempted = stats.problems_attempted,
            correct = stats.problems_correct,
            "saved statistics to {}",
            self.path.display()
        );
        Ok(())
    }

    /// Delete the statistics file. A missing file is not an error.
    pub fn reset(&self) -> Result<ResetOutcome> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("removed statistics at {}", self.path.display());
                Ok(ResetOutcome::Removed)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ResetOutcome::NothingToReset),
            Err(e) => Err(e)
                .with_context(|| format!("failed to remove statistics at {}", self.path.display())),
        }
    }
}

impl Default for StatsStore {
    fn default() -> Self {
        Self::new(DEFAULT_STATS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlayerStatistics {
        PlayerStatistics {
            problems_attempted: 12,
            problems_correct: 9,
            total_time: 47.25,
        }
    }

    #[test]
    fn record_keeps_correct_at_most_attempted() {
        let mut stats = PlayerStatistics::default();
        for i in 0..50 {
            stats.record(i % 3 == 0, Duration::from_millis(250));
            assert!(stats.problems_correct <= stats.problems_attempted);
        }
        assert_eq!(stats.problems_attempted, 50);
        assert_eq!(stats.problems_correct, 17);
        assert!((stats.total_time - 12.5).abs() < 1e-9);
    }

    #[test]
    fn record_saturates_at_the_counter_limit() {
        let mut stats = PlayerStatistics {
            problems_attempted: u64::MAX,
            problems_correct: u64::MAX,
            total_time: 1.0,
        };
        stats.record(true, Duration::from_secs(1));
        assert_eq!(stats.problems_attempted, u64::MAX);
        assert_eq!(stats.problems_correct, u64::MAX);
        assert!(stats.validate().is_ok());

        stats.problems_correct = u64::MAX - 1;
        stats.record(true, Duration::ZERO);
        assert_eq!(stats.problems_correct, u64::MAX);
        assert!(stats.problems_correct <= stats.problems_attempted);
    }

    #[test]
    fn save_reports_an_uncreatable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, "a file, not a directory").unwrap();
        let store = StatsStore::new(blocker.join("stats.json"));
        let err = store.save(&sample()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to create"), "{err:#}");
    }

    #[test]
    fn derived_values() {
        let stats = sample();
        assert_eq!(stats.accuracy(), Some(75.0));
        assert!((stats.average_time().unwrap() - 3.9375).abs() < 1e-9);
        assert_eq!(stats.grade(), Some(Grade::B));

        let empty = PlayerStatistics::default();
        assert_eq!(empty.accuracy(), None);
        assert_eq!(empty.average_time(), None);
        assert_eq!(empty.grade(), None);
    }

    #[test]
    fn save_then_load_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("nested/deeper/stats.json"));
        store.save(&sample()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn json_shape_uses_the_three_counters() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        store.save(&sample()).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["problems_attempted"], 12);
        assert_eq!(raw["problems_correct"], 9);
        assert_eq!(raw["total_time"], 47.25);
    }

    #[test]
    fn reads_integer_total_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        std::fs::write(
            &path,
            r#"{"problems_attempted": 3, "problems_correct": 1, "total_time": 9}"#,
        )
        .unwrap();
        let stats = StatsStore::new(path).load().unwrap();
        assert_eq!(stats.total_time, 9.0);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), PlayerStatistics::default());
    }

    #[test]
    fn corrupt_file_is_an_error_with_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        std::fs::write(&path, "this is not json").unwrap();
        let store = StatsStore::new(path);
        assert!(store.load().is_err());

        let (stats, err) = store.load_or_default();
        assert_eq!(stats, PlayerStatistics::default());
        assert!(format!("{:#}", err.unwrap()).contains("failed to parse"));
    }

    #[test]
    fn impossible_counters_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        std::fs::write(
            &path,
            r#"{"problems_attempted": 2, "problems_correct": 5, "total_time": 1.0}"#,
        )
        .unwrap();
        let err = StatsStore::new(path).load().unwrap_err();
        assert!(format!("{err:#}").contains("exceeds"));
    }

    #[test]
    fn reset_without_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("absent.json"));
        assert_eq!(store.reset().unwrap(), ResetOutcome::NothingToReset);
        assert_eq!(store.load().unwrap(), PlayerStatistics::default());
    }

    #[test]
    fn reset_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        store.save(&sample()).unwrap();
        assert_eq!(store.reset().unwrap(), ResetOutcome::Removed);
        assert!(!store.path().exists());
        assert_eq!(store.reset().unwrap(), ResetOutcome::NothingToReset);
    }
}
