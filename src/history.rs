//! Persisted per-test timing history.
//!
//! The history file is a JSON object keyed by test identity; each entry
//! tracks the last, best, and worst [`Experiment`] ever observed for that
//! test, where best and worst rank by average seconds per iteration. The
//! file is read at most once per session and rewritten at most once, at
//! session end, via a temp file renamed over the target so a partial write
//! never corrupts prior history.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::statistics::Statistics;

/// Run configuration attached to a persisted experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInfo {
    /// When the session ran, RFC 3339.
    pub date: String,
    /// Trials per test in that session.
    pub repeat: usize,
    /// Configured iterations per trial; 0 means auto-calibrated.
    pub number: usize,
}

/// One session's reduced statistics for one test, timestamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    /// Session configuration and timestamp.
    pub info: RunInfo,
    /// Fastest trial, seconds per iteration.
    pub best: f64,
    /// Mean seconds per iteration.
    pub avg: f64,
    /// Slowest trial, seconds per iteration.
    pub worst: f64,
}

impl Experiment {
    /// Build an experiment from reduced statistics.
    pub fn new(info: RunInfo, stats: Statistics) -> Self {
        Self {
            info,
            best: stats.best,
            avg: stats.average,
            worst: stats.worst,
        }
    }
}

/// The last/best/worst experiments ever observed for one test.
///
/// `last` is overwritten every session; `best` and `worst` are the running
/// extrema of `avg` across all sessions, with strict comparisons so the
/// first-seen experiment wins ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Most recent session's experiment.
    pub last: Experiment,
    /// Experiment with the minimum average seen so far.
    pub best: Experiment,
    /// Experiment with the maximum average seen so far.
    pub worst: Experiment,
}

impl HistoryRecord {
    fn first(experiment: Experiment) -> Self {
        Self {
            last: experiment.clone(),
            best: experiment.clone(),
            worst: experiment,
        }
    }

    fn update(&mut self, experiment: Experiment) {
        if experiment.avg < self.best.avg {
            self.best = experiment.clone();
        }
        if experiment.avg > self.worst.avg {
            self.worst = experiment.clone();
        }
        self.last = experiment;
    }
}

/// In-memory history for one session, optionally backed by a file.
///
/// Owned exclusively by the session: loaded once at session start, merged
/// into as tests report, saved once at session end. Between sessions the
/// file is the source of truth. Records are updated in place and never
/// deleted, so tests absent from the current session keep their history.
#[derive(Debug, Default)]
pub struct History {
    records: BTreeMap<String, HistoryRecord>,
    path: Option<PathBuf>,
}

impl History {
    /// Empty, in-memory-only history. Never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load history from `path`, remembering it as the save target.
    ///
    /// A missing file is a first run, not an error: the result is an empty
    /// history that will create the file on save.
    ///
    /// # Errors
    ///
    /// [`Error::HistoryParse`] if the file exists but is not valid JSON for
    /// the history schema (unknown extra fields are tolerated);
    /// [`Error::HistoryIo`] for any other read failure.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "no history file, starting empty");
            return Ok(Self {
                records: BTreeMap::new(),
                path: Some(path),
            });
        }

        let raw = fs::read_to_string(&path).map_err(|source| Error::HistoryIo {
            path: path.clone(),
            source,
        })?;
        let records: BTreeMap<String, HistoryRecord> =
            serde_json::from_str(&raw).map_err(|source| Error::HistoryParse {
                path: path.clone(),
                source,
            })?;
        debug!(
            path = %path.display(),
            tests = records.len(),
            "loaded history"
        );
        Ok(Self {
            records,
            path: Some(path),
        })
    }

    /// The record for a test, if one has ever been observed.
    pub fn lookup(&self, test_id: &str) -> Option<&HistoryRecord> {
        self.records.get(test_id)
    }

    /// Number of tests with history.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no test has history yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HistoryRecord)> {
        self.records.iter().map(|(id, rec)| (id.as_str(), rec))
    }

    /// Merge one experiment into the record for `test_id`.
    ///
    /// A previously unseen test gets a fresh record with
    /// `last == best == worst`. A tracked test always takes the experiment
    /// as `last`, and takes it as `best`/`worst` only when its average is
    /// strictly below/above the current extremum. Returns the record after
    /// the merge.
    pub fn merge(&mut self, test_id: impl Into<String>, experiment: Experiment) -> &HistoryRecord {
        let entry = self.records.entry(test_id.into());
        match entry {
            std::collections::btree_map::Entry::Vacant(vacant) => {
                vacant.insert(HistoryRecord::first(experiment))
            }
            std::collections::btree_map::Entry::Occupied(occupied) => {
                let record = occupied.into_mut();
                record.update(experiment);
                record
            }
        }
    }

    /// The path this history saves to, if persistence is enabled.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Persist all records to the backing file, if there is one.
    ///
    /// Writes to a temp file in the target directory and renames it over
    /// the target, so prior history survives a partial write. No-op for
    /// in-memory history. Floats round-trip exactly through the JSON
    /// encoding.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json =
            serde_json::to_string_pretty(&self.records).map_err(Error::HistorySerialize)?;

        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))
            .map_err(|source| Error::HistoryIo {
                path: path.clone(),
                source,
            })?;
        tmp.write_all(json.as_bytes())
            .map_err(|source| Error::HistoryIo {
                path: path.clone(),
                source,
            })?;
        tmp.persist(path).map_err(|e| Error::HistoryIo {
            path: path.clone(),
            source: e.error,
        })?;

        info!(
            path = %path.display(),
            tests = self.records.len(),
            "saved history"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experiment(avg: f64) -> Experiment {
        Experiment {
            info: RunInfo {
                date: "2026-08-30T12:00:00+00:00".to_string(),
                repeat: 3,
                number: 0,
            },
            best: avg * 0.9,
            avg,
            worst: avg * 1.1,
        }
    }

    #[test]
    fn first_observation_sets_all_three_slots() {
        let mut history = History::in_memory();
        let record = history.merge("t", experiment(5.0)).clone();
        assert_eq!(record.last, record.best);
        assert_eq!(record.last, record.worst);
        assert!((record.last.avg - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn running_extrema_with_first_seen_tie_policy() {
        let mut history = History::in_memory();
        for avg in [5.0, 3.0, 8.0, 3.0] {
            history.merge("t", experiment(avg));
        }
        let record = history.lookup("t").unwrap();
        assert!((record.best.avg - 3.0).abs() < f64::EPSILON);
        assert!((record.worst.avg - 8.0).abs() < f64::EPSILON);
        assert!((record.last.avg - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn equal_average_keeps_existing_best_and_worst() {
        let mut history = History::in_memory();
        let mut first = experiment(4.0);
        first.info.date = "2026-08-29T00:00:00+00:00".to_string();
        history.merge("t", first.clone());
        history.merge("t", experiment(4.0));
        let record = history.lookup("t").unwrap();
        assert_eq!(record.best.info.date, first.info.date);
        assert_eq!(record.worst.info.date, first.info.date);
        // last always takes the newest.
        assert_ne!(record.last.info.date, first.info.date);
    }

    #[test]
    fn lookup_of_unseen_test_is_none() {
        let history = History::in_memory();
        assert!(history.lookup("never.ran").is_none());
    }

    #[test]
    fn load_missing_file_yields_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let history = History::load(&path).unwrap();
        assert!(history.is_empty());
        assert_eq!(history.path(), Some(path.as_path()));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = History::load(&path).unwrap();
        history.merge("a", experiment(1.25));
        history.merge("b", experiment(0.000123456789012345));
        history.save().unwrap();

        let reloaded = History::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.lookup("a"), history.lookup("a"));
        assert_eq!(reloaded.lookup("b"), history.lookup("b"));
    }

    #[test]
    fn save_is_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = History::load(&path).unwrap();
        history.merge("a", experiment(2.0));
        history.save().unwrap();
        let first = fs::read_to_string(&path).unwrap();

        let reloaded = History::load(&path).unwrap();
        reloaded.save().unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            History::load(&path),
            Err(Error::HistoryParse { .. })
        ));
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let json = serde_json::json!({
            "t": {
                "last": {
                    "info": {"date": "2026-08-30", "repeat": 3, "number": 0,
                             "hostname": "ci-runner-7"},
                    "best": 0.1, "avg": 0.2, "worst": 0.3,
                    "stddev": 0.01
                },
                "best": {
                    "info": {"date": "2026-08-30", "repeat": 3, "number": 0},
                    "best": 0.1, "avg": 0.2, "worst": 0.3
                },
                "worst": {
                    "info": {"date": "2026-08-30", "repeat": 3, "number": 0},
                    "best": 0.1, "avg": 0.2, "worst": 0.3
                },
                "annotations": ["flaky"]
            }
        });
        fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();
        let history = History::load(&path).unwrap();
        assert!((history.lookup("t").unwrap().last.avg - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn records_not_touched_this_session_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut first = History::load(&path).unwrap();
        first.merge("old.test", experiment(1.0));
        first.save().unwrap();

        let mut second = History::load(&path).unwrap();
        second.merge("new.test", experiment(2.0));
        second.save().unwrap();

        let third = History::load(&path).unwrap();
        assert!(third.lookup("old.test").is_some());
        assert!(third.lookup("new.test").is_some());
    }

    #[test]
    fn in_memory_save_is_a_noop() {
        let mut history = History::in_memory();
        history.merge("t", experiment(1.0));
        history.save().unwrap();
        assert!(history.path().is_none());
    }
}
