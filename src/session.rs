//! Measurement session: runs cases, merges history, reports.
//!
//! A [`Session`] is the explicit owner of everything that lives for one run:
//! the configuration, the in-memory history (loaded at most once, at
//! construction), and the per-test outcomes. Cases run strictly
//! sequentially; [`Session::finish`] merges every outcome into history,
//! persists it (one write, at the end), and hands back a [`SessionReport`]
//! for rendering.

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use crate::case::TestCase;
use crate::config::{Config, IterationCount};
use crate::error::Result;
use crate::history::{Experiment, History, HistoryRecord, RunInfo};
use crate::measurement::{determine_number, measure};
use crate::statistics::{reduce, Statistics};

/// One test's outcome within a session, before history merging.
#[derive(Debug, Clone)]
struct Outcome {
    id: String,
    number: usize,
    stats: Statistics,
}

/// One test's entry in the session report.
#[derive(Debug, Clone, Serialize)]
pub struct TestReport {
    /// Stable identity of the test.
    pub id: String,
    /// Iterations per trial actually used (post-calibration).
    pub number: usize,
    /// This session's statistics.
    pub current: Statistics,
    /// The record as it stood before this session, for comparison.
    /// `None` on first observation.
    pub previous: Option<HistoryRecord>,
}

/// Everything a reporter needs about a finished session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Trials per test.
    pub repeat: usize,
    /// Configured iterations per trial; 0 means auto-calibrated per test.
    pub number: usize,
    /// Per-test results in execution order.
    pub tests: Vec<TestReport>,
}

/// A single measurement session.
pub struct Session {
    config: Config,
    history: History,
    outcomes: Vec<Outcome>,
}

impl Session {
    /// Start a session.
    ///
    /// If the config names a history file, it is read here, exactly once;
    /// later lookups and merges work on the in-memory copy. Without a path
    /// the session is purely in-memory and never touches the filesystem.
    ///
    /// # Errors
    ///
    /// Propagates history load failures (malformed file, unreadable file).
    /// A missing file is not a failure.
    pub fn new(config: Config) -> Result<Self> {
        let history = match &config.history_path {
            Some(path) => History::load(path)?,
            None => History::in_memory(),
        };
        info!(
            repeat = config.repeat,
            number = config.iterations.as_sentinel(),
            persistent = history.path().is_some(),
            "session started"
        );
        Ok(Self {
            config,
            history,
            outcomes: Vec::new(),
        })
    }

    /// Measure one case and record its outcome.
    ///
    /// Resolves the iteration count (calibrating when configured as auto),
    /// runs all trials, and reduces them to per-iteration statistics. The
    /// measurement completes fully before this returns; sessions never
    /// overlap measurements.
    ///
    /// # Errors
    ///
    /// A failure in the case's setup or body aborts its measurement and is
    /// returned without recording any outcome for the case. Degenerate
    /// reduction inputs are rejected rather than producing NaN statistics.
    pub fn run(&mut self, case: &mut dyn TestCase) -> Result<Statistics> {
        let number = match self.config.iterations {
            IterationCount::Auto => determine_number(case, self.config.threshold)?,
            IterationCount::Fixed(n) => n,
        };

        let trials = measure(case, self.config.repeat, number)?;
        let stats = reduce(&trials, self.config.repeat, number)?;
        debug!(
            id = case.id(),
            number,
            best = stats.best,
            average = stats.average,
            worst = stats.worst,
            "case measured"
        );

        self.outcomes.push(Outcome {
            id: case.id().to_string(),
            number,
            stats,
        });
        Ok(stats)
    }

    /// The history as currently loaded/merged. Mostly useful for embedders
    /// that render mid-session state.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Merge all outcomes into history, persist it, and build the report.
    ///
    /// Each outcome becomes an [`Experiment`] stamped with the session date
    /// and configuration, and is merged under the last/best/worst rules.
    /// The report's `previous` field captures each record as it stood
    /// before the merge, so reporters can compare against prior sessions.
    /// If persistence is enabled, the file is written once, here.
    ///
    /// # Errors
    ///
    /// Propagates serialization or I/O failures from the history save; the
    /// in-memory merge has already happened by then.
    pub fn finish(mut self) -> Result<SessionReport> {
        let info = RunInfo {
            date: Local::now().to_rfc3339(),
            repeat: self.config.repeat,
            number: self.config.iterations.as_sentinel(),
        };

        let outcomes = std::mem::take(&mut self.outcomes);
        let mut tests = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            let previous = self.history.lookup(&outcome.id).cloned();
            let experiment = Experiment::new(info.clone(), outcome.stats);
            self.history.merge(outcome.id.clone(), experiment);
            tests.push(TestReport {
                id: outcome.id,
                number: outcome.number,
                current: outcome.stats,
                previous,
            });
        }

        self.history.save()?;
        info!(tests = tests.len(), "session finished");
        Ok(SessionReport {
            repeat: info.repeat,
            number: info.number,
            tests,
        })
    }
}
