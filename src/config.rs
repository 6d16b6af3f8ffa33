//! Configuration for a measurement session.

use std::path::PathBuf;

/// Configuration options for a [`Session`](crate::Session).
///
/// This is plain data: the embedding layer (CLI, test framework plugin)
/// parses its own options and fills this in.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of trials collected per test (default: 3).
    pub repeat: usize,

    /// Iterations per trial (default: Auto).
    ///
    /// When set to `Auto`, the harness runs a short bootstrap trial per test
    /// and scales the iteration count so a trial lasts at least
    /// [`threshold`](Self::threshold) seconds, keeping timer-resolution noise
    /// out of the measurement. Set to a fixed value to skip calibration.
    pub iterations: IterationCount,

    /// Minimum trial duration in seconds for auto-calibration (default: 0.1).
    ///
    /// Only consulted when `iterations` is `Auto`.
    pub threshold: f64,

    /// Where to persist per-test history between sessions.
    ///
    /// `None` disables persistence entirely: the session runs in memory and
    /// never touches the filesystem.
    pub history_path: Option<PathBuf>,
}

/// Iterations per trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationCount {
    /// Calibrate per test so one trial exceeds the configured threshold.
    Auto,

    /// Use exactly N iterations per trial.
    ///
    /// Measured trial time is divided by N to get per-iteration statistics.
    Fixed(usize),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repeat: 3,
            iterations: IterationCount::Auto,
            threshold: 0.1,
            history_path: None,
        }
    }
}

impl Default for IterationCount {
    fn default() -> Self {
        Self::Auto
    }
}

impl IterationCount {
    /// The persisted sentinel form: 0 means auto, anything else is fixed.
    pub fn as_sentinel(self) -> usize {
        match self {
            Self::Auto => 0,
            Self::Fixed(n) => n,
        }
    }

    /// Build from the sentinel form used by option parsers and the history
    /// file schema.
    pub fn from_sentinel(n: usize) -> Self {
        if n == 0 {
            Self::Auto
        } else {
            Self::Fixed(n)
        }
    }
}

impl Config {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trial count.
    pub fn repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set a fixed iteration count per trial.
    pub fn fixed_iterations(mut self, number: usize) -> Self {
        self.iterations = IterationCount::Fixed(number);
        self
    }

    /// Set the auto-calibration threshold in seconds.
    pub fn threshold(mut self, secs: f64) -> Self {
        self.threshold = secs;
        self
    }

    /// Enable history persistence at the given path.
    pub fn history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }
}
