//! Error types for the harness.

use std::io;
use std::path::PathBuf;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error raised by a test case body or its setup.
///
/// Host adapters wrap whatever their framework produces; the harness only
/// needs to propagate it.
pub type CaseError = Box<dyn std::error::Error + Send + Sync>;

/// All failure modes of the harness.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A test case body or setup failed during measurement.
    ///
    /// The measurement for that case is aborted; no statistics are recorded.
    #[error("test case `{id}` failed during measurement")]
    Case {
        /// Identity of the failing case.
        id: String,
        /// The error the case raised.
        #[source]
        source: CaseError,
    },

    /// Trial count does not match the configured repeat count.
    #[error("expected {expected} trial durations, got {actual}")]
    TrialCountMismatch {
        /// Configured repeat count.
        expected: usize,
        /// Number of trial durations actually provided.
        actual: usize,
    },

    /// No trial durations to reduce.
    #[error("cannot reduce an empty set of trial durations")]
    EmptyTrials,

    /// Iteration count must be positive when reducing statistics.
    #[error("iteration count must be positive, got 0")]
    ZeroIterations,

    /// Auto-calibration produced an unrepresentable iteration count.
    ///
    /// A near-zero bootstrap time scales the count past any usable bound;
    /// this is surfaced rather than clamped.
    #[error(
        "calibration overflow: bootstrap trial of {bootstrap_secs}s cannot be \
         scaled to a {threshold_secs}s threshold"
    )]
    CalibrationOverflow {
        /// Total elapsed seconds of the 3-iteration bootstrap trial.
        bootstrap_secs: f64,
        /// Target trial duration in seconds.
        threshold_secs: f64,
    },

    /// The history file exists but is not valid JSON for the history schema.
    #[error("history file {} is malformed", path.display())]
    HistoryParse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the history file failed.
    #[error("history file I/O at {}", path.display())]
    HistoryIo {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Serializing the in-memory history failed.
    #[error("failed to serialize history")]
    HistorySerialize(#[source] serde_json::Error),
}

impl Error {
    /// Wrap a case-level failure with the case identity.
    pub(crate) fn case(id: &str, source: CaseError) -> Self {
        Error::Case {
            id: id.to_string(),
            source,
        }
    }
}
