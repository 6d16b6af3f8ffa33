//! Reduction of raw trial durations into per-iteration statistics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-iteration timing statistics for one test in one session.
///
/// All values are seconds per iteration. By construction
/// `best <= average <= worst`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Fastest trial, normalized per iteration.
    pub best: f64,
    /// Mean over all trials and iterations.
    pub average: f64,
    /// Slowest trial, normalized per iteration.
    pub worst: f64,
}

/// Reduce raw trial durations into [`Statistics`].
///
/// `trials` holds one elapsed span per trial, each covering `number`
/// invocations. Pure function, no I/O.
///
/// # Errors
///
/// Rejects input that would divide by zero or misattribute trials:
/// `trials.len()` must equal `repeat`, `trials` must be non-empty, and
/// `number` must be positive. Statistics are never NaN or infinite.
pub fn reduce(trials: &[f64], repeat: usize, number: usize) -> Result<Statistics> {
    if trials.is_empty() {
        return Err(Error::EmptyTrials);
    }
    if trials.len() != repeat {
        return Err(Error::TrialCountMismatch {
            expected: repeat,
            actual: trials.len(),
        });
    }
    if number == 0 {
        return Err(Error::ZeroIterations);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &t in trials {
        if t < min {
            min = t;
        }
        if t > max {
            max = t;
        }
        sum += t;
    }

    let number = number as f64;
    Ok(Statistics {
        best: min / number,
        average: sum / (repeat as f64 * number),
        worst: max / number,
    })
}
