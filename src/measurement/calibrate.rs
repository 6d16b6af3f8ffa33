//! Auto-calibration of the per-trial iteration count.
//!
//! With `IterationCount::Auto`, each test gets a short bootstrap trial and
//! the iteration count is scaled so one full trial lasts at least the
//! configured threshold. This keeps trial spans well above timer resolution
//! without the caller having to guess a count per test.

use std::time::Instant;

use tracing::debug;

use crate::case::TestCase;
use crate::error::{Error, Result};

/// Iterations in the bootstrap trial used to estimate per-iteration cost.
pub const BOOTSTRAP_ITERATIONS: usize = 3;

/// Determine the iteration count for a case so one trial exceeds
/// `threshold` seconds.
///
/// Runs the case's `setup` once untimed, then times a single
/// [`BOOTSTRAP_ITERATIONS`]-iteration trial and scales its per-iteration
/// cost up to the threshold. The bootstrap invocations are real executions
/// of the body; their side effects happen.
///
/// # Errors
///
/// Propagates case failures as [`Error::Case`]. An effectively-zero
/// bootstrap time makes the scaled count unrepresentable and is returned as
/// [`Error::CalibrationOverflow`]; the count is never clamped silently.
pub fn determine_number<C>(case: &mut C, threshold: f64) -> Result<usize>
where
    C: TestCase + ?Sized,
{
    case.setup().map_err(|e| Error::case(case.id(), e))?;

    let start = Instant::now();
    for _ in 0..BOOTSTRAP_ITERATIONS {
        case.invoke().map_err(|e| Error::case(case.id(), e))?;
    }
    let bootstrap = start.elapsed().as_secs_f64();

    let number = number_for_bootstrap(bootstrap, threshold)?;
    debug!(
        id = case.id(),
        bootstrap_secs = bootstrap,
        threshold_secs = threshold,
        number,
        "calibrated iteration count"
    );
    Ok(number)
}

/// Scale a measured bootstrap time to an iteration count.
///
/// `bootstrap` is the total elapsed time of [`BOOTSTRAP_ITERATIONS`]
/// invocations; the result is `ceil(threshold / (bootstrap / 3))`. Split
/// out from [`determine_number`] so the arithmetic is testable without a
/// clock.
pub fn number_for_bootstrap(bootstrap: f64, threshold: f64) -> Result<usize> {
    let per_iteration = bootstrap / BOOTSTRAP_ITERATIONS as f64;
    let scaled = (threshold / per_iteration).ceil();

    // usize::MAX as f64 rounds up; strict less-than keeps the cast exact.
    if !scaled.is_finite() || scaled < 0.0 || scaled >= usize::MAX as f64 {
        return Err(Error::CalibrationOverflow {
            bootstrap_secs: bootstrap,
            threshold_secs: threshold,
        });
    }
    Ok((scaled as usize).max(1))
}
