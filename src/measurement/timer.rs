//! Repeated wall-clock timing of a test case.

use std::hint::black_box as std_black_box;
use std::time::Instant;

use crate::case::TestCase;
use crate::error::{Error, Result};

/// Wrapper around `std::hint::black_box` for preventing compiler
/// optimizations.
///
/// Case bodies that compute a value and discard it should pass it through
/// this so the computation is not optimized away.
#[inline]
pub fn black_box<T>(x: T) -> T {
    std_black_box(x)
}

/// Measure a case: `repeat` trials of `number` invocations each.
///
/// Per trial, the case's `setup` runs once untimed, then the body is invoked
/// exactly `number` times inside a single timed span. Returns the `repeat`
/// raw elapsed spans in seconds, one per trial, not normalized.
///
/// Trials run strictly sequentially; nothing else is timed in between. The
/// case's side effects are amplified `repeat * number` times.
///
/// # Errors
///
/// An error from `setup` or the body aborts the whole measurement
/// immediately and is returned as [`Error::Case`]. Partial trial data is
/// discarded; no statistics are derived from a failing case.
pub fn measure<C>(case: &mut C, repeat: usize, number: usize) -> Result<Vec<f64>>
where
    C: TestCase + ?Sized,
{
    let mut trials = Vec::with_capacity(repeat);
    for _ in 0..repeat {
        case.setup().map_err(|e| Error::case(case.id(), e))?;

        let start = Instant::now();
        for _ in 0..number {
            case.invoke().map_err(|e| Error::case(case.id(), e))?;
        }
        trials.push(start.elapsed().as_secs_f64());
    }
    Ok(trials)
}
