//! Measurement infrastructure: repeated timing and iteration calibration.
//!
//! Timing uses `std::time::Instant`, the platform's monotonic
//! high-resolution clock. Very fast bodies are batched `number` times per
//! trial so each timed span comfortably exceeds timer resolution; the
//! batching factor either comes fixed from configuration or is calibrated
//! per test by [`determine_number`].

mod calibrate;
mod timer;

pub use calibrate::{determine_number, number_for_bootstrap, BOOTSTRAP_ITERATIONS};
pub use timer::{black_box, measure};
