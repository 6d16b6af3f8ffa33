//! # perftrack
//!
//! A performance-test harness for unit-test runners: run each test body
//! repeatedly, reduce the wall-clock measurements to best/average/worst
//! statistics, and track every test's last/best/worst runs across sessions
//! in a JSON history file.
//!
//! The harness does not discover tests and does not render tables by
//! itself; a host framework hands it [`TestCase`]s and renders the
//! [`SessionReport`] it gets back (helpers in [`output`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use perftrack::{Config, Session, case};
//!
//! # fn main() -> perftrack::Result<()> {
//! let config = Config::new()
//!     .repeat(3)
//!     .history_path("perftrack.json");
//! let mut session = Session::new(config)?;
//!
//! let mut case = case::from_fn("suite.parse_small", || {
//!     perftrack::black_box("12345".parse::<u64>().unwrap());
//! });
//! session.run(&mut case)?;
//!
//! let report = session.finish()?;
//! println!("{}", perftrack::output::terminal::format_comparison(&report));
//! # Ok(())
//! # }
//! ```
//!
//! ## Measurement model
//!
//! One *trial* times a block of `number` consecutive invocations as a
//! single span; `repeat` trials are collected per test. With
//! [`IterationCount::Auto`] the harness calibrates `number` per test so a
//! trial exceeds the configured threshold, keeping timer resolution out of
//! the numbers. Statistics are seconds per iteration, and history ranks
//! sessions by their average.
//!
//! This is deliberately not a statistical-rigor benchmarking tool: there is
//! no outlier rejection, no confidence interval, and no warm-up phase
//! beyond the repetition itself.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
mod config;
mod error;
pub mod history;
pub mod measurement;
pub mod output;
mod session;
mod statistics;

pub use case::{CaseResult, FnCase, TestCase};
pub use config::{Config, IterationCount};
pub use error::{CaseError, Error, Result};
pub use history::{Experiment, History, HistoryRecord, RunInfo};
pub use measurement::{black_box, determine_number, measure};
pub use session::{Session, SessionReport, TestReport};
pub use statistics::{reduce, Statistics};
