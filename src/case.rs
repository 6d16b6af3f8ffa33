//! Host adapter interface for test cases.
//!
//! The harness does not discover tests; a host framework hands it cases.
//! Anything measurable implements [`TestCase`]: a stable identity, an
//! optional per-trial setup, and the body itself. [`FnCase`] adapts plain
//! closures for embedders and tests that have no framework objects.

use crate::error::CaseError;

/// Result of invoking a case body or its setup.
pub type CaseResult = Result<(), CaseError>;

/// A measurable test case as seen by the harness.
///
/// Identity must be deterministic and stable across runs; it is the key
/// under which history is correlated. Parameterized tests should fold their
/// arguments into the identity string.
pub trait TestCase {
    /// Stable identity of this case.
    fn id(&self) -> &str;

    /// Per-trial setup, run once before each timed block. Untimed.
    fn setup(&mut self) -> CaseResult {
        Ok(())
    }

    /// The body being measured. Invoked `number` times per trial.
    fn invoke(&mut self) -> CaseResult;
}

/// Closure-backed [`TestCase`].
pub struct FnCase<F, S = fn() -> CaseResult>
where
    F: FnMut() -> CaseResult,
    S: FnMut() -> CaseResult,
{
    id: String,
    body: F,
    setup: Option<S>,
}

impl<F> FnCase<F>
where
    F: FnMut() -> CaseResult,
{
    /// Wrap a fallible closure as a case.
    pub fn new(id: impl Into<String>, body: F) -> Self {
        Self {
            id: id.into(),
            body,
            setup: None,
        }
    }
}

impl<F, S> FnCase<F, S>
where
    F: FnMut() -> CaseResult,
    S: FnMut() -> CaseResult,
{
    /// Attach a per-trial setup closure.
    pub fn with_setup<S2>(self, setup: S2) -> FnCase<F, S2>
    where
        S2: FnMut() -> CaseResult,
    {
        FnCase {
            id: self.id,
            body: self.body,
            setup: Some(setup),
        }
    }
}

impl<F, S> TestCase for FnCase<F, S>
where
    F: FnMut() -> CaseResult,
    S: FnMut() -> CaseResult,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn setup(&mut self) -> CaseResult {
        match &mut self.setup {
            Some(setup) => setup(),
            None => Ok(()),
        }
    }

    fn invoke(&mut self) -> CaseResult {
        (self.body)()
    }
}

/// Wrap an infallible closure as a case.
///
/// Convenience for the common path where the body cannot fail.
pub fn from_fn<F>(id: impl Into<String>, mut body: F) -> FnCase<impl FnMut() -> CaseResult>
where
    F: FnMut(),
{
    FnCase::new(id, move || {
        body();
        Ok(())
    })
}
