//! Rendering of session reports.
//!
//! The core hands reporters a [`SessionReport`](crate::SessionReport);
//! everything here is pure formatting. Terminal output covers the one-line
//! summary and the per-test comparison table against prior sessions; JSON
//! output serializes the report for machine consumers.

pub mod json;
pub mod terminal;
