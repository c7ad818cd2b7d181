//! Baseline comparison.
//!
//! Compares a current evidence report against a baseline and produces a
//! structured, deterministic list of differences plus a text rendering for
//! review.
//!
//! ## Entry point
//!
//! ```ignore
//! use apidrift_core::compare::{compare, render_text};
//!
//! let result = compare(&baseline, &current);
//! println!("{}", render_text(&result));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs and completion time produce an
//!   identical result, down to difference order.
//! - **Reflexivity**: comparing a report with itself yields no differences.
//! - **Literal endpoint keys**: `METHOD URL` is never normalized, so calls
//!   that differ only in a path id or query string are separate endpoints.
//! - **Best-effort shapes**: a response body without a comparable shape
//!   skips the shape check for that endpoint rather than failing the run.

pub mod endpoints;
pub mod engine;
pub mod model;
pub mod render;
pub mod shape;

pub use endpoints::EndpointMap;
pub use engine::{compare, compare_at, compare_endpoints, compare_test_statuses};
pub use model::{ComparisonResult, ComparisonSummary, Difference, DifferenceKind, Severity};
pub use render::render_text;
