//! apidrift core - baseline comparison for API regression evidence
//!
//! This crate provides:
//! - The evidence report model written by the API test harness, with
//!   lossless handling of fields it does not know about
//! - Pure decoding of report bytes
//! - The comparison engine (test-status pass, endpoint pass, summary)
//! - The plain-text report renderer
//! - The canonical error and logging facilities shared by the workspace
//!
//! File I/O lives in `apidrift-store`; the command-line driver in
//! `apidrift-cli`.

pub mod compare;
pub mod errors;
pub mod evidence;
pub mod logging_facility;

// Re-export commonly used types
pub use compare::{compare, compare_at, render_text, ComparisonResult, Difference, Severity};
pub use errors::{ExError, ExErrorKind, Result};
pub use evidence::{parse_report_bytes, EvidenceReport};
