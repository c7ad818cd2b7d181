//! apidrift store - file I/O for evidence reports and comparison output
//!
//! Provides:
//! - Report loading (existence check, read, decode via `apidrift-core`)
//! - Atomic writers for the comparison JSON, the text report and reports

pub mod errors;
pub mod reader;
pub mod writer;

// Re-export key types
pub use errors::Result;
pub use reader::load_report;
pub use writer::{atomic_write, write_comparison_json, write_report, write_text_report};
