//! Evidence reports: the captured output of one API test run.

pub mod model;
pub mod parse;

pub use model::{ApiCallRecord, EvidenceReport, ReportMetadata, TestRecord, TestStatus};
pub use parse::{parse_report_bytes, report_to_pretty_json};
