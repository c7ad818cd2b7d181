//! Evidence report loading
//!
//! Reads a report file and hands the bytes to the pure decoder in
//! `apidrift-core`; this module only adds the existence check and the path
//! context on failure.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, report_not_found, Result};
use apidrift_core::evidence::{parse_report_bytes, EvidenceReport};
use apidrift_core::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Load and decode an evidence report from `path`
///
/// # Errors
///
/// - `NotFound` if nothing exists at `path`
/// - `Io` if the file cannot be read
/// - `MalformedReport` if the contents do not decode or lack a required field
pub fn load_report(path: &Path) -> Result<EvidenceReport> {
    let start = Instant::now();
    log_op_start!("load_report", path = %path.display());

    match read_and_parse(path) {
        Ok(report) => {
            log_op_end!(
                "load_report",
                duration_ms = start.elapsed().as_millis() as u64,
                tests_len = report.tests.len(),
                api_calls_len = report.api_call_count()
            );
            Ok(report)
        }
        Err(err) => {
            log_op_error!(
                "load_report",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                path = %path.display()
            );
            Err(err)
        }
    }
}

fn read_and_parse(path: &Path) -> Result<EvidenceReport> {
    if !path.exists() {
        return Err(report_not_found(path));
    }

    let bytes = fs::read(path).map_err(|e| io_error("load_report", path, e))?;

    parse_report_bytes(&bytes).map_err(|e| e.with_path(path.display().to_string()))
}
