//! Output writers
//!
//! Every write goes through [`atomic_write`] (temp file, then rename), so a
//! reader never observes a half-written comparison result.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use apidrift_core::compare::ComparisonResult;
use apidrift_core::errors::{ExError, ExErrorKind};
use apidrift_core::evidence::{report_to_pretty_json, EvidenceReport};
use apidrift_core::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Atomically write bytes to a file, creating parent directories
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_output_dir", parent, e))?;
        }
    }

    let temp_path = temp_path_for(target_path);

    fs::write(&temp_path, content).map_err(|e| io_error("write_output_temp", &temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, target_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("rename_output_temp", target_path, e));
    }

    Ok(())
}

/// `comparison-result.json` -> `comparison-result.json.tmp`
fn temp_path_for(target_path: &Path) -> PathBuf {
    let mut name = target_path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write the comparison result as pretty-printed JSON
pub fn write_comparison_json(path: &Path, result: &ComparisonResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("write_comparison_json")
            .with_message(e.to_string())
    })?;
    logged_write("write_comparison_json", path, json.as_bytes())
}

/// Write the rendered text report
pub fn write_text_report(path: &Path, text: &str) -> Result<()> {
    logged_write("write_text_report", path, text.as_bytes())
}

/// Write an evidence report as pretty-printed JSON, keeping unknown fields
pub fn write_report(path: &Path, report: &EvidenceReport) -> Result<()> {
    let json = report_to_pretty_json(report)?;
    logged_write("write_report", path, json.as_bytes())
}

fn logged_write(op: &'static str, path: &Path, content: &[u8]) -> Result<()> {
    let start = Instant::now();
    log_op_start!(op, path = %path.display(), bytes_len = content.len());

    match atomic_write(path, content) {
        Ok(()) => {
            log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
            Ok(())
        }
        Err(err) => {
            log_op_error!(
                op,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                path = %path.display()
            );
            Err(err)
        }
    }
}
