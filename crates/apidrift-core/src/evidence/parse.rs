//! Evidence report decoding and encoding.

#![allow(clippy::result_large_err)]

use crate::errors::{ExError, ExErrorKind, ReportError};
use crate::evidence::model::EvidenceReport;
use serde_json::Value;

/// Top-level keys every evidence report must carry.
const REQUIRED_FIELDS: &[&str] = &["metadata", "tests"];

/// Decode raw report bytes into an [`EvidenceReport`].
///
/// Unknown keys at any level are kept in the structs' `extra` maps.
///
/// # Errors
///
/// `MalformedReport` when the bytes are not UTF-8, not JSON, the root is not an
///   object, or typed decoding fails (bad status, bad timestamp, missing
///   nested field). When `metadata` or `tests` is absent at the top level the
///   error also carries the missing field name.
pub fn parse_report_bytes(bytes: &[u8]) -> Result<EvidenceReport, ExError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ReportError::InvalidUtf8 {
        reason: e.to_string(),
    })?;

    let raw: Value = serde_json::from_str(text).map_err(|e| ReportError::InvalidJson {
        reason: e.to_string(),
    })?;

    let obj = raw.as_object().ok_or(ReportError::RootNotObject)?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !obj.contains_key(**f)) {
        return Err(ReportError::MissingField {
            field: missing.to_string(),
        }
        .into());
    }

    let report: EvidenceReport =
        serde_json::from_value(raw).map_err(|e| ReportError::InvalidShape {
            reason: e.to_string(),
        })?;

    Ok(report)
}

/// Encode a report as pretty-printed JSON, including any unknown keys it
/// was loaded with.
///
/// # Errors
///
/// `Serialization` if encoding fails.
pub fn report_to_pretty_json(report: &EvidenceReport) -> Result<String, ExError> {
    serde_json::to_string_pretty(report).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("encode_report")
            .with_message(e.to_string())
    })
}
