//! Shared evidence-report fixtures.
//!
//! Reports are built as JSON and decoded through `parse_report_bytes`, so
//! every test also exercises the wire format the harness writes.

use apidrift_core::evidence::{parse_report_bytes, EvidenceReport};
use serde_json::{json, Value};

/// One API call as the harness records it
#[allow(dead_code)]
pub fn call(method: &str, url: &str, status: u16, body: Value) -> Value {
    json!({
        "method": method,
        "url": url,
        "statusCode": status,
        "responseBody": body,
        "headers": {"content-type": "application/json"},
        "responseHeaders": {},
        "timestamp": "2026-03-01T12:00:01.000Z"
    })
}

/// One test record
#[allow(dead_code)]
pub fn test(title: &str, status: &str, calls: Vec<Value>) -> Value {
    json!({
        "testId": format!("id-{}", title.replace(' ', "-")),
        "title": title,
        "file": "tests/api/contacts.spec.ts",
        "status": status,
        "apiCalls": calls
    })
}

/// A full report JSON document around `tests`
#[allow(dead_code)]
pub fn report_json(tests: Vec<Value>) -> Value {
    let passed = tests.iter().filter(|t| t["status"] == "passed").count();
    let failed = tests
        .iter()
        .filter(|t| t["status"] == "failed" || t["status"] == "timedOut")
        .count();
    json!({
        "metadata": {
            "timestamp": "2026-03-01T12:00:00.000Z",
            "environment": "staging",
            "totalTests": tests.len(),
            "passedTests": passed,
            "failedTests": failed
        },
        "tests": tests
    })
}

/// Decode a report built from `tests`
#[allow(dead_code)]
pub fn report(tests: Vec<Value>) -> EvidenceReport {
    let bytes = serde_json::to_vec(&report_json(tests)).unwrap();
    parse_report_bytes(&bytes).unwrap()
}
