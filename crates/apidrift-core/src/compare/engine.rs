//! Baseline comparison engine.
//!
//! The core entry point is [`compare`], which takes two loaded evidence
//! reports and produces a [`ComparisonResult`]. Comparison is pure: the only
//! non-deterministic input is the completion timestamp, which
//! [`compare_at`] takes explicitly.

use crate::compare::endpoints::{distinct_status_codes, first_success, EndpointMap};
use crate::compare::model::{
    ComparisonResult, ComparisonSummary, Difference, DifferenceKind, Severity,
};
use crate::compare::shape::shape_delta;
use crate::evidence::{ApiCallRecord, EvidenceReport, TestRecord};
use crate::{log_op_end, log_op_start};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;

/// Compare `current` against `baseline`, stamping the result with the
/// current time.
pub fn compare(baseline: &EvidenceReport, current: &EvidenceReport) -> ComparisonResult {
    compare_at(baseline, current, Utc::now())
}

/// Compare `current` against `baseline` with an explicit completion time.
///
/// Test-status differences always precede API-call differences.
pub fn compare_at(
    baseline: &EvidenceReport,
    current: &EvidenceReport,
    completed_at: DateTime<Utc>,
) -> ComparisonResult {
    let start = Instant::now();
    log_op_start!(
        "compare",
        baseline_tests_len = baseline.tests.len(),
        current_tests_len = current.tests.len()
    );

    let mut differences = compare_test_statuses(&baseline.tests, &current.tests);

    let baseline_endpoints = EndpointMap::from_report(baseline);
    let current_endpoints = EndpointMap::from_report(current);
    differences.extend(compare_endpoints(&baseline_endpoints, &current_endpoints));

    let summary = summarize(&differences, baseline, current);

    log_op_end!(
        "compare",
        duration_ms = start.elapsed().as_millis() as u64,
        differences_len = differences.len(),
        critical = summary.critical_differences,
        warning = summary.warning_differences,
        info = summary.info_differences
    );

    ComparisonResult {
        summary,
        differences,
        timestamp: completed_at,
    }
}

/// Tests keyed by title, titles in first-seen order.
///
/// When two records share a title the later record replaces the earlier one
/// but keeps the earlier one's position.
struct TitleIndex<'a> {
    order: Vec<&'a str>,
    by_title: HashMap<&'a str, &'a TestRecord>,
}

impl<'a> TitleIndex<'a> {
    fn build(tests: &'a [TestRecord], side: &str) -> Self {
        let mut order = Vec::with_capacity(tests.len());
        let mut by_title = HashMap::with_capacity(tests.len());
        for test in tests {
            let title = test.title.as_str();
            if by_title.insert(title, test).is_some() {
                tracing::warn!(
                    side,
                    title,
                    "duplicate test title; later record replaces earlier one"
                );
            } else {
                order.push(title);
            }
        }
        Self { order, by_title }
    }

    fn get(&self, title: &str) -> Option<&'a TestRecord> {
        self.by_title.get(title).copied()
    }

    fn iter(&self) -> impl Iterator<Item = &'a TestRecord> + '_ {
        self.order.iter().filter_map(move |t| self.get(t))
    }
}

/// Pass 1: compare terminal test statuses joined by title.
pub fn compare_test_statuses(baseline: &[TestRecord], current: &[TestRecord]) -> Vec<Difference> {
    let base = TitleIndex::build(baseline, apidrift_core_types::schema::SIDE_BASELINE);
    let curr = TitleIndex::build(current, apidrift_core_types::schema::SIDE_CURRENT);
    let mut out = Vec::new();

    for b in base.iter() {
        match curr.get(&b.title) {
            None => out.push(
                Difference::test(Severity::Warning, &b.title, "Test missing in current run")
                    .with_baseline(b.status.as_str())
                    .with_current("missing"),
            ),
            Some(c) if c.status != b.status => out.push(
                Difference::test(
                    Severity::for_status_transition(c.status),
                    &b.title,
                    format!("Test status changed from {} to {}", b.status, c.status),
                )
                .with_baseline(b.status.as_str())
                .with_current(c.status.as_str()),
            ),
            Some(_) => {}
        }
    }

    for c in curr.iter() {
        if base.get(&c.title).is_none() {
            out.push(
                Difference::test(Severity::Info, &c.title, "New test added")
                    .with_current(c.status.as_str()),
            );
        }
    }

    out
}

/// Pass 2: compare API calls grouped by endpoint key.
pub fn compare_endpoints(baseline: &EndpointMap<'_>, current: &EndpointMap<'_>) -> Vec<Difference> {
    let mut out = Vec::new();

    for (key, base_calls) in baseline.iter() {
        let curr_calls = match current.calls(key) {
            Some(calls) if !calls.is_empty() => calls,
            _ => {
                out.push(
                    Difference::endpoint(
                        DifferenceKind::MissingEndpoint,
                        Severity::Warning,
                        key,
                        format!(
                            "Endpoint not called in current run ({} call(s) in baseline)",
                            base_calls.len()
                        ),
                    )
                    .with_baseline(base_calls.len())
                    .with_current(0),
                );
                continue;
            }
        };

        compare_status_codes(key, base_calls, curr_calls, &mut out);
        compare_response_shape(key, base_calls, curr_calls, &mut out);
    }

    for (key, curr_calls) in current.iter() {
        if !baseline.contains(key) {
            out.push(
                Difference::endpoint(
                    DifferenceKind::NewEndpoint,
                    Severity::Info,
                    key,
                    format!(
                        "New endpoint called in current run ({} call(s))",
                        curr_calls.len()
                    ),
                )
                .with_current(curr_calls.len()),
            );
        }
    }

    out
}

fn compare_status_codes(
    key: &str,
    base_calls: &[&ApiCallRecord],
    curr_calls: &[&ApiCallRecord],
    out: &mut Vec<Difference>,
) {
    let base_codes = distinct_status_codes(base_calls);
    let curr_codes = distinct_status_codes(curr_calls);

    for code in base_codes.iter().filter(|c| !curr_codes.contains(c)) {
        out.push(
            Difference::endpoint(
                DifferenceKind::StatusCode,
                Severity::Critical,
                key,
                format!("Status code {} no longer returned", code),
            )
            .with_baseline(*code)
            .with_current(codes_value(&curr_codes)),
        );
    }

    for code in curr_codes.iter().filter(|c| !base_codes.contains(c)) {
        out.push(
            Difference::endpoint(
                DifferenceKind::StatusCode,
                Severity::for_new_status_code(*code),
                key,
                format!("New status code {} returned", code),
            )
            .with_baseline(codes_value(&base_codes))
            .with_current(*code),
        );
    }
}

fn compare_response_shape(
    key: &str,
    base_calls: &[&ApiCallRecord],
    curr_calls: &[&ApiCallRecord],
    out: &mut Vec<Difference>,
) {
    let (Some(base_sample), Some(curr_sample)) =
        (first_success(base_calls), first_success(curr_calls))
    else {
        return;
    };
    let (Some(base_body), Some(curr_body)) = (
        base_sample.response_body.as_ref(),
        curr_sample.response_body.as_ref(),
    ) else {
        return;
    };
    let Some(delta) = shape_delta(base_body, curr_body) else {
        tracing::debug!(endpoint = key, "response body has no comparable shape");
        return;
    };

    if !delta.missing.is_empty() {
        out.push(
            Difference::endpoint(
                DifferenceKind::ResponseBody,
                Severity::Warning,
                key,
                format!(
                    "Response fields missing in current: {}",
                    delta.missing.join(", ")
                ),
            )
            .with_baseline(paths_value(&delta.missing)),
        );
    }
    if !delta.added.is_empty() {
        out.push(
            Difference::endpoint(
                DifferenceKind::ResponseBody,
                Severity::Info,
                key,
                format!("New response fields in current: {}", delta.added.join(", ")),
            )
            .with_current(paths_value(&delta.added)),
        );
    }
}

fn codes_value(codes: &[u16]) -> Value {
    Value::Array(codes.iter().map(|c| Value::from(*c)).collect())
}

fn paths_value(paths: &[String]) -> Value {
    Value::Array(paths.iter().map(|p| Value::from(p.as_str())).collect())
}

fn summarize(
    differences: &[Difference],
    baseline: &EvidenceReport,
    current: &EvidenceReport,
) -> ComparisonSummary {
    let count = |s: Severity| differences.iter().filter(|d| d.severity == s).count();
    ComparisonSummary {
        total_differences: differences.len(),
        critical_differences: count(Severity::Critical),
        warning_differences: count(Severity::Warning),
        info_differences: count(Severity::Info),
        baseline_tests: baseline.tests.len(),
        current_tests: current.tests.len(),
        baseline_api_calls: baseline.api_call_count(),
        current_api_calls: current.api_call_count(),
    }
}
