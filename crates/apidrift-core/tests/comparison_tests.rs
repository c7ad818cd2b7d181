//! Comparison engine scenarios.
//!
//! All tests operate on decoded reports only (no file I/O).

mod common;

use apidrift_core::compare::{
    compare, compare_at, compare_endpoints, ComparisonResult, DifferenceKind, EndpointMap,
    Severity,
};
use apidrift_core::evidence::{ApiCallRecord, EvidenceReport};
use chrono::{DateTime, Utc};
use common::{call, report, test};
use serde_json::{json, Value};

fn completed() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-02T08:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn kinds(result: &ComparisonResult) -> Vec<(DifferenceKind, Severity)> {
    result
        .differences
        .iter()
        .map(|d| (d.kind, d.severity))
        .collect()
}

fn rich_report() -> EvidenceReport {
    report(vec![
        test(
            "lists contacts",
            "passed",
            vec![
                call("GET", "/contacts/v1/lists", 200, json!({"lists": [{"id": 1, "name": "a"}], "hasMore": false})),
                call("GET", "/contacts/v1/lists", 200, json!({"lists": []})),
            ],
        ),
        test(
            "rejects bad payload",
            "passed",
            vec![call("POST", "/contacts/v1/contact", 400, json!({"message": "bad"}))],
        ),
        test("skipped for now", "skipped", vec![]),
    ])
}

// ---------------------------------------------------------------------------
// Reflexivity and determinism
// ---------------------------------------------------------------------------

#[test]
fn test_compare_with_itself_yields_no_differences() {
    let a = rich_report();
    let result = compare(&a, &a);
    assert!(result.is_clean());
    assert_eq!(result.summary.total_differences, 0);
    assert_eq!(result.summary.critical_differences, 0);
    assert_eq!(result.summary.warning_differences, 0);
    assert_eq!(result.summary.info_differences, 0);
    assert_eq!(result.max_severity(), None);
}

#[test]
fn test_compare_is_deterministic() {
    let a = rich_report();
    let b = report(vec![test(
        "lists contacts",
        "failed",
        vec![call("GET", "/contacts/v1/lists", 503, Value::Null)],
    )]);
    let r1 = compare_at(&a, &b, completed());
    let r2 = compare_at(&a, &b, completed());
    assert_eq!(r1, r2);
    assert_eq!(
        serde_json::to_string(&r1).unwrap(),
        serde_json::to_string(&r2).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Test status pass
// ---------------------------------------------------------------------------

#[test]
fn test_passed_to_failed_is_critical() {
    let a = report(vec![test("T1", "passed", vec![])]);
    let b = report(vec![test("T1", "failed", vec![])]);
    let result = compare(&a, &b);
    assert_eq!(kinds(&result), vec![(DifferenceKind::TestStatus, Severity::Critical)]);
    let d = &result.differences[0];
    assert_eq!(d.test.as_deref(), Some("T1"));
    assert_eq!(d.baseline, Some(json!("passed")));
    assert_eq!(d.current, Some(json!("failed")));
    assert!(d.details.contains("passed to failed"));
}

#[test]
fn test_passed_to_skipped_is_warning() {
    let a = report(vec![test("T1", "passed", vec![])]);
    let b = report(vec![test("T1", "skipped", vec![])]);
    let result = compare(&a, &b);
    assert_eq!(kinds(&result), vec![(DifferenceKind::TestStatus, Severity::Warning)]);
}

#[test]
fn test_passed_to_timed_out_is_warning() {
    let a = report(vec![test("T1", "passed", vec![])]);
    let b = report(vec![test("T1", "timedOut", vec![])]);
    let result = compare(&a, &b);
    assert_eq!(kinds(&result), vec![(DifferenceKind::TestStatus, Severity::Warning)]);
    assert_eq!(result.differences[0].current, Some(json!("timedOut")));
}

#[test]
fn test_missing_test_is_warning() {
    let a = report(vec![test("T1", "passed", vec![]), test("T2", "passed", vec![])]);
    let b = report(vec![test("T1", "passed", vec![])]);
    let result = compare(&a, &b);
    assert_eq!(kinds(&result), vec![(DifferenceKind::TestStatus, Severity::Warning)]);
    assert_eq!(result.differences[0].test.as_deref(), Some("T2"));
    assert_eq!(result.differences[0].current, Some(json!("missing")));
}

#[test]
fn test_new_test_is_info() {
    let a = report(vec![test("T1", "passed", vec![])]);
    let b = report(vec![test("T1", "passed", vec![]), test("T9", "failed", vec![])]);
    let result = compare(&a, &b);
    assert_eq!(kinds(&result), vec![(DifferenceKind::TestStatus, Severity::Info)]);
    assert_eq!(result.differences[0].details, "New test added");
}

#[test]
fn test_status_differences_precede_api_differences() {
    let a = report(vec![test("T1", "passed", vec![call("GET", "/a", 200, Value::Null)])]);
    let b = report(vec![
        test("T1", "passed", vec![call("GET", "/b", 200, Value::Null)]),
        test("T2", "passed", vec![]),
    ]);
    let result = compare(&a, &b);
    let order: Vec<DifferenceKind> = result.differences.iter().map(|d| d.kind).collect();
    assert_eq!(
        order,
        vec![
            DifferenceKind::TestStatus,
            DifferenceKind::MissingEndpoint,
            DifferenceKind::NewEndpoint
        ]
    );
}

// ---------------------------------------------------------------------------
// Endpoint pass
// ---------------------------------------------------------------------------

#[test]
fn test_swapping_sides_flips_missing_and_new_endpoint() {
    let a = report(vec![test("T1", "passed", vec![call("GET", "/only-a", 200, Value::Null)])]);
    let b = report(vec![test("T1", "passed", vec![])]);

    let forward = compare(&a, &b);
    assert_eq!(kinds(&forward), vec![(DifferenceKind::MissingEndpoint, Severity::Warning)]);
    assert_eq!(forward.differences[0].baseline, Some(json!(1)));

    let backward = compare(&b, &a);
    assert_eq!(kinds(&backward), vec![(DifferenceKind::NewEndpoint, Severity::Info)]);
    assert_eq!(backward.differences[0].current, Some(json!(1)));
}

#[test]
fn test_new_5xx_status_code_is_single_critical() {
    let a = report(vec![test("T1", "passed", vec![call("GET", "/x", 200, Value::Null)])]);
    let b = report(vec![test(
        "T1",
        "passed",
        vec![call("GET", "/x", 200, Value::Null), call("GET", "/x", 503, Value::Null)],
    )]);
    let result = compare(&a, &b);
    assert_eq!(kinds(&result), vec![(DifferenceKind::StatusCode, Severity::Critical)]);
    let d = &result.differences[0];
    assert_eq!(d.endpoint.as_deref(), Some("GET /x"));
    assert_eq!(d.current, Some(json!(503)));
    assert_eq!(d.baseline, Some(json!([200])));
}

#[test]
fn test_new_4xx_status_code_is_warning_and_3xx_is_info() {
    let a = report(vec![test("T1", "passed", vec![call("GET", "/x", 200, Value::Null)])]);
    let b = report(vec![test(
        "T1",
        "passed",
        vec![
            call("GET", "/x", 200, Value::Null),
            call("GET", "/x", 404, Value::Null),
            call("GET", "/x", 304, Value::Null),
        ],
    )]);
    let result = compare(&a, &b);
    assert_eq!(
        kinds(&result),
        vec![
            (DifferenceKind::StatusCode, Severity::Warning),
            (DifferenceKind::StatusCode, Severity::Info)
        ]
    );
}

#[test]
fn test_dropped_status_code_is_critical() {
    let a = report(vec![test(
        "T1",
        "passed",
        vec![call("GET", "/x", 200, Value::Null), call("GET", "/x", 404, Value::Null)],
    )]);
    let b = report(vec![test("T1", "passed", vec![call("GET", "/x", 200, Value::Null)])]);
    let result = compare(&a, &b);
    assert_eq!(kinds(&result), vec![(DifferenceKind::StatusCode, Severity::Critical)]);
    assert!(result.differences[0].details.contains("404 no longer returned"));
}

#[test]
fn test_endpoint_keys_are_not_normalized() {
    let a = report(vec![test(
        "props",
        "passed",
        vec![call("GET", "/contacts/v1/properties?oid=1", 200, json!({"a": 1}))],
    )]);
    let b = report(vec![test(
        "props",
        "passed",
        vec![call("GET", "/contacts/v1/properties?oid=2", 500, json!({"b": 1}))],
    )]);
    let result = compare(&a, &b);
    // Distinct literal URLs: one missing, one new, and no cross-contaminated
    // status-code or shape comparison between them.
    assert_eq!(
        kinds(&result),
        vec![
            (DifferenceKind::MissingEndpoint, Severity::Warning),
            (DifferenceKind::NewEndpoint, Severity::Info)
        ]
    );
    assert_eq!(
        result.differences[0].endpoint.as_deref(),
        Some("GET /contacts/v1/properties?oid=1")
    );
    assert_eq!(
        result.differences[1].endpoint.as_deref(),
        Some("GET /contacts/v1/properties?oid=2")
    );
}

#[test]
fn test_zero_call_endpoint_in_current_is_missing() {
    let a = rich_report();
    let baseline = EndpointMap::from_report(&a);
    let mut current = EndpointMap::new();
    for key in baseline.keys() {
        current.declare(key);
    }
    let diffs = compare_endpoints(&baseline, &current);
    assert_eq!(diffs.len(), 2);
    assert!(diffs
        .iter()
        .all(|d| d.kind == DifferenceKind::MissingEndpoint && d.severity == Severity::Warning));
    assert_eq!(diffs[0].baseline, Some(json!(2)));
    assert_eq!(diffs[0].current, Some(json!(0)));
}

// ---------------------------------------------------------------------------
// Response shape
// ---------------------------------------------------------------------------

#[test]
fn test_removed_and_added_fields() {
    let a = report(vec![test(
        "T1",
        "passed",
        vec![call("GET", "/x", 200, json!({"id": 1, "owner": {"email": "a@b"}}))],
    )]);
    let b = report(vec![test(
        "T1",
        "passed",
        vec![call("GET", "/x", 200, json!({"id": 1, "owner": {}, "tags": []}))],
    )]);
    let result = compare(&a, &b);
    assert_eq!(
        kinds(&result),
        vec![
            (DifferenceKind::ResponseBody, Severity::Warning),
            (DifferenceKind::ResponseBody, Severity::Info)
        ]
    );
    assert_eq!(result.differences[0].baseline, Some(json!(["owner.email"])));
    assert_eq!(result.differences[1].current, Some(json!(["tags"])));
}

#[test]
fn test_shape_uses_first_success_call_only() {
    let a = report(vec![test(
        "T1",
        "passed",
        vec![
            call("GET", "/x", 500, json!({"error": "boom"})),
            call("GET", "/x", 200, json!({"a": 1})),
            call("GET", "/x", 200, json!({"a": 1, "later": true})),
        ],
    )]);
    let b = report(vec![test(
        "T1",
        "passed",
        vec![
            call("GET", "/x", 200, json!({"a": 1})),
            call("GET", "/x", 500, json!({"error": "boom", "trace": "..."})),
        ],
    )]);
    assert!(compare(&a, &b).is_clean());
}

#[test]
fn test_sentinel_body_skips_shape_check() {
    let a = report(vec![test("T1", "passed", vec![call("GET", "/x", 200, json!({"a": 1}))])]);
    let b = report(vec![test(
        "T1",
        "passed",
        vec![call("GET", "/x", 200, json!("[unparseable response body]"))],
    )]);
    assert!(compare(&a, &b).is_clean());
}

#[test]
fn test_array_bodies_compare_first_element() {
    let a = report(vec![test(
        "T1",
        "passed",
        vec![call("GET", "/items", 200, json!([{"id": 1, "name": "x"}]))],
    )]);
    let b = report(vec![test(
        "T1",
        "passed",
        vec![call("GET", "/items", 200, json!([{"id": 1}, {"id": 2, "name": "y"}]))],
    )]);
    let result = compare(&a, &b);
    assert_eq!(kinds(&result), vec![(DifferenceKind::ResponseBody, Severity::Warning)]);
    assert_eq!(result.differences[0].baseline, Some(json!(["name"])));
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[test]
fn test_failed_test_with_disjoint_status_codes() {
    let a = report(vec![test("T1", "passed", vec![call("GET", "/x", 200, json!({"a": 1}))])]);
    let b = report(vec![test(
        "T1",
        "failed",
        vec![call("GET", "/x", 500, json!({"a": 1, "b": 2}))],
    )]);
    let result = compare_at(&a, &b, completed());

    // The current side has no 2xx call, so there is no shape sample to
    // compare; both status-code directions fire because the sets are disjoint.
    assert_eq!(
        kinds(&result),
        vec![
            (DifferenceKind::TestStatus, Severity::Critical),
            (DifferenceKind::StatusCode, Severity::Critical),
            (DifferenceKind::StatusCode, Severity::Critical)
        ]
    );
    assert!(result.summary.critical_differences >= 2);
    assert!(result.has_critical());
    assert_eq!(result.timestamp, completed());
}

#[test]
fn test_successful_response_gaining_a_field() {
    let a = report(vec![test("T1", "passed", vec![call("GET", "/x", 200, json!({"a": 1}))])]);
    let b = report(vec![test(
        "T1",
        "failed",
        vec![call("GET", "/x", 200, json!({"a": 1, "b": 2}))],
    )]);
    let result = compare(&a, &b);
    assert_eq!(
        kinds(&result),
        vec![
            (DifferenceKind::TestStatus, Severity::Critical),
            (DifferenceKind::ResponseBody, Severity::Info)
        ]
    );
    assert_eq!(result.differences[1].current, Some(json!(["b"])));
}

#[test]
fn test_summary_counts() {
    let a = rich_report();
    let b = report(vec![test(
        "lists contacts",
        "failed",
        vec![call("GET", "/contacts/v1/lists", 200, json!({"lists": []}))],
    )]);
    let result = compare(&a, &b);
    let s = &result.summary;
    assert_eq!(s.baseline_tests, 3);
    assert_eq!(s.current_tests, 1);
    assert_eq!(s.baseline_api_calls, 3);
    assert_eq!(s.current_api_calls, 1);
    assert_eq!(
        s.total_differences,
        s.critical_differences + s.warning_differences + s.info_differences
    );
    assert_eq!(s.total_differences, result.differences.len());
}

#[test]
fn test_result_json_shape() {
    let a = report(vec![test("T1", "passed", vec![])]);
    let b = report(vec![test("T1", "failed", vec![])]);
    let v = serde_json::to_value(compare_at(&a, &b, completed())).unwrap();
    assert_eq!(v["summary"]["criticalDifferences"], json!(1));
    assert_eq!(v["differences"][0]["type"], json!("test_status"));
    assert_eq!(v["differences"][0]["test"], json!("T1"));
    assert_eq!(v["timestamp"], json!("2026-03-02T08:30:00Z"));
}

#[test]
fn test_constructor_uppercases_method() {
    let call = ApiCallRecord::new("patch", "/x", 200, completed());
    assert_eq!(call.endpoint_key(), "PATCH /x");
}
