//! Evidence report schema.
//!
//! An evidence report is what the API test harness writes at the end of a
//! run: run metadata plus, for every test, the request/response pairs the
//! test issued. Field names on the wire are camelCase.
//!
//! Every struct keeps unrecognised keys in a flattened `extra` map, so a
//! report produced by a newer harness survives a load → write round trip
//! unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Side-map holding keys this version does not model
pub type ExtraFields = BTreeMap<String, Value>;

/// The unit of comparison: one captured test run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidenceReport {
    /// Run-level metadata
    pub metadata: ReportMetadata,

    /// Tests in execution order
    pub tests: Vec<TestRecord>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Run-level metadata recorded by the reporter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// When the run was captured
    pub timestamp: DateTime<Utc>,

    /// Environment label (e.g. "staging")
    pub environment: String,

    pub total_tests: u64,
    pub passed_tests: u64,
    pub failed_tests: u64,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Terminal status of one test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    TimedOut,
}

impl TestStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Skipped => "skipped",
            TestStatus::TimedOut => "timedOut",
        }
    }

    /// Whether the reporter counts this status as a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, TestStatus::Failed | TestStatus::TimedOut)
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One test and the API calls it made.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    /// Stable test identifier assigned by the runner
    pub test_id: String,

    /// Human-readable title; the join key between reports
    pub title: String,

    /// Source file the test lives in
    pub file: String,

    pub status: TestStatus,

    /// Calls in the order they were issued
    pub api_calls: Vec<ApiCallRecord>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// One logged request/response pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallRecord {
    /// Uppercased HTTP verb
    pub method: String,

    /// Literal request target, never templated
    pub url: String,

    pub status_code: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,

    /// Parsed body, or the harness's parse-failure sentinel string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<Value>,

    #[serde(default)]
    pub headers: BTreeMap<String, Value>,

    #[serde(default)]
    pub response_headers: BTreeMap<String, Value>,

    pub timestamp: DateTime<Utc>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ApiCallRecord {
    /// Create a call record with empty headers and no bodies
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        status_code: u16,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            method: method.into().to_uppercase(),
            url: url.into(),
            status_code,
            request_body: None,
            response_body: None,
            headers: BTreeMap::new(),
            response_headers: BTreeMap::new(),
            timestamp,
            extra: ExtraFields::new(),
        }
    }

    /// Attach a response body
    pub fn with_response_body(mut self, body: Value) -> Self {
        self.response_body = Some(body);
        self
    }

    /// Attach a request body
    pub fn with_request_body(mut self, body: Value) -> Self {
        self.request_body = Some(body);
        self
    }

    /// The `METHOD URL` grouping key. No path or query normalization.
    pub fn endpoint_key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }

    /// True for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

impl TestRecord {
    /// Create a test record
    pub fn new(
        test_id: impl Into<String>,
        title: impl Into<String>,
        file: impl Into<String>,
        status: TestStatus,
        api_calls: Vec<ApiCallRecord>,
    ) -> Self {
        Self {
            test_id: test_id.into(),
            title: title.into(),
            file: file.into(),
            status,
            api_calls,
            extra: ExtraFields::new(),
        }
    }
}

impl EvidenceReport {
    /// Assemble a report, deriving the metadata counts from the tests.
    ///
    /// Timed-out tests count as failed; skipped tests count as neither
    /// passed nor failed.
    pub fn from_tests(
        environment: impl Into<String>,
        timestamp: DateTime<Utc>,
        tests: Vec<TestRecord>,
    ) -> Self {
        let passed = tests
            .iter()
            .filter(|t| t.status == TestStatus::Passed)
            .count() as u64;
        let failed = tests.iter().filter(|t| t.status.is_failure()).count() as u64;
        Self {
            metadata: ReportMetadata {
                timestamp,
                environment: environment.into(),
                total_tests: tests.len() as u64,
                passed_tests: passed,
                failed_tests: failed,
                extra: ExtraFields::new(),
            },
            tests,
            extra: ExtraFields::new(),
        }
    }

    /// Total API calls across all tests
    pub fn api_call_count(&self) -> usize {
        self.tests.iter().map(|t| t.api_calls.len()).sum()
    }

    /// Iterate every API call across all tests, in encounter order
    pub fn api_calls(&self) -> impl Iterator<Item = &ApiCallRecord> {
        self.tests.iter().flat_map(|t| t.api_calls.iter())
    }

    /// Distinct endpoint keys in first-seen order
    pub fn endpoint_keys(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.api_calls()
            .map(|c| c.endpoint_key())
            .filter(|k| seen.insert(k.clone()))
            .collect()
    }
}
