//! Comparison output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! The JSON shape (camelCase keys, `type` tag on differences) is what the
//! CLI writes as the machine-readable result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operational importance of a difference.
///
/// Ordered so that `Critical` is the maximum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only
    Info,
    /// Needs review
    Warning,
    /// Build-breaking
    Critical,
}

impl Severity {
    /// Severity for a status code that appears in current but never in baseline
    pub fn for_new_status_code(code: u16) -> Self {
        if code >= 500 {
            Severity::Critical
        } else if code >= 400 {
            Severity::Warning
        } else {
            Severity::Info
        }
    }

    /// Severity for a test whose status changed to `to`
    pub fn for_status_transition(to: crate::evidence::TestStatus) -> Self {
        if to == crate::evidence::TestStatus::Failed {
            Severity::Critical
        } else {
            Severity::Warning
        }
    }

    /// All severities, most severe first
    pub const DESCENDING: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of deviation a [`Difference`] records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    StatusCode,
    ResponseBody,
    NewEndpoint,
    MissingEndpoint,
    TestStatus,
}

impl DifferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifferenceKind::StatusCode => "status_code",
            DifferenceKind::ResponseBody => "response_body",
            DifferenceKind::NewEndpoint => "new_endpoint",
            DifferenceKind::MissingEndpoint => "missing_endpoint",
            DifferenceKind::TestStatus => "test_status",
        }
    }
}

impl std::fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected deviation between baseline and current.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Difference {
    #[serde(rename = "type")]
    pub kind: DifferenceKind,

    pub severity: Severity,

    /// Endpoint key, for API-call differences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Test title, for test-status differences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,

    pub details: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<Value>,
}

impl Difference {
    /// A difference attached to an endpoint key
    pub fn endpoint(
        kind: DifferenceKind,
        severity: Severity,
        endpoint: &str,
        details: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            endpoint: Some(endpoint.to_string()),
            test: None,
            details: details.into(),
            baseline: None,
            current: None,
        }
    }

    /// A test-status difference attached to a test title
    pub fn test(severity: Severity, title: &str, details: impl Into<String>) -> Self {
        Self {
            kind: DifferenceKind::TestStatus,
            severity,
            endpoint: None,
            test: Some(title.to_string()),
            details: details.into(),
            baseline: None,
            current: None,
        }
    }

    pub fn with_baseline(mut self, value: impl Into<Value>) -> Self {
        self.baseline = Some(value.into());
        self
    }

    pub fn with_current(mut self, value: impl Into<Value>) -> Self {
        self.current = Some(value.into());
        self
    }

    /// Endpoint key or test title, whichever this difference is about
    pub fn subject(&self) -> Option<&str> {
        self.endpoint.as_deref().or(self.test.as_deref())
    }
}

/// Aggregate counts for a comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub total_differences: usize,
    pub critical_differences: usize,
    pub warning_differences: usize,
    pub info_differences: usize,
    pub baseline_tests: usize,
    pub current_tests: usize,
    pub baseline_api_calls: usize,
    pub current_api_calls: usize,
}

/// The full result of comparing a current report against a baseline.
///
/// Built once by the comparator and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    pub summary: ComparisonSummary,

    /// Test-status differences first, then API-call differences
    pub differences: Vec<Difference>,

    /// When the comparison completed
    pub timestamp: DateTime<Utc>,
}

impl ComparisonResult {
    /// Most severe difference present, if any
    pub fn max_severity(&self) -> Option<Severity> {
        self.differences.iter().map(|d| d.severity).max()
    }

    pub fn has_critical(&self) -> bool {
        self.summary.critical_differences > 0
    }

    /// No differences at all
    pub fn is_clean(&self) -> bool {
        self.differences.is_empty()
    }

    /// Differences of one severity, in result order
    pub fn differences_with(&self, severity: Severity) -> impl Iterator<Item = &Difference> {
        self.differences
            .iter()
            .filter(move |d| d.severity == severity)
    }
}
