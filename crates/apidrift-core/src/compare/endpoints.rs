//! Grouping of API calls by endpoint key.

use crate::evidence::{ApiCallRecord, EvidenceReport};
use std::collections::HashMap;

/// API calls grouped by `METHOD URL`, keys in first-seen order, calls in
/// encounter order within each group.
///
/// Borrows the calls from the report it was built from.
#[derive(Debug, Clone, Default)]
pub struct EndpointMap<'a> {
    order: Vec<String>,
    groups: HashMap<String, Vec<&'a ApiCallRecord>>,
}

impl<'a> EndpointMap<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group every call across every test of `report`
    pub fn from_report(report: &'a EvidenceReport) -> Self {
        Self::from_calls(report.api_calls())
    }

    /// Group an arbitrary sequence of calls
    pub fn from_calls(calls: impl IntoIterator<Item = &'a ApiCallRecord>) -> Self {
        let mut map = Self::new();
        for call in calls {
            map.push(call);
        }
        map
    }

    /// Append one call to its endpoint group
    pub fn push(&mut self, call: &'a ApiCallRecord) {
        let key = call.endpoint_key();
        self.declare(&key);
        if let Some(group) = self.groups.get_mut(&key) {
            group.push(call);
        }
    }

    /// Register an endpoint key without any calls.
    ///
    /// A declared-but-empty endpoint counts as absent when it is on the
    /// current side of a comparison.
    pub fn declare(&mut self, key: &str) {
        if !self.groups.contains_key(key) {
            self.order.push(key.to_string());
            self.groups.insert(key.to_string(), Vec::new());
        }
    }

    /// Calls recorded for `key`, if the key is known
    pub fn calls(&self, key: &str) -> Option<&[&'a ApiCallRecord]> {
        self.groups.get(key).map(|v| v.as_slice())
    }

    /// Endpoint keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|k| k.as_str())
    }

    /// `(key, calls)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a ApiCallRecord])> {
        self.order.iter().map(move |k| {
            let calls = self.groups.get(k).map(|v| v.as_slice()).unwrap_or(&[]);
            (k.as_str(), calls)
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    /// Number of distinct endpoint keys
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Distinct status codes across `calls`, in encounter order
pub fn distinct_status_codes(calls: &[&ApiCallRecord]) -> Vec<u16> {
    let mut codes: Vec<u16> = Vec::new();
    for call in calls {
        if !codes.contains(&call.status_code) {
            codes.push(call.status_code);
        }
    }
    codes
}

/// First call with a 2xx status, used as the representative response sample
pub fn first_success<'c>(calls: &[&'c ApiCallRecord]) -> Option<&'c ApiCallRecord> {
    calls.iter().copied().find(|c| c.is_success())
}
