//! Human-readable text renderer for comparison results.

use crate::compare::model::{ComparisonResult, Difference, Severity};
use serde_json::Value;

const RULE_WIDTH: usize = 80;

/// Line printed in place of the difference blocks when nothing changed
pub const NO_DIFFERENCES_LINE: &str = "✓ No differences found - current run matches baseline";

/// Render a [`ComparisonResult`] as plain text.
///
/// Layout: a header with the summary counts, then one block per severity
/// (critical, warning, info; empty blocks are omitted). Each entry shows
/// the difference type, the endpoint or test title, the details, and the
/// baseline/current values when present.
pub fn render_text(result: &ComparisonResult) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    out.push_str(&format!("{heavy}\nAPI BASELINE COMPARISON REPORT\n{heavy}\n"));
    out.push_str(&format!("Generated: {}\n\n", result.timestamp.to_rfc3339()));

    let s = &result.summary;
    out.push_str(&format!("SUMMARY\n{light}\n"));
    out.push_str(&format!("Baseline tests:      {}\n", s.baseline_tests));
    out.push_str(&format!("Current tests:       {}\n", s.current_tests));
    out.push_str(&format!("Baseline API calls:  {}\n", s.baseline_api_calls));
    out.push_str(&format!("Current API calls:   {}\n\n", s.current_api_calls));
    out.push_str(&format!("Total differences:   {}\n", s.total_differences));
    out.push_str(&format!("  Critical:          {}\n", s.critical_differences));
    out.push_str(&format!("  Warning:           {}\n", s.warning_differences));
    out.push_str(&format!("  Info:              {}\n\n", s.info_differences));

    if result.is_clean() {
        out.push_str(NO_DIFFERENCES_LINE);
        out.push('\n');
        return out;
    }

    for severity in Severity::DESCENDING {
        let entries: Vec<&Difference> = result.differences_with(severity).collect();
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "{} DIFFERENCES ({})\n{light}\n",
            severity_heading(severity),
            entries.len()
        ));
        for (i, diff) in entries.iter().enumerate() {
            render_entry(&mut out, i + 1, diff);
        }
    }

    out
}

fn severity_heading(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "CRITICAL",
        Severity::Warning => "WARNING",
        Severity::Info => "INFO",
    }
}

fn render_entry(out: &mut String, n: usize, diff: &Difference) {
    out.push_str(&format!("{n}. [{}]", diff.kind));
    if let Some(subject) = diff.subject() {
        out.push_str(&format!(" {subject}"));
    }
    out.push('\n');
    out.push_str(&format!("   {}\n", diff.details));
    if let Some(v) = &diff.baseline {
        out.push_str(&format!("   Baseline: {}\n", display_value(v)));
    }
    if let Some(v) = &diff.current {
        out.push_str(&format!("   Current:  {}\n", display_value(v)));
    }
    out.push('\n');
}

/// Strings print bare, everything else as compact JSON
fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
