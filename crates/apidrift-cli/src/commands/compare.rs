//! Baseline comparison command
//!
//! Usage: apidrift [BASELINE_FILE] [CURRENT_FILE] [--output-json <PATH>]
//!        [--output-text <PATH>] [--config <PATH>] [--fail-on <LEVEL>]

use crate::config::{CliError, FailOn, LogFormat, Settings};
use apidrift_core::compare::{compare, render_text, ComparisonResult};
use apidrift_core::errors::ExError;
use apidrift_core::{log_op_end, log_op_error, log_op_start};
use apidrift_core_types::RunId;
use apidrift_store::{load_report, write_comparison_json, write_text_report};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "apidrift", version)]
#[command(
    about = "Compare an API test evidence report against a baseline",
    long_about = None
)]
pub struct CompareArgs {
    /// Baseline evidence report [default: reports/baseline/latest.json]
    #[arg(value_name = "BASELINE_FILE", env = "APIDRIFT_BASELINE")]
    pub baseline: Option<PathBuf>,

    /// Current evidence report [default: reports/current/latest.json]
    #[arg(value_name = "CURRENT_FILE", env = "APIDRIFT_CURRENT")]
    pub current: Option<PathBuf>,

    /// Where to write the JSON comparison result
    #[arg(long, value_name = "PATH", env = "APIDRIFT_OUTPUT_JSON")]
    pub output_json: Option<PathBuf>,

    /// Where to write the text report
    #[arg(long, value_name = "PATH", env = "APIDRIFT_OUTPUT_TEXT")]
    pub output_text: Option<PathBuf>,

    /// Config file [default: ./apidrift.toml when present]
    #[arg(long, value_name = "PATH", env = "APIDRIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Lowest severity that fails the run
    #[arg(long, value_enum, env = "APIDRIFT_FAIL_ON")]
    pub fail_on: Option<FailOn>,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, env = "APIDRIFT_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Do not echo the text report to stdout
    #[arg(long, short)]
    pub quiet: bool,
}

/// How a completed comparison ends the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Fail when any difference reaches the configured threshold
    pub fn for_result(result: &ComparisonResult, fail_on: FailOn) -> Self {
        match result.max_severity() {
            Some(max) if max >= fail_on.threshold() => Verdict::Fail,
            _ => Verdict::Pass,
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Pass => 0,
            Verdict::Fail => 1,
        }
    }
}

/// Execute the comparison: load both reports, compare, write both outputs
///
/// # Errors
///
/// Any load or write failure; nothing is written once a load fails.
pub fn execute(settings: &Settings, run_id: &RunId) -> Result<Verdict, CliError> {
    let start = Instant::now();
    log_op_start!(
        "run_comparison",
        baseline = %settings.baseline.display(),
        current = %settings.current.display()
    );

    match run(settings, run_id) {
        Ok((verdict, differences_len)) => {
            log_op_end!(
                "run_comparison",
                duration_ms = start.elapsed().as_millis() as u64,
                differences_len = differences_len,
                failed = verdict == Verdict::Fail
            );
            Ok(verdict)
        }
        Err(err) => {
            log_op_error!(
                "run_comparison",
                &err,
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn run(settings: &Settings, run_id: &RunId) -> Result<(Verdict, usize), CliError> {
    let tag = |e: ExError| CliError::from(e.with_run_id(run_id.clone()));

    let baseline = load_report(&settings.baseline).map_err(tag)?;
    let current = load_report(&settings.current).map_err(tag)?;

    let result = compare(&baseline, &current);
    let text = render_text(&result);

    write_comparison_json(&settings.output_json, &result).map_err(tag)?;
    write_text_report(&settings.output_text, &text).map_err(tag)?;

    if !settings.quiet {
        print!("{}", text);
        println!("JSON results: {}", settings.output_json.display());
        println!("Text report:  {}", settings.output_text.display());
    }

    Ok((
        Verdict::for_result(&result, settings.fail_on),
        result.differences.len(),
    ))
}
