//! apidrift CLI
//!
//! Compares the current API test evidence report against a stored baseline
//! and exits non-zero on regressions.

use apidrift_core::logging_facility::{init, Profile};
use apidrift_core_types::RunId;
use clap::Parser;

mod commands;
mod config;

use commands::compare::CompareArgs;
use config::{FileConfig, LogFormat, Settings};

fn main() {
    let args = CompareArgs::parse();

    let settings = match FileConfig::discover(args.config.as_deref()) {
        Ok(file) => Settings::resolve(&args, file),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init(match settings.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let run_id = RunId::new();
    let span = tracing::info_span!("apidrift", run_id = %run_id);
    let _guard = span.enter();

    match commands::compare::execute(&settings, &run_id) {
        Ok(verdict) => std::process::exit(verdict.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
