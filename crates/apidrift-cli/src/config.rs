//! Layered run configuration
//!
//! Precedence, lowest to highest: built-in defaults, the TOML config file,
//! `APIDRIFT_*` environment variables, command-line flags. The last two are
//! both resolved by clap before this module sees them.

use crate::commands::compare::CompareArgs;
use apidrift_core::errors::{ExError, ExErrorKind};
use apidrift_core::Severity;
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "apidrift.toml";

pub const DEFAULT_BASELINE: &str = "reports/baseline/latest.json";
pub const DEFAULT_CURRENT: &str = "reports/current/latest.json";
pub const DEFAULT_OUTPUT_JSON: &str = "reports/comparison/comparison-result.json";
pub const DEFAULT_OUTPUT_TEXT: &str = "reports/comparison/comparison-report.txt";

/// Lowest severity that makes the run fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    #[default]
    Critical,
    Warning,
}

impl FailOn {
    pub fn threshold(self) -> Severity {
        match self {
            FailOn::Critical => Severity::Critical,
            FailOn::Warning => Severity::Warning,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Run(#[from] ExError),
}

impl CliError {
    /// The canonical error kind, for logging
    pub fn kind(&self) -> ExErrorKind {
        match self {
            CliError::ConfigRead { .. } | CliError::ConfigParse { .. } => {
                ExErrorKind::InvalidConfig
            }
            CliError::Run(e) => e.kind(),
        }
    }
}

impl From<&CliError> for ExError {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::Run(e) => e.clone(),
            other => ExError::new(other.kind())
                .with_op("load_config")
                .with_message(other.to_string()),
        }
    }
}

/// Contents of `apidrift.toml`
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub policy: PolicySection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    pub baseline: Option<PathBuf>,
    pub current: Option<PathBuf>,
    pub output_json: Option<PathBuf>,
    pub output_text: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PolicySection {
    pub fail_on: Option<FailOn>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub format: Option<LogFormat>,
}

impl FileConfig {
    /// Parse config text
    pub fn parse(text: &str, path: &Path) -> Result<Self, CliError> {
        toml::from_str(text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit config file, or `apidrift.toml` if it exists, or
    /// nothing.
    ///
    /// # Errors
    ///
    /// An explicit path that cannot be read, or any file that does not
    /// parse, is an error. A missing default file is not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, CliError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = fs::read_to_string(&path).map_err(|source| CliError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        Self::parse(&text, &path)
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub baseline: PathBuf,
    pub current: PathBuf,
    pub output_json: PathBuf,
    pub output_text: PathBuf,
    pub fail_on: FailOn,
    pub log_format: LogFormat,
    pub quiet: bool,
}

impl Settings {
    /// Layer clap-resolved values (flags, then env) over the config file
    /// over the defaults.
    pub fn resolve(args: &CompareArgs, file: FileConfig) -> Self {
        let FileConfig {
            paths,
            policy,
            logging,
        } = file;
        Self {
            baseline: pick(args.baseline.clone(), paths.baseline, DEFAULT_BASELINE),
            current: pick(args.current.clone(), paths.current, DEFAULT_CURRENT),
            output_json: pick(args.output_json.clone(), paths.output_json, DEFAULT_OUTPUT_JSON),
            output_text: pick(args.output_text.clone(), paths.output_text, DEFAULT_OUTPUT_TEXT),
            fail_on: args.fail_on.or(policy.fail_on).unwrap_or_default(),
            log_format: args.log_format.or(logging.format).unwrap_or_default(),
            quiet: args.quiet,
        }
    }
}

fn pick(arg: Option<PathBuf>, file: Option<PathBuf>, default: &str) -> PathBuf {
    arg.or(file).unwrap_or_else(|| PathBuf::from(default))
}
