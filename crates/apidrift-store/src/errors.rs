//! Error handling for apidrift-store
//!
//! Wraps apidrift-core ExError with store-specific helpers

use apidrift_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a missing report error
pub fn report_not_found(path: &Path) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("load_report")
        .with_path(path.display().to_string())
        .with_message("report file does not exist")
}

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}
