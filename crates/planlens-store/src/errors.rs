//! Error helpers for planlens-store
//!
//! Wraps planlens-core LensError with store-specific constructors

use planlens_core::errors::{LensError, LensErrorKind};
use std::path::Path;

/// Result type alias using LensError
pub type Result<T> = std::result::Result<T, LensError>;

/// Create an IO error for a file operation
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> LensError {
    LensError::new(LensErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a JSON parse error for an input file
pub fn parse_error(path: &Path, err: serde_json::Error) -> LensError {
    LensError::new(LensErrorKind::Serialization)
        .with_op("load_json")
        .with_path(path.display().to_string())
        .with_message(format!("invalid JSON: {}", err))
}

/// Create an export error for a category file
pub fn export_error(destination: &str, reason: &str) -> LensError {
    LensError::new(LensErrorKind::Persistence)
        .with_op("export_category")
        .with_message(format!("Export of {} failed: {}", destination, reason))
}
