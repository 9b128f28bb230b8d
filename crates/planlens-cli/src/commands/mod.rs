//! CLI command implementations

pub mod analyse;
pub mod diff;

use planlens_core::diff::DiffOptions;
use planlens_core::errors::{LensError, LensErrorKind};
use planlens_core::AnalysisOptions;

/// Build analysis options from the `--max-depth` flag
pub fn analysis_options(max_depth: usize) -> Result<AnalysisOptions, LensError> {
    if max_depth == 0 {
        return Err(LensError::new(LensErrorKind::InvalidInput)
            .with_op("parse_args")
            .with_message("--max-depth must be at least 1"));
    }
    Ok(AnalysisOptions {
        diff: DiffOptions { max_depth },
    })
}
