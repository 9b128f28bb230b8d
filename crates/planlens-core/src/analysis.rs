//! Analysis entry points with boundary logging.
//!
//! ## Logging Ownership
//!
//! This layer owns lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The diff engine and classifier below it only use `tracing::debug!()`.

use crate::classify::engine::classify;
use crate::classify::model::{ChangeSummary, ClassificationBatch};
use crate::diff::engine::{compute_differences, DiffOptions};
use crate::diff::model::DifferenceSet;
use crate::errors::{LensError, Result};
use crate::plan::PlanDocument;
use crate::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

/// Options for a plan analysis run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub diff: DiffOptions,
}

/// Classifier output for one section of a plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanAnalysis {
    pub section: String,
    pub batch: ClassificationBatch,
    pub summary: ChangeSummary,
}

/// Classify one named section of a plan document.
///
/// # Errors
///
/// - `EmptyBatch`: the section is missing, null or an empty list
/// - `MalformedValue`: the section or one of its records has the wrong
///   shape, or a record's state nests too deeply
pub fn analyse_plan(
    document: &PlanDocument,
    section: &str,
    options: &AnalysisOptions,
) -> Result<PlanAnalysis> {
    log_op_start!("analyse_plan", section = section);
    let start = Instant::now();

    let result = document
        .section_records(section)
        .and_then(|records| classify(&records, section, &options.diff).map(|r| (records.len(), r)))
        .map_err(|e| {
            log_op_error!(
                "analyse_plan",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                section = section
            );
            LensError::from(e).with_op("analyse_plan").with_section(section)
        })?;

    let (record_count, (batch, summary)) = result;

    log_op_end!(
        "analyse_plan",
        duration_ms = start.elapsed().as_millis() as u64,
        section = section,
        record_count = record_count as u64
    );

    Ok(PlanAnalysis {
        section: section.to_string(),
        batch,
        summary,
    })
}

/// Diff two standalone states, outside any plan document.
///
/// # Errors
///
/// - `MalformedValue`: either value nests deeper than the configured limit
pub fn diff_states(
    before: &Value,
    after: &Value,
    options: &AnalysisOptions,
) -> Result<Option<DifferenceSet>> {
    log_op_start!("diff_states");
    let start = Instant::now();

    let differences = compute_differences(before, after, &options.diff).map_err(|e| {
        log_op_error!(
            "diff_states",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        LensError::from(e).with_op("diff_states")
    })?;

    log_op_end!(
        "diff_states",
        duration_ms = start.elapsed().as_millis() as u64,
        diff_count = differences.as_ref().map_or(0, DifferenceSet::len) as u64
    );

    Ok(differences)
}
