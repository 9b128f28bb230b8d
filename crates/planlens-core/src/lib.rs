//! planlens Core - change-plan inspection kernel
//!
//! This crate provides:
//! - A structural diff engine over JSON tree values (added/removed/changed by path)
//! - A change classifier that buckets resource changes by action and counts them
//! - Plan document decoding for Terraform-style `resource_changes` sections
//! - Text report rendering and a sink seam for exporting classified records
//! - The error and logging facilities shared by the other planlens crates

pub mod analysis;
pub mod classify;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod plan;
pub mod report;
pub mod sink;

// Re-export commonly used types
pub use analysis::{analyse_plan, diff_states, AnalysisOptions, PlanAnalysis};
pub use classify::{ActionToken, Category, ChangeSummary, ClassificationBatch, EntityChange, ResourceChange};
pub use diff::{DiffOptions, DifferenceSet};
pub use errors::{LensError, LensErrorKind, PlanLensError, Result};
pub use plan::{PlanDocument, DEFAULT_SECTIONS};
pub use sink::{ChangeSink, MemorySink};
