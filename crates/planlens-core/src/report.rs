//! Plain-text report renderer for classified plan sections.
//!
//! Informational only; nothing here feeds back into classification.

use crate::classify::model::{ChangeSummary, ClassificationBatch, ResourceChange};
use crate::errors::PlanLensError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Render the per-token counters for one section.
pub fn render_summary(summary: &ChangeSummary, section: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Plan Summary: +++{}+++\n", section));
    out.push_str(&format!("Resources to create: {}\n", summary.create));
    out.push_str(&format!("Resources to update: {}\n", summary.update));
    out.push_str(&format!("Resources to delete: {}\n", summary.delete));
    out.push_str(&format!("Resources to replace: {}\n", summary.replace));
    out.push_str(&format!("Resources with no operation: {}\n", summary.no_op));
    out
}

/// Message shown instead of a report when a section has no records.
pub fn render_no_changes(section: &str) -> String {
    format!(
        "No changes detected in the plan for the +++({})+++ section\n",
        section
    )
}

/// Render every category's records in report order.
///
/// State values are printed as JSON indented by four spaces; absent
/// differences print as `null`.
///
/// # Errors
///
/// - `Serialization`: a record could not be encoded as JSON
pub fn render_detailed_changes(
    batch: &ClassificationBatch,
    section: &str,
) -> Result<String, PlanLensError> {
    let mut out = String::new();
    out.push_str(&format!("Detailed Plan Analysis: +++({})+++\n", section));

    for (category, records) in batch.categories() {
        if records.is_empty() {
            out.push_str(&format!(
                "No changes detected for the +++({})+++ section\n",
                category
            ));
            continue;
        }

        out.push_str(&format!(
            "Detailed Plan Analysis for the +++({})+++ section:\n",
            category
        ));
        for record in records {
            render_record(&mut out, record)?;
        }
        out.push('\n');
    }

    Ok(out)
}

fn render_record(out: &mut String, record: &ResourceChange) -> Result<(), PlanLensError> {
    let actions: Vec<&str> = record.actions.iter().map(|a| a.as_str()).collect();

    out.push('\n');
    out.push_str(&format!("Resource Name: {}\n", display_or_null(&record.name)));
    out.push_str(&format!(
        "Resource Type: {}\n",
        display_or_null(&record.resource_type)
    ));
    out.push_str(&format!("Actions: {}\n", actions.join(", ")));
    out.push_str(&format!("Before:\n{}\n", to_pretty_json(&record.before)?));
    out.push_str(&format!("After:\n{}\n", to_pretty_json(&record.after)?));
    out.push_str(&format!(
        "Dependencies:\n{}\n",
        to_pretty_json(&record.dependencies)?
    ));
    out.push_str(&format!(
        "Differences:\n{}\n",
        to_pretty_json(&record.differences)?
    ));
    Ok(())
}

fn display_or_null(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("null")
}

/// Encode as JSON with a four-space indent.
///
/// # Errors
///
/// - `Serialization`: the value could not be encoded
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, PlanLensError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| PlanLensError::Serialization {
        message: e.to_string(),
    })
}
