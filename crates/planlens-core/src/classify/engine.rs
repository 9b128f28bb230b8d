//! Change classification.
//!
//! [`classify`] walks a section's records once, in order, and fills the six
//! category lists and the summary counters.

use crate::classify::model::{
    ActionToken, Category, ChangeSummary, ClassificationBatch, EntityChange, ResourceChange,
};
use crate::diff::engine::{compute_differences, DiffOptions};
use crate::errors::PlanLensError;
use serde_json::{Map, Value};

/// Categories a record belongs to, in report order.
///
/// - create with delete → `create_and_delete` only
/// - create without delete → `create`
/// - delete without create → `delete`
/// - update, replace, no-op → their own list each
///
/// Unknown tokens select nothing.
pub fn categories_for(actions: &[ActionToken]) -> Vec<Category> {
    let has = |token: ActionToken| actions.contains(&token);
    let create = has(ActionToken::Create);
    let delete = has(ActionToken::Delete);

    let mut categories = Vec::new();
    if create {
        categories.push(if delete {
            Category::CreateAndDelete
        } else {
            Category::Create
        });
    }
    if has(ActionToken::Update) {
        categories.push(Category::Update);
    }
    if delete && !create {
        categories.push(Category::Delete);
    }
    if has(ActionToken::Replace) {
        categories.push(Category::Replace);
    }
    if has(ActionToken::NoOp) {
        categories.push(Category::NoOp);
    }
    categories
}

impl ChangeSummary {
    /// Bump each counter whose token appears in `actions`.
    ///
    /// A create+delete record bumps both `create` and `delete` even though it
    /// is only listed under `create_and_delete`.
    pub fn count(&mut self, actions: &[ActionToken]) {
        let has = |token: ActionToken| actions.contains(&token);
        if has(ActionToken::Create) {
            self.create += 1;
        }
        if has(ActionToken::Update) {
            self.update += 1;
        }
        if has(ActionToken::Delete) {
            self.delete += 1;
        }
        if has(ActionToken::Replace) {
            self.replace += 1;
        }
        if has(ActionToken::NoOp) {
            self.no_op += 1;
        }
    }
}

/// Build the normalized record for one entity change.
///
/// Only the first action token decides whether state is diffed: a record
/// whose list starts with `no-op` is never diffed, whatever follows. Such
/// records carry empty before/after mappings and no differences.
///
/// # Errors
///
/// - `NestingTooDeep`: the record's state nests deeper than `options.max_depth`
pub fn change_details(
    record: &EntityChange,
    options: &DiffOptions,
) -> Result<ResourceChange, PlanLensError> {
    let is_control = record.actions.first().is_some_and(ActionToken::is_control);

    let (before, after, differences) = if is_control {
        let differences = compute_differences(&record.before, &record.after, options)?;
        (
            or_empty_mapping(&record.before),
            or_empty_mapping(&record.after),
            differences,
        )
    } else {
        (empty_mapping(), empty_mapping(), None)
    };

    Ok(ResourceChange {
        name: record.name.clone(),
        resource_type: record.resource_type.clone(),
        actions: record.actions.clone(),
        before,
        after,
        dependencies: record.dependencies.clone(),
        differences,
    })
}

/// Classify a section's records into category lists and summary counters.
///
/// # Errors
///
/// - `EmptyBatch`: `records` is empty
/// - `NestingTooDeep`: a control record's state nests too deeply
pub fn classify(
    records: &[EntityChange],
    section: &str,
    options: &DiffOptions,
) -> Result<(ClassificationBatch, ChangeSummary), PlanLensError> {
    if records.is_empty() {
        return Err(PlanLensError::EmptyBatch {
            section: section.to_string(),
        });
    }

    let mut batch = ClassificationBatch::default();
    let mut summary = ChangeSummary::default();

    for record in records {
        summary.count(&record.actions);

        let categories = categories_for(&record.actions);
        if categories.is_empty() {
            tracing::debug!(
                section,
                resource_name = record.name.as_deref().unwrap_or_default(),
                actions = ?record.actions,
                "record matches no category"
            );
            continue;
        }

        let details = change_details(record, options)?;
        for category in categories {
            batch.push(category, details.clone());
        }
    }

    tracing::debug!(
        section,
        record_count = records.len(),
        entries = batch.total_entries(),
        "classified section"
    );

    Ok((batch, summary))
}

fn empty_mapping() -> Value {
    Value::Object(Map::new())
}

fn or_empty_mapping(value: &Value) -> Value {
    match value {
        Value::Null => empty_mapping(),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tokens(actions: &[&str]) -> Vec<ActionToken> {
        actions.iter().map(|a| ActionToken::from(*a)).collect()
    }

    #[test]
    fn test_categories_for_create_delete_pair() {
        assert_eq!(
            categories_for(&tokens(&["create", "delete"])),
            vec![Category::CreateAndDelete]
        );
        assert_eq!(
            categories_for(&tokens(&["delete", "create"])),
            vec![Category::CreateAndDelete]
        );
    }

    #[test]
    fn test_categories_for_update_replace_overlap() {
        assert_eq!(
            categories_for(&tokens(&["update", "replace"])),
            vec![Category::Update, Category::Replace]
        );
    }

    #[test]
    fn test_categories_for_unknown_token_is_empty() {
        assert!(categories_for(&tokens(&["read"])).is_empty());
        assert!(categories_for(&[]).is_empty());
    }

    #[test]
    fn test_summary_count_create_delete_bumps_both() {
        let mut summary = ChangeSummary::default();
        summary.count(&tokens(&["create", "delete"]));
        assert_eq!(summary.create, 1);
        assert_eq!(summary.delete, 1);
        assert_eq!(summary.update, 0);
    }

    #[test]
    fn test_summary_counts_repeated_token_once() {
        let mut summary = ChangeSummary::default();
        summary.count(&tokens(&["update", "update"]));
        assert_eq!(summary.update, 1);
    }

    #[test]
    fn test_change_details_control_record_is_diffed() {
        let record = EntityChange::new("web", "aws_instance", &["update"])
            .with_before(json!({"size": "small"}))
            .with_after(json!({"size": "large"}));
        let details = change_details(&record, &DiffOptions::default()).unwrap();
        let differences = details.differences.unwrap();
        assert_eq!(differences.changed["size"].before, json!("small"));
        assert_eq!(details.before, json!({"size": "small"}));
    }

    #[test]
    fn test_change_details_absent_states_become_empty_mappings() {
        let record = EntityChange::new("web", "aws_instance", &["delete"])
            .with_before(json!({"size": "small"}));
        let details = change_details(&record, &DiffOptions::default()).unwrap();
        assert_eq!(details.after, json!({}));
        assert_eq!(
            details.differences.unwrap().removed["size"],
            json!("small")
        );
    }

    #[test]
    fn test_change_details_identical_states_have_no_differences() {
        let record = EntityChange::new("web", "aws_instance", &["update"])
            .with_before(json!({"size": "small"}))
            .with_after(json!({"size": "small"}));
        let details = change_details(&record, &DiffOptions::default()).unwrap();
        assert!(details.differences.is_none());
    }

    #[test]
    fn test_change_details_no_op_hides_state() {
        let record = EntityChange::new("web", "aws_instance", &["no-op"])
            .with_before(json!({"size": "small"}))
            .with_after(json!({"size": "small"}))
            .with_dependencies(json!(["aws_vpc.main"]));
        let details = change_details(&record, &DiffOptions::default()).unwrap();
        assert_eq!(details.before, json!({}));
        assert_eq!(details.after, json!({}));
        assert!(details.differences.is_none());
        assert_eq!(details.dependencies, json!(["aws_vpc.main"]));
    }

    #[test]
    fn test_classify_empty_records_is_empty_batch() {
        let err = classify(&[], "resource_drift", &DiffOptions::default()).unwrap_err();
        assert_eq!(
            err,
            PlanLensError::EmptyBatch {
                section: "resource_drift".to_string()
            }
        );
    }
}
