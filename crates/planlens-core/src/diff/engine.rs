//! Structural diff computation engine.
//!
//! The entry point is [`compute_differences`], which normalizes absent roots,
//! walks both trees and collapses an empty result to `None`.

use crate::diff::model::{DifferenceSet, ValueChange};
use crate::errors::PlanLensError;
use serde_json::{Map, Number, Value};
use std::borrow::Cow;

/// Default recursion limit; matches serde_json's own parse depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Tuning knobs for the diff walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Deepest nesting level the walk will descend into before failing
    pub max_depth: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Compute the differences between two plan states.
///
/// A `null` root on either side is treated as an empty mapping, so a created
/// resource reports every top-level attribute as added and a destroyed one
/// reports every attribute as removed.
///
/// Returns `Ok(None)` when the two trees are structurally equal.
///
/// # Errors
///
/// - `NestingTooDeep`: either tree nests deeper than `options.max_depth`
pub fn compute_differences(
    before: &Value,
    after: &Value,
    options: &DiffOptions,
) -> Result<Option<DifferenceSet>, PlanLensError> {
    let before = or_empty_mapping(before);
    let after = or_empty_mapping(after);

    let differences = find_differences(&before, &after, "", options)?;
    tracing::debug!(
        added = differences.added.len(),
        removed = differences.removed.len(),
        changed = differences.changed.len(),
        "computed differences"
    );

    if differences.is_empty() {
        Ok(None)
    } else {
        Ok(Some(differences))
    }
}

/// Recursively compare two values rooted at `path`.
///
/// Mappings are compared by key, sequences by position, and anything else by
/// value. The result may be empty; see [`compute_differences`] for the
/// normalizing entry point.
///
/// # Errors
///
/// - `NestingTooDeep`: either tree nests deeper than `options.max_depth`
pub fn find_differences(
    before: &Value,
    after: &Value,
    path: &str,
    options: &DiffOptions,
) -> Result<DifferenceSet, PlanLensError> {
    walk(before, after, path, 0, options)
}

fn walk(
    before: &Value,
    after: &Value,
    path: &str,
    depth: usize,
    options: &DiffOptions,
) -> Result<DifferenceSet, PlanLensError> {
    if depth > options.max_depth {
        return Err(PlanLensError::NestingTooDeep {
            path: path.to_string(),
            max_depth: options.max_depth,
        });
    }

    let mut differences = DifferenceSet::default();

    match (before, after) {
        (Value::Object(before_map), Value::Object(after_map)) => {
            diff_mappings(before_map, after_map, path, depth, options, &mut differences)?;
        }
        (Value::Array(before_items), Value::Array(after_items)) => {
            diff_sequences(before_items, after_items, path, depth, options, &mut differences)?;
        }
        _ => {
            if !scalar_eq(before, after) {
                differences.changed.insert(
                    path.to_string(),
                    ValueChange {
                        before: before.clone(),
                        after: after.clone(),
                    },
                );
            }
        }
    }

    Ok(differences)
}

fn diff_mappings(
    before: &Map<String, Value>,
    after: &Map<String, Value>,
    path: &str,
    depth: usize,
    options: &DiffOptions,
    differences: &mut DifferenceSet,
) -> Result<(), PlanLensError> {
    for (key, value) in after {
        if !before.contains_key(key) {
            differences
                .added
                .insert(key_path(path, key), value.clone());
        }
    }

    for (key, value) in before {
        if !after.contains_key(key) {
            differences
                .removed
                .insert(key_path(path, key), value.clone());
        }
    }

    for (key, before_value) in before {
        if let Some(after_value) = after.get(key) {
            let nested = walk(
                before_value,
                after_value,
                &key_path(path, key),
                depth + 1,
                options,
            )?;
            differences.merge(nested);
        }
    }

    Ok(())
}

fn diff_sequences(
    before: &[Value],
    after: &[Value],
    path: &str,
    depth: usize,
    options: &DiffOptions,
    differences: &mut DifferenceSet,
) -> Result<(), PlanLensError> {
    // Positional: an insertion at the front shows up as a change at every index.
    for (index, (before_item, after_item)) in before.iter().zip(after).enumerate() {
        let nested = walk(
            before_item,
            after_item,
            &index_path(path, index),
            depth + 1,
            options,
        )?;
        differences.merge(nested);
    }

    for (index, item) in after.iter().enumerate().skip(before.len()) {
        differences
            .added
            .insert(index_path(path, index), item.clone());
    }

    for (index, item) in before.iter().enumerate().skip(after.len()) {
        differences
            .removed
            .insert(index_path(path, index), item.clone());
    }

    Ok(())
}

/// Join a mapping key onto a path with `.`; the root path adds no separator.
///
/// The key is not escaped, so `{"a.b": 1}` and `{"a": {"b": 1}}` both yield
/// the path `a.b`.
pub fn key_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

/// Append a bracketed sequence index to a path.
pub fn index_path(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

/// Value equality for leaves and mixed-kind pairs.
///
/// Integers compare exactly. An integer equals a float only when the float
/// holds exactly that integral value, so `1` and `1.0` are equal while two
/// integers above 2^53 never collapse onto the same float.
fn scalar_eq(before: &Value, after: &Value) -> bool {
    match (before, after) {
        (Value::Number(b), Value::Number(a)) => numbers_eq(b, a),
        _ => before == after,
    }
}

fn numbers_eq(before: &Number, after: &Number) -> bool {
    match (as_integer(before), as_integer(after)) {
        (Some(b), Some(a)) => b == a,
        (Some(b), None) => after.as_f64().is_some_and(|a| float_is_integer(a, b)),
        (None, Some(a)) => before.as_f64().is_some_and(|b| float_is_integer(b, a)),
        (None, None) => before.as_f64() == after.as_f64(),
    }
}

fn as_integer(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

// `as` saturates at the i128 bounds, which lie outside every JSON integer.
fn float_is_integer(float: f64, integer: i128) -> bool {
    float.fract() == 0.0 && float as i128 == integer
}

fn or_empty_mapping(value: &Value) -> Cow<'_, Value> {
    match value {
        Value::Null => Cow::Owned(Value::Object(Map::new())),
        other => Cow::Borrowed(other),
    }
}
