//! Decoded plan documents.
//!
//! A plan document is a JSON object whose named sections (for Terraform,
//! `resource_drift` and `resource_changes`) are lists of resource change
//! records:
//!
//! ```json
//! {"name": "web", "type": "aws_instance",
//!  "change": {"actions": ["update"], "before": {...}, "after": {...}}}
//! ```

use crate::classify::model::{ActionToken, EntityChange};
use crate::errors::PlanLensError;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Sections analysed when the caller does not name any.
pub const DEFAULT_SECTIONS: [&str; 2] = ["resource_drift", "resource_changes"];

#[derive(Debug, Deserialize)]
struct RawResourceChange {
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    resource_type: Option<String>,
    #[serde(default)]
    change: RawChange,
}

#[derive(Debug, Default, Deserialize)]
struct RawChange {
    #[serde(default, deserialize_with = "lenient_actions")]
    actions: Vec<ActionToken>,
    #[serde(default)]
    before: Value,
    #[serde(default)]
    after: Value,
    #[serde(default = "empty_mapping")]
    dependencies: Value,
}

/// Null stays absent; any other non-string value is kept as its JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// A null list is empty; non-string tokens become `ActionToken::Other`.
fn lenient_actions<'de, D>(deserializer: D) -> Result<Vec<ActionToken>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(token) => ActionToken::from(token),
            other => ActionToken::Other(other.to_string()),
        })
        .collect())
}

impl From<RawResourceChange> for EntityChange {
    fn from(raw: RawResourceChange) -> Self {
        EntityChange {
            name: raw.name,
            resource_type: raw.resource_type,
            actions: raw.change.actions,
            before: raw.change.before,
            after: raw.change.after,
            dependencies: raw.change.dependencies,
        }
    }
}

fn empty_mapping() -> Value {
    Value::Object(Map::new())
}

/// A plan document with its JSON root already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDocument {
    root: Map<String, Value>,
}

impl PlanDocument {
    /// Wrap a parsed JSON value.
    ///
    /// # Errors
    ///
    /// - `MalformedValue`: the root is not a JSON object
    pub fn from_value(value: Value) -> Result<Self, PlanLensError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(PlanLensError::MalformedValue {
                path: String::new(),
                reason: format!("plan root must be an object, got {}", kind_name(&other)),
            }),
        }
    }

    /// True if the document has a non-null entry for `section`
    pub fn has_section(&self, section: &str) -> bool {
        self.root.get(section).is_some_and(|v| !v.is_null())
    }

    /// Decode the records of one section.
    ///
    /// A missing or `null` section decodes to an empty list.
    ///
    /// # Errors
    ///
    /// - `MalformedValue`: the section is not a list, or one of its records
    ///   does not decode; the path names the section and index
    pub fn section_records(&self, section: &str) -> Result<Vec<EntityChange>, PlanLensError> {
        let items = match self.root.get(section) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(PlanLensError::MalformedValue {
                    path: section.to_string(),
                    reason: format!("section must be a list, got {}", kind_name(other)),
                })
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                RawResourceChange::deserialize(item)
                    .map(EntityChange::from)
                    .map_err(|e| PlanLensError::MalformedValue {
                        path: format!("{}[{}]", section, index),
                        reason: e.to_string(),
                    })
            })
            .collect()
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
