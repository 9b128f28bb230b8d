//! Classification input and output types.

use crate::diff::model::DifferenceSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One token of a record's action list.
///
/// Tokens outside the known vocabulary are kept verbatim in `Other` so they
/// survive a round trip; they never select a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionToken {
    Create,
    Delete,
    Update,
    Replace,
    NoOp,
    Other(String),
}

impl ActionToken {
    /// The token as it appears in a plan document
    pub fn as_str(&self) -> &str {
        match self {
            ActionToken::Create => "create",
            ActionToken::Delete => "delete",
            ActionToken::Update => "update",
            ActionToken::Replace => "replace",
            ActionToken::NoOp => "no-op",
            ActionToken::Other(token) => token,
        }
    }

    /// Control actions are the ones whose before/after state gets diffed
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            ActionToken::Create | ActionToken::Delete | ActionToken::Update | ActionToken::Replace
        )
    }
}

impl From<&str> for ActionToken {
    fn from(token: &str) -> Self {
        match token {
            "create" => ActionToken::Create,
            "delete" => ActionToken::Delete,
            "update" => ActionToken::Update,
            "replace" => ActionToken::Replace,
            "no-op" => ActionToken::NoOp,
            other => ActionToken::Other(other.to_string()),
        }
    }
}

impl From<String> for ActionToken {
    fn from(token: String) -> Self {
        match ActionToken::from(token.as_str()) {
            ActionToken::Other(_) => ActionToken::Other(token),
            known => known,
        }
    }
}

impl From<ActionToken> for String {
    fn from(token: ActionToken) -> Self {
        match token {
            ActionToken::Other(token) => token,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource's proposed change as handed to the classifier.
///
/// `before` and `after` may be `Value::Null` for absent states; the
/// classifier treats that as an empty mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityChange {
    pub name: Option<String>,
    pub resource_type: Option<String>,
    pub actions: Vec<ActionToken>,
    pub before: Value,
    pub after: Value,
    pub dependencies: Value,
}

impl EntityChange {
    /// Record with the given identity and actions and no state content
    pub fn new(
        name: impl Into<String>,
        resource_type: impl Into<String>,
        actions: &[&str],
    ) -> Self {
        Self {
            name: Some(name.into()),
            resource_type: Some(resource_type.into()),
            actions: actions.iter().map(|a| ActionToken::from(*a)).collect(),
            before: Value::Null,
            after: Value::Null,
            dependencies: Value::Object(Map::new()),
        }
    }

    pub fn with_before(mut self, before: Value) -> Self {
        self.before = before;
        self
    }

    pub fn with_after(mut self, after: Value) -> Self {
        self.after = after;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Value) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// True if any position of the action list holds `token`
    pub fn has_action(&self, token: &ActionToken) -> bool {
        self.actions.contains(token)
    }
}

/// Normalized per-resource result embedded in every bucket it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceChange {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub actions: Vec<ActionToken>,
    pub before: Value,
    pub after: Value,
    pub dependencies: Value,
    /// `None` when nothing differs or the record is not a control action
    pub differences: Option<DifferenceSet>,
}

/// The six classification buckets, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CreateAndDelete,
    Create,
    Update,
    Delete,
    Replace,
    NoOp,
}

impl Category {
    /// Every category in fixed report order
    pub const ALL: [Category; 6] = [
        Category::CreateAndDelete,
        Category::Create,
        Category::Update,
        Category::Delete,
        Category::Replace,
        Category::NoOp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CreateAndDelete => "create_and_delete",
            Category::Create => "create",
            Category::Update => "update",
            Category::Delete => "delete",
            Category::Replace => "replace",
            Category::NoOp => "no_op",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized records grouped by category.
///
/// A record can sit in several lists at once (e.g. `update` and `replace`).
/// Each list keeps input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationBatch {
    pub create_and_delete: Vec<ResourceChange>,
    pub create: Vec<ResourceChange>,
    pub update: Vec<ResourceChange>,
    pub delete: Vec<ResourceChange>,
    pub replace: Vec<ResourceChange>,
    pub no_op: Vec<ResourceChange>,
}

impl ClassificationBatch {
    /// Records in one category
    pub fn records(&self, category: Category) -> &[ResourceChange] {
        match category {
            Category::CreateAndDelete => &self.create_and_delete,
            Category::Create => &self.create,
            Category::Update => &self.update,
            Category::Delete => &self.delete,
            Category::Replace => &self.replace,
            Category::NoOp => &self.no_op,
        }
    }

    /// Categories with their records, in report order (empty ones included)
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[ResourceChange])> + '_ {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.records(category)))
    }

    /// Append a record to one category's list
    pub fn push(&mut self, category: Category, record: ResourceChange) {
        let list = match category {
            Category::CreateAndDelete => &mut self.create_and_delete,
            Category::Create => &mut self.create,
            Category::Update => &mut self.update,
            Category::Delete => &mut self.delete,
            Category::Replace => &mut self.replace,
            Category::NoOp => &mut self.no_op,
        };
        list.push(record);
    }

    /// Sum of list lengths; a record in two lists counts twice
    pub fn total_entries(&self) -> usize {
        self.categories().map(|(_, records)| records.len()).sum()
    }
}

/// Per-token counters over a batch.
///
/// Each counter is the number of records whose action list contains that
/// token at least once; counters overlap freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub replace: usize,
    pub no_op: usize,
}
