//! Structural diff output types.
//!
//! Collections use `BTreeMap` so serialization is deterministic regardless of
//! the order keys were discovered in.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Before/after pair for a path present on both sides with different values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueChange {
    /// Value on the "before" side
    pub before: Value,
    /// Value on the "after" side
    pub after: Value,
}

/// The added/removed/changed triple produced by comparing two tree values.
///
/// Keys are paths such as `tags.env` or `rules[2].port`. Paths are not
/// escaped: a mapping key that itself contains `.` or `[` (Terraform tags like
/// `kubernetes.io/role`) can spell the same path as a nested key. Such a path
/// can then show up in both `added` and `removed`, and within one map the
/// entry merged last wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DifferenceSet {
    /// Paths present only on the "after" side
    pub added: BTreeMap<String, Value>,
    /// Paths present only on the "before" side
    pub removed: BTreeMap<String, Value>,
    /// Paths present on both sides with unequal values
    pub changed: BTreeMap<String, ValueChange>,
}

impl DifferenceSet {
    /// Returns true if there are no differences.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of entries across the three maps.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    /// Fold another set's entries into this one; on a path clash `other` wins.
    pub fn merge(&mut self, other: DifferenceSet) {
        self.added.extend(other.added);
        self.removed.extend(other.removed);
        self.changed.extend(other.changed);
    }
}
