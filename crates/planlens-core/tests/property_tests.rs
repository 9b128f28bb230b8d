//! Property tests for the diff engine and classifier counters.

use proptest::prelude::*;

use planlens_core::classify::{classify, EntityChange};
use planlens_core::diff::{compute_differences, DiffOptions};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map("[a-e]{1,3}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn mapping_with_prefix(prefix: &'static str) -> impl Strategy<Value = BTreeMap<String, Value>> {
    prop::collection::btree_map("[a-e]{1,3}", tree(), 0..6).prop_map(move |m| {
        m.into_iter()
            .map(|(k, v)| (format!("{}{}", prefix, k), v))
            .collect()
    })
}

fn to_object(map: &BTreeMap<String, Value>) -> Value {
    Value::Object(map.clone().into_iter().collect())
}

const TOKENS: [&str; 6] = ["create", "delete", "update", "replace", "no-op", "read"];

fn action_list() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(TOKENS.to_vec()), 0..4)
}

fn options() -> DiffOptions {
    DiffOptions::default()
}

proptest! {
    #[test]
    fn prop_diff_with_self_is_none(v in tree()) {
        prop_assert!(compute_differences(&v, &v, &options()).unwrap().is_none());
    }

    #[test]
    fn prop_disjoint_mappings_are_all_added_or_removed(
        before in mapping_with_prefix("b_"),
        after in mapping_with_prefix("a_"),
    ) {
        let result = compute_differences(&to_object(&before), &to_object(&after), &options()).unwrap();

        if before.is_empty() && after.is_empty() {
            prop_assert!(result.is_none());
        } else {
            let d = result.unwrap();
            prop_assert_eq!(d.added, after);
            prop_assert_eq!(d.removed, before);
            prop_assert!(d.changed.is_empty());
        }
    }

    #[test]
    fn prop_appended_tail_is_exactly_added(
        head in prop::collection::vec(tree(), 0..6),
        tail in prop::collection::vec(tree(), 1..4),
    ) {
        let before = Value::Array(head.clone());
        let mut extended = head.clone();
        extended.extend(tail.iter().cloned());
        let after = Value::Array(extended);

        let d = compute_differences(&before, &after, &options()).unwrap().unwrap();

        let expected: BTreeMap<String, Value> = tail
            .into_iter()
            .enumerate()
            .map(|(i, v)| (format!("[{}]", head.len() + i), v))
            .collect();
        prop_assert_eq!(d.added, expected);
        prop_assert!(d.removed.is_empty());
        prop_assert!(d.changed.is_empty());
    }

    #[test]
    fn prop_swapping_sides_swaps_labels(a in tree(), b in tree()) {
        let forward = compute_differences(&a, &b, &options()).unwrap();
        let backward = compute_differences(&b, &a, &options()).unwrap();

        match (forward, backward) {
            (None, None) => {}
            (Some(f), Some(r)) => {
                prop_assert_eq!(&f.added, &r.removed);
                prop_assert_eq!(&f.removed, &r.added);
                prop_assert_eq!(
                    f.changed.keys().collect::<BTreeSet<_>>(),
                    r.changed.keys().collect::<BTreeSet<_>>()
                );
                for (path, change) in &f.changed {
                    prop_assert_eq!(&change.before, &r.changed[path].after);
                    prop_assert_eq!(&change.after, &r.changed[path].before);
                }
            }
            (f, r) => prop_assert!(false, "asymmetric result: {:?} vs {:?}", f, r),
        }
    }

    #[test]
    fn prop_counters_match_token_presence(
        lists in prop::collection::vec(action_list(), 1..20),
    ) {
        let records: Vec<EntityChange> = lists
            .iter()
            .enumerate()
            .map(|(i, actions)| EntityChange::new(format!("r{}", i), "null_resource", actions))
            .collect();

        let (_, summary) = classify(&records, "resource_changes", &options()).unwrap();

        let with = |token: &str| lists.iter().filter(|l| l.iter().any(|t| *t == token)).count();
        prop_assert_eq!(summary.create, with("create"));
        prop_assert_eq!(summary.delete, with("delete"));
        prop_assert_eq!(summary.update, with("update"));
        prop_assert_eq!(summary.replace, with("replace"));
        prop_assert_eq!(summary.no_op, with("no-op"));
    }

    #[test]
    fn prop_combined_records_never_in_plain_lists(
        lists in prop::collection::vec(action_list(), 1..20),
    ) {
        let records: Vec<EntityChange> = lists
            .iter()
            .enumerate()
            .map(|(i, actions)| EntityChange::new(format!("r{}", i), "null_resource", actions))
            .collect();

        let (batch, _) = classify(&records, "resource_changes", &options()).unwrap();

        for entry in &batch.create_and_delete {
            prop_assert!(!batch.create.iter().any(|r| r.name == entry.name));
            prop_assert!(!batch.delete.iter().any(|r| r.name == entry.name));
        }
    }
}
