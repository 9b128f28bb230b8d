#![allow(clippy::unwrap_used, clippy::expect_used)]

use planlens_core::errors::PlanLensError;
use planlens_core::logging_facility::test_capture::init_test_capture;
use planlens_core::{analyse_plan, diff_states, AnalysisOptions, PlanDocument};
use planlens_core::{log_op_end, log_op_error, log_op_start};
use planlens_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use serde_json::json;
use tracing::Level;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events();
    let start_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = PlanLensError::EmptyBatch {
        section: "resource_drift".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(
        error_events[0].fields.get("err.code"),
        Some(&"ERR_EMPTY_BATCH".to_string())
    );
    assert_eq!(
        error_events[0].fields.get("err.kind"),
        Some(&"EmptyBatch".to_string())
    );
}

#[test]
fn test_analyse_plan_emits_start_and_end() {
    let capture = init_test_capture();
    let section = "logging_section_unique_4";
    let document = PlanDocument::from_value(json!({
        section: [
            {"name": "web", "type": "aws_instance",
             "change": {"actions": ["update"], "before": {"a": 1}, "after": {"a": 2}}},
            {"name": "db", "type": "aws_db_instance", "change": {"actions": ["no-op"]}}
        ]
    }))
    .unwrap();

    analyse_plan(&document, section, &AnalysisOptions::default()).unwrap();

    let events = capture.events_with("analyse_plan", "section", section);

    assert_eq!(
        events.iter().filter(|e| e.is("analyse_plan", EVENT_START)).count(),
        1
    );
    let end: Vec<_> = events
        .iter()
        .filter(|e| e.is("analyse_plan", EVENT_END))
        .collect();
    assert_eq!(end.len(), 1);
    assert_eq!(end[0].field("record_count"), Some("2"));
    assert!(end[0].field("duration_ms").is_some());
}

#[test]
fn test_analyse_plan_empty_section_emits_error_event() {
    let capture = init_test_capture();
    let section = "logging_section_unique_5";
    let document = PlanDocument::from_value(json!({ section: [] })).unwrap();

    assert!(analyse_plan(&document, section, &AnalysisOptions::default()).is_err());

    let events = capture.events_with("analyse_plan", "section", section);

    let errors: Vec<_> = events
        .iter()
        .filter(|e| e.is("analyse_plan", EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("err.code"), Some("ERR_EMPTY_BATCH"));
    assert_eq!(errors[0].level, Level::ERROR);
    assert!(!events.iter().any(|e| e.is("analyse_plan", EVENT_END)));
}

#[test]
fn test_diff_states_end_carries_diff_count() {
    let capture = init_test_capture();
    let before_count = capture.events_for_op("diff_states").len();

    diff_states(
        &json!({"a": 1, "b": 2}),
        &json!({"b": 3, "c": 4}),
        &AnalysisOptions::default(),
    )
    .unwrap();

    let new_events: Vec<_> = capture
        .events_for_op("diff_states")
        .into_iter()
        .skip(before_count)
        .collect();

    assert!(new_events.iter().any(|e| {
        e.event.as_deref() == Some(EVENT_END)
            && e.fields.get("diff_count") == Some(&"3".to_string())
    }));
}

#[test]
fn test_extra_fields_follow_lifecycle_fields() {
    let capture = init_test_capture();
    let op_name = "test_extra_fields_unique_6";

    log_op_start!(op_name, section = "resource_drift", record_count = 4_u64);
    log_op_error!(
        op_name,
        PlanLensError::MalformedValue {
            path: "resource_drift[0]".to_string(),
            reason: "bad".to_string(),
        },
        duration_ms = 7,
        section = "resource_drift"
    );

    let start = capture.events_with(op_name, "record_count", "4");
    assert_eq!(start.len(), 1);
    assert_eq!(start[0].field("section"), Some("resource_drift"));
    assert!(start[0].component.is_some());

    let failed = capture.events_with(op_name, "err.code", "ERR_MALFORMED_VALUE");
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].field("duration_ms"), Some("7"));
    assert_eq!(failed[0].field("section"), Some("resource_drift"));
    capture.assert_event_exists(op_name, EVENT_END_ERROR);
}
