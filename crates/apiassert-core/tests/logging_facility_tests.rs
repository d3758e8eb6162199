#![allow(clippy::unwrap_used, clippy::expect_used)]

use apiassert_core::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_PATH_RESOLVED, EVENT_PATH_SKIPPED, EVENT_START,
};
use apiassert_core::errors::AssertError;
use apiassert_core::logging_facility::test_capture::init_test_capture;
use apiassert_core::{assert_structure, log_op_end, log_op_error, log_op_start, AssertionSpec};
use serde_json::json;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    assert!(
        capture.count_events(|e| e.op.as_deref() == Some(op_name)
            && e.event.as_deref() == Some(EVENT_START))
            >= 1,
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = AssertError::HandlerNotFound {
        action: "paged".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(
        error_events[0].field("err.code"),
        Some("ERR_HANDLER_NOT_FOUND")
    );
    assert_eq!(error_events[0].field("err.kind"), Some("HandlerNotFound"));
}

#[test]
fn test_path_resolution_is_traced_with_policy() {
    let capture = init_test_capture();
    // Unique path names keep this test's events apart from parallel tests.
    let spec = AssertionSpec::new(json!({"trace_a": {"id": 1}, "trace_b": {"id": 2, "ts": 0}}))
        .with_paths(["$.trace_a", "$.trace_b"])
        .include("$.trace_a", ["id"])
        .exclude("$.trace_b", ["ts"]);
    let actual = json!({"trace_a": {"id": 1}, "trace_b": {"id": 2, "ts": 99}});

    assert_structure(&actual, &spec).unwrap();

    let resolved = capture.events_named(EVENT_PATH_RESOLVED);
    let policy_of = |path: &str| {
        resolved
            .iter()
            .find(|e| e.field("path") == Some(path))
            .and_then(|e| e.field("policy").map(str::to_string))
    };
    assert_eq!(policy_of("$.trace_a").as_deref(), Some("include"));
    assert_eq!(policy_of("$.trace_b").as_deref(), Some("exclude"));
}

#[test]
fn test_blank_path_emits_skip_event() {
    let capture = init_test_capture();
    let spec = AssertionSpec::new(json!({"skip_marker": true})).with_paths(["   ", "$.skip_marker"]);

    assert_structure(&json!({"skip_marker": true}), &spec).unwrap();

    assert!(capture.count_events(|e| e.event.as_deref() == Some(EVENT_PATH_SKIPPED)) >= 1);
    assert!(capture
        .events_named(EVENT_PATH_RESOLVED)
        .iter()
        .any(|e| e.field("path") == Some("$.skip_marker")));
}

#[test]
fn test_failed_assertion_logs_end_error() {
    let capture = init_test_capture();
    let spec = AssertionSpec::new(json!({"end_error_marker": 1})).with_path("$.end_error_marker");

    let err = assert_structure(&json!({"end_error_marker": 2}), &spec).unwrap_err();
    assert!(err.is_verdict());

    let mismatch_logged = capture.count_events(|e| {
        e.op.as_deref() == Some("assert_structure")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("message")
                .is_some_and(|m| m.contains("$.end_error_marker"))
    });
    assert_eq!(mismatch_logged, 1);
}
