use apiassert_core::errors::{AssertError, ExError, ExErrorKind};
use apiassert_core::{assert_structure, AssertionSpec, HandlerRegistry};
use serde_json::json;

#[test]
fn test_field_count_failure_verifiable_by_kind() {
    let spec = AssertionSpec::new(json!({"a": 1, "b": 2}))
        .with_path("$")
        .include("$", ["a"]);

    let err = assert_structure(&json!({"a": 1}), &spec).unwrap_err();
    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Condition);
    assert_eq!(ex_err.code(), "ERR_CONDITION");
    assert_eq!(ex_err.location(), Some("$"));
    assert!(ex_err.message().contains("field count"));
}

#[test]
fn test_value_mismatch_distinct_from_condition() {
    let spec = AssertionSpec::new(json!({"a": 1}));

    let ex_err: ExError = assert_structure(&json!({"a": "1"}), &spec)
        .unwrap_err()
        .into();

    assert_eq!(ex_err.kind(), ExErrorKind::Mismatch);
    assert_ne!(ex_err.kind(), ExErrorKind::Condition);
    assert_eq!(ex_err.location(), Some("$.a"));
}

#[test]
fn test_invalid_path_structured_fields() {
    let spec = AssertionSpec::new(json!({})).with_path("$.list[1");

    let ex_err: ExError = assert_structure(&json!({}), &spec).unwrap_err().into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidPath);
    assert_eq!(ex_err.code(), "ERR_INVALID_PATH");
    assert_eq!(ex_err.path(), Some("$.list[1"));
    assert_eq!(ex_err.op(), Some("parse_path"));
}

#[test]
fn test_handler_not_found_structured_fields() {
    let registry = HandlerRegistry::new();

    let err = registry
        .dispatch("paged", &json!({}), &AssertionSpec::default())
        .unwrap_err();
    assert!(!err.is_verdict());

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::HandlerNotFound);
    assert_eq!(ex_err.op(), Some("dispatch_action"));
    assert!(ex_err.message().contains("paged"));
}

#[test]
fn test_error_kind_code_mapping() {
    // Each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::Mismatch, "ERR_MISMATCH"),
        (ExErrorKind::Condition, "ERR_CONDITION"),
        (ExErrorKind::InvalidPath, "ERR_INVALID_PATH"),
        (ExErrorKind::Resolution, "ERR_RESOLUTION"),
        (ExErrorKind::HandlerNotFound, "ERR_HANDLER_NOT_FOUND"),
        (ExErrorKind::Config, "ERR_CONFIG"),
        (ExErrorKind::Dispatch, "ERR_DISPATCH"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_serde_error_converts_to_serialization() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
    let err: AssertError = parse_err.into();

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
    assert!(!ex_err.kind().is_verdict());
}
