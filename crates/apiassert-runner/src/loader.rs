//! Test-case loader
//!
//! Reads a case file and picks the record for the running class. Records
//! for other classes are not deserialized, so one malformed record does
//! not break unrelated suites sharing the file.

use crate::model::TestCase;
use apiassert_core::{AssertError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

const CLASS_NAME_KEY: &str = "className";

/// Load the case record for `class_name` from a file
///
/// # Errors
///
/// Returns [`AssertError::Resolution`] if the file cannot be read, is not a
/// JSON array of records, or holds no record for `class_name`.
pub fn load_case(path: &Path, class_name: &str) -> Result<TestCase> {
    let origin = path.display().to_string();
    tracing::info!(path = %origin, class_name, "loading test case");

    let content = fs::read_to_string(path).map_err(|e| AssertError::Resolution {
        origin: origin.clone(),
        reason: format!("failed to read case file: {}", e),
    })?;

    load_case_str(&content, class_name, &origin)
}

/// Load the case record for `class_name` from JSON text
///
/// `origin` names the source in error messages. When several records match,
/// the last one wins.
///
/// # Errors
///
/// Returns [`AssertError::Resolution`] as [`load_case`] does.
pub fn load_case_str(content: &str, class_name: &str, origin: &str) -> Result<TestCase> {
    let resolution = |reason: String| AssertError::Resolution {
        origin: origin.to_string(),
        reason,
    };

    let records: Vec<Value> =
        serde_json::from_str(content).map_err(|e| resolution(format!("malformed case file: {}", e)))?;

    let matches: Vec<Value> = records
        .into_iter()
        .filter(|record| record.get(CLASS_NAME_KEY).and_then(Value::as_str) == Some(class_name))
        .collect();

    if matches.len() > 1 {
        tracing::warn!(
            class_name,
            count = matches.len(),
            "several test cases share this class name, using the last one"
        );
    }

    let record = matches
        .into_iter()
        .last()
        .ok_or_else(|| resolution(format!("no test case with className `{}`", class_name)))?;

    serde_json::from_value(record)
        .map_err(|e| resolution(format!("malformed test case for `{}`: {}", class_name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CASES: &str = r#"[
        {"name": "first", "className": "api.UserTest", "entityList": []},
        {"name": "other", "className": "api.OrderTest"},
        {"name": "second", "className": "api.UserTest", "entityList": []},
        {"className": "api.BrokenTest", "entityList": "not a list"}
    ]"#;

    #[test]
    fn test_last_matching_record_wins() {
        let case = load_case_str(CASES, "api.UserTest", "inline").unwrap();
        assert_eq!(case.name, "second");
    }

    #[test]
    fn test_unrelated_malformed_record_is_ignored() {
        let case = load_case_str(CASES, "api.OrderTest", "inline").unwrap();
        assert_eq!(case.name, "other");
        assert!(case.entity_list.is_empty());
    }

    #[test]
    fn test_malformed_matching_record_is_resolution_error() {
        let err = load_case_str(CASES, "api.BrokenTest", "inline").unwrap_err();
        assert!(matches!(err, AssertError::Resolution { .. }));
    }

    #[test]
    fn test_no_match_is_resolution_error() {
        let err = load_case_str(CASES, "api.MissingTest", "cases.json").unwrap_err();
        match err {
            AssertError::Resolution { origin, reason } => {
                assert_eq!(origin, "cases.json");
                assert!(reason.contains("api.MissingTest"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_array_file_is_resolution_error() {
        let err = load_case_str(r#"{"className": "x"}"#, "x", "inline").unwrap_err();
        assert!(matches!(err, AssertError::Resolution { .. }));
    }

    #[test]
    fn test_load_case_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CASES.as_bytes()).unwrap();

        let case = load_case(file.path(), "api.OrderTest").unwrap();
        assert_eq!(case.class_name, "api.OrderTest");
    }

    #[test]
    fn test_missing_file_is_resolution_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_case(&dir.path().join("nope.json"), "x").unwrap_err();
        assert!(matches!(err, AssertError::Resolution { .. }));
    }
}
