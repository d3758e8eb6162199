//! Assertion primitives
//!
//! The two leaf checks every comparison bottoms out in. Both return the
//! first failure as an error; callers propagate it with `?`, so a single
//! mismatch anywhere aborts the whole verification.

use crate::errors::{AssertError, Result};
use crate::location::Location;
use serde_json::Value;

/// Description used for leaf value comparisons.
pub const CHECK_VALUE: &str = "value equality";
/// Description used when two objects have a different number of keys.
pub const CHECK_FIELD_COUNT: &str = "field count";
/// Description used when two arrays have a different length.
pub const CHECK_ELEMENT_COUNT: &str = "element count";
/// Description used when an actual array element has no equal expected element.
pub const CHECK_ELEMENT_FOUND: &str = "expected element lookup";
/// Description used when strict key coverage finds a key missing from actual.
pub const CHECK_KEY_PRESENT: &str = "expected key present";

pub(crate) const MSG_ELEMENT_NOT_FOUND: &str = "expected element not found";
pub(crate) const MSG_KEY_MISSING: &str = "key is missing from the actual object";

const ROOT: &str = "$";

/// Fail with a mismatch when `actual != expected`
///
/// Equality is structural for arrays and objects and exact for scalars,
/// type included: `1` and `"1"` differ, as do `1` and `1.0`.
///
/// # Errors
///
/// Returns [`AssertError::Mismatch`] carrying both values.
///
/// # Example
///
/// ```
/// use apiassert_core::primitives::assert_equal;
/// use serde_json::json;
///
/// assert!(assert_equal("status", &json!("ok"), &json!("ok")).is_ok());
/// assert!(assert_equal("status", &json!(1), &json!("1")).is_err());
/// ```
pub fn assert_equal(description: &str, actual: &Value, expected: &Value) -> Result<()> {
    assert_equal_at(description, actual, expected, &Location::root(ROOT))
}

/// Fail with a condition error when `condition` is false
///
/// # Errors
///
/// Returns [`AssertError::Condition`] carrying `message`.
pub fn assert_true(description: &str, condition: bool, message: &str) -> Result<()> {
    assert_true_at(description, condition, message, &Location::root(ROOT))
}

pub(crate) fn assert_equal_at(
    description: &str,
    actual: &Value,
    expected: &Value,
    location: &Location<'_>,
) -> Result<()> {
    if actual == expected {
        return Ok(());
    }
    Err(AssertError::Mismatch {
        description: description.to_string(),
        location: location.to_string(),
        expected: expected.clone(),
        actual: actual.clone(),
    })
}

pub(crate) fn assert_true_at(
    description: &str,
    condition: bool,
    message: &str,
    location: &Location<'_>,
) -> Result<()> {
    if condition {
        return Ok(());
    }
    Err(AssertError::Condition {
        description: description.to_string(),
        location: location.to_string(),
        message: message.to_string(),
    })
}

/// Count gate shared by objects and arrays; the message is only built on failure.
pub(crate) fn assert_count_at(
    description: &str,
    actual: usize,
    expected: usize,
    location: &Location<'_>,
) -> Result<()> {
    if actual == expected {
        return Ok(());
    }
    assert_true_at(
        description,
        false,
        &format!("expected {}, actual {}", expected, actual),
        location,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_equal_passes_on_equal_values() {
        assert!(assert_equal("x", &json!({"a": [1, 2]}), &json!({"a": [1, 2]})).is_ok());
        assert!(assert_equal("x", &json!(null), &json!(null)).is_ok());
    }

    #[test]
    fn test_assert_equal_distinguishes_types() {
        let err = assert_equal("x", &json!(1), &json!("1")).unwrap_err();
        match err {
            AssertError::Mismatch {
                description,
                location,
                expected,
                actual,
            } => {
                assert_eq!(description, "x");
                assert_eq!(location, "$");
                assert_eq!(expected, json!("1"));
                assert_eq!(actual, json!(1));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(assert_equal("x", &json!(1), &json!(1.0)).is_err());
        assert!(assert_equal("x", &json!(false), &json!(0)).is_err());
    }

    #[test]
    fn test_assert_true() {
        assert!(assert_true("lookup", true, "never shown").is_ok());
        let err = assert_true("lookup", false, "element missing").unwrap_err();
        assert_eq!(
            err,
            AssertError::Condition {
                description: "lookup".to_string(),
                location: "$".to_string(),
                message: "element missing".to_string(),
            }
        );
    }

    #[test]
    fn test_assert_count_message() {
        let root = Location::root("$.list");
        let err = assert_count_at(CHECK_ELEMENT_COUNT, 2, 3, &root).unwrap_err();
        assert_eq!(
            err.to_string(),
            "element count failed at $.list: expected 3, actual 2"
        );
    }
}
