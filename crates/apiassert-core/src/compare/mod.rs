//! Structural comparator
//!
//! Recursively walks an actual and an expected document under one field
//! policy and one ordering mode:
//!
//! - objects go to the full, include-scoped or exclude-scoped walk
//!   depending on the policy
//! - arrays are length-gated, then compared by position (ordered) or by
//!   first-equal lookup (unordered)
//! - anything else, including two nodes of different kinds, is a leaf
//!   equality check
//!
//! The first failure is returned immediately.

mod exclude;
mod full;
mod include;
mod matcher;

use crate::errors::Result;
use crate::location::Location;
use crate::policy::{FieldPolicy, KeyCoverage};
use crate::primitives::{assert_count_at, assert_equal_at, CHECK_ELEMENT_COUNT, CHECK_VALUE};
use serde_json::Value;

/// Stand-in for a member that does not exist on one side.
static ABSENT: Value = Value::Null;

/// Recursive comparator for one policy and ordering mode
///
/// # Example
///
/// ```
/// use apiassert_core::compare::Comparator;
/// use apiassert_core::policy::FieldPolicy;
/// use serde_json::json;
///
/// let unordered = Comparator::new(FieldPolicy::All);
/// assert!(unordered.compare(&json!([1, 2]), &json!([2, 1])).is_ok());
/// assert!(unordered.ordered(true).compare(&json!([1, 2]), &json!([2, 1])).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator<'p> {
    policy: FieldPolicy<'p>,
    ordered: bool,
    coverage: KeyCoverage,
}

impl<'p> Comparator<'p> {
    pub fn new(policy: FieldPolicy<'p>) -> Self {
        Self {
            policy,
            ordered: false,
            coverage: KeyCoverage::default(),
        }
    }

    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    pub fn with_key_coverage(mut self, coverage: KeyCoverage) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn policy(&self) -> FieldPolicy<'p> {
        self.policy
    }

    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Compare two documents from their roots
    ///
    /// # Errors
    ///
    /// Returns the first [`Mismatch`](crate::errors::AssertError::Mismatch)
    /// or [`Condition`](crate::errors::AssertError::Condition) found.
    pub fn compare(&self, actual: &Value, expected: &Value) -> Result<()> {
        self.compare_at(Some(actual), Some(expected), &Location::root("$"))
    }

    /// Compare two possibly-absent nodes; absence reads as `null`.
    pub(crate) fn compare_at(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
        location: &Location<'_>,
    ) -> Result<()> {
        tracing::trace!(
            location = %location,
            policy = %self.policy.mode(),
            "visit"
        );
        match (actual, expected) {
            (Some(Value::Object(a)), Some(Value::Object(e))) => match self.policy {
                FieldPolicy::All => self.compare_objects(a, e, location),
                FieldPolicy::Include(keys) => self.compare_included(a, e, keys, location),
                FieldPolicy::Exclude(keys) => self.compare_excluded(a, e, keys, location),
            },
            (Some(Value::Array(a)), Some(Value::Array(e))) => self.compare_arrays(a, e, location),
            _ => assert_equal_at(
                CHECK_VALUE,
                actual.unwrap_or(&ABSENT),
                expected.unwrap_or(&ABSENT),
                location,
            ),
        }
    }

    fn compare_arrays(
        &self,
        actual: &[Value],
        expected: &[Value],
        location: &Location<'_>,
    ) -> Result<()> {
        assert_count_at(CHECK_ELEMENT_COUNT, actual.len(), expected.len(), location)?;

        if self.ordered {
            for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
                self.compare_at(Some(a), Some(e), &location.index(i))?;
            }
            return Ok(());
        }

        match self.policy {
            FieldPolicy::Exclude(keys) if !keys.is_empty() => {
                self.match_masked(actual, expected, keys, location)
            }
            _ => self.match_unordered(actual, expected, location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AssertError;
    use crate::policy::KeySet;
    use crate::primitives::{CHECK_ELEMENT_FOUND, CHECK_FIELD_COUNT};
    use serde_json::json;

    fn keys(names: &[&str]) -> KeySet {
        names.iter().map(|k| k.to_string()).collect()
    }

    fn condition_description(err: &AssertError) -> &str {
        match err {
            AssertError::Condition { description, .. } => description,
            other => panic!("expected a condition failure, got {:?}", other),
        }
    }

    #[test]
    fn test_scalars_compare_by_value_and_type() {
        let cmp = Comparator::default();
        assert!(cmp.compare(&json!("a"), &json!("a")).is_ok());
        assert!(cmp.compare(&json!(1), &json!(2)).is_err());
        assert!(cmp.compare(&json!(1), &json!("1")).is_err());
        assert!(cmp.compare(&json!(null), &json!(null)).is_ok());
    }

    #[test]
    fn test_mismatched_kinds_are_value_mismatch() {
        let err = Comparator::default()
            .compare(&json!({"a": 1}), &json!([1]))
            .unwrap_err();
        assert!(matches!(err, AssertError::Mismatch { .. }));
    }

    #[test]
    fn test_length_gate_in_both_modes() {
        for ordered in [true, false] {
            let err = Comparator::default()
                .ordered(ordered)
                .compare(&json!([1, 2]), &json!([1, 2, 3]))
                .unwrap_err();
            assert_eq!(condition_description(&err), CHECK_ELEMENT_COUNT);
        }
    }

    #[test]
    fn test_ordered_mismatch_reports_index() {
        let err = Comparator::default()
            .ordered(true)
            .compare(&json!([1, 2]), &json!([2, 1]))
            .unwrap_err();
        assert_eq!(err.location(), Some("$[0]"));
    }

    #[test]
    fn test_unordered_missing_element() {
        let err = Comparator::default()
            .compare(&json!([1, 4]), &json!([2, 1]))
            .unwrap_err();
        assert_eq!(condition_description(&err), CHECK_ELEMENT_FOUND);
        assert_eq!(err.location(), Some("$[1]"));
    }

    #[test]
    fn test_full_walk_ignores_keys_only_in_expected() {
        let cmp = Comparator::default();
        assert!(cmp.compare(&json!({"a": 1}), &json!({"a": 1, "b": 2})).is_ok());

        let strict = cmp.with_key_coverage(KeyCoverage::Both);
        let err = strict
            .compare(&json!({"a": 1}), &json!({"a": 1, "b": 2}))
            .unwrap_err();
        assert_eq!(err.location(), Some("$.b"));
    }

    #[test]
    fn test_full_walk_flags_keys_only_in_actual() {
        let err = Comparator::default()
            .compare(&json!({"a": 1, "extra": true}), &json!({"a": 1}))
            .unwrap_err();
        assert_eq!(err.location(), Some("$.extra"));
    }

    #[test]
    fn test_absent_equals_explicit_null() {
        assert!(Comparator::default()
            .compare(&json!({"a": null}), &json!({}))
            .is_ok());
    }

    #[test]
    fn test_include_checks_only_named_keys_after_count_gate() {
        let include = keys(&["a"]);
        let cmp = Comparator::new(FieldPolicy::Include(&include));
        assert!(cmp
            .compare(&json!({"a": 1, "b": 2}), &json!({"a": 1, "b": 99}))
            .is_ok());

        let err = cmp
            .compare(&json!({"a": 1, "b": 2}), &json!({"a": 1}))
            .unwrap_err();
        assert_eq!(condition_description(&err), CHECK_FIELD_COUNT);
    }

    #[test]
    fn test_include_set_reused_at_nested_levels() {
        let include = keys(&["a", "inner"]);
        let cmp = Comparator::new(FieldPolicy::Include(&include));
        let actual = json!({"a": 1, "inner": {"a": 2, "z": 0}});
        let expected = json!({"a": 1, "inner": {"a": 2, "z": 5}});
        assert!(cmp.compare(&actual, &expected).is_ok());
    }

    #[test]
    fn test_exclude_iterates_expected_keys() {
        let exclude = keys(&["ts"]);
        let cmp = Comparator::new(FieldPolicy::Exclude(&exclude));
        assert!(cmp
            .compare(&json!({"id": 1, "ts": 5}), &json!({"id": 1, "ts": 9}))
            .is_ok());

        let err = cmp
            .compare(&json!({"id": 1, "ts": 5}), &json!({"id": 2, "ts": 9}))
            .unwrap_err();
        assert_eq!(err.location(), Some("$.id"));
    }

    #[test]
    fn test_exclude_count_gate_counts_excluded_keys() {
        let exclude = keys(&["ts"]);
        let cmp = Comparator::new(FieldPolicy::Exclude(&exclude));
        let err = cmp
            .compare(&json!({"id": 1}), &json!({"id": 1, "ts": 9}))
            .unwrap_err();
        assert_eq!(condition_description(&err), CHECK_FIELD_COUNT);
    }

    #[test]
    fn test_exclude_masks_before_unordered_lookup() {
        let exclude = keys(&["b"]);
        let cmp = Comparator::new(FieldPolicy::Exclude(&exclude));
        let actual = json!([{"a": 1, "b": 5}]);
        let expected = json!([{"a": 1, "b": 9}]);
        assert!(cmp.compare(&actual, &expected).is_ok());

        // Caller documents are untouched.
        assert_eq!(actual, json!([{"a": 1, "b": 5}]));
        assert_eq!(expected, json!([{"a": 1, "b": 9}]));
    }

    #[test]
    fn test_include_does_not_mask_before_lookup() {
        let include = keys(&["a"]);
        let cmp = Comparator::new(FieldPolicy::Include(&include));
        let err = cmp
            .compare(&json!([{"a": 1, "b": 5}]), &json!([{"a": 1, "b": 9}]))
            .unwrap_err();
        assert_eq!(condition_description(&err), CHECK_ELEMENT_FOUND);
    }

    #[test]
    fn test_unordered_matching_is_not_one_to_one() {
        assert!(Comparator::default()
            .compare(&json!([1, 1]), &json!([1, 2]))
            .is_ok());
    }

    #[test]
    fn test_fail_fast_reports_first_mismatch_only() {
        let err = Comparator::default()
            .ordered(true)
            .compare(
                &json!({"a": [1, {"x": "bad"}], "b": "also bad"}),
                &json!({"a": [1, {"x": "good"}], "b": "fine"}),
            )
            .unwrap_err();
        assert_eq!(err.location(), Some("$.a[1].x"));
    }
}
