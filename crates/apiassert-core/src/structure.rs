//! Path-aware structural assertion
//!
//! Entry point of the engine. Every path expression of an
//! [`AssertionSpec`] is resolved against both documents up front, so a
//! malformed expression fails the call before any comparison runs. The
//! resolved pairs are then compared one after another, each with the field
//! policy registered for its path.

use crate::compare::Comparator;
use crate::core_types::schema::{EVENT_PATH_RESOLVED, EVENT_PATH_SKIPPED};
use crate::errors::Result;
use crate::location::Location;
use crate::path::JsonPath;
use crate::spec::AssertionSpec;
use crate::{log_op_end, log_op_error, log_op_start};
use serde_json::Value;
use std::borrow::Cow;

/// Label used for the whole document when no paths are given.
pub const ROOT_PATH: &str = "$";

/// One path expression evaluated against both documents
#[derive(Debug)]
struct ResolvedPair<'a> {
    path: &'a str,
    actual: Option<Cow<'a, Value>>,
    expected: Option<Cow<'a, Value>>,
    comparator: Comparator<'a>,
}

impl ResolvedPair<'_> {
    fn compare(&self) -> Result<()> {
        self.comparator.compare_at(
            self.actual.as_deref(),
            self.expected.as_deref(),
            &Location::root(self.path),
        )
    }
}

/// Assert that `actual` matches the expected document of `spec`
///
/// With no paths the two roots are compared under the policy registered for
/// `"$"`. Otherwise each path is resolved independently on both sides; a
/// path found on neither side passes, a path found on one side only is
/// compared against `null`. Blank paths are skipped.
///
/// # Errors
///
/// - [`AssertError::InvalidPath`](crate::errors::AssertError::InvalidPath)
///   if any path expression is malformed
/// - the first [`Mismatch`](crate::errors::AssertError::Mismatch) or
///   [`Condition`](crate::errors::AssertError::Condition) failure
///
/// # Example
///
/// ```
/// use apiassert_core::{assert_structure, AssertionSpec};
/// use serde_json::json;
///
/// let actual = json!({"code": 0, "data": {"id": 7, "ts": 1700000000}});
/// let spec = AssertionSpec::new(json!({"code": 0, "data": {"id": 7, "ts": 0}}))
///     .with_path("$.data")
///     .exclude("$.data", ["ts"]);
/// assert!(assert_structure(&actual, &spec).is_ok());
/// ```
pub fn assert_structure(actual: &Value, spec: &AssertionSpec) -> Result<()> {
    log_op_start!(
        "assert_structure",
        paths = spec.paths().len(),
        ordered = spec.is_ordered()
    );
    let start = std::time::Instant::now();

    let result = resolve_pairs(actual, spec)
        .and_then(|pairs| pairs.iter().try_for_each(ResolvedPair::compare))
        .map_err(|e| {
            log_op_error!(
                "assert_structure",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        });

    if result.is_ok() {
        log_op_end!(
            "assert_structure",
            duration_ms = start.elapsed().as_millis() as u64
        );
    }
    result
}

fn resolve_pairs<'a>(actual: &'a Value, spec: &'a AssertionSpec) -> Result<Vec<ResolvedPair<'a>>> {
    if spec.paths().is_empty() {
        let pair = ResolvedPair {
            path: ROOT_PATH,
            actual: Some(Cow::Borrowed(actual)),
            expected: Some(Cow::Borrowed(spec.expected())),
            comparator: spec.comparator_for(ROOT_PATH),
        };
        trace_resolved(&pair);
        return Ok(vec![pair]);
    }

    let mut pairs = Vec::with_capacity(spec.paths().len());
    for path in spec.paths() {
        if path.trim().is_empty() {
            tracing::debug!(event = EVENT_PATH_SKIPPED, path = %path, "blank path skipped");
            continue;
        }
        let parsed = JsonPath::parse(path)?;
        let pair = ResolvedPair {
            path,
            actual: parsed.resolve(actual),
            expected: parsed.resolve(spec.expected()),
            comparator: spec.comparator_for(path),
        };
        trace_resolved(&pair);
        pairs.push(pair);
    }
    Ok(pairs)
}

fn trace_resolved(pair: &ResolvedPair<'_>) {
    let policy = pair.comparator.policy();
    tracing::debug!(
        event = EVENT_PATH_RESOLVED,
        path = pair.path,
        policy = %policy.mode(),
        keys = ?policy.keys(),
        actual_found = pair.actual.is_some(),
        expected_found = pair.expected.is_some(),
    );
}
