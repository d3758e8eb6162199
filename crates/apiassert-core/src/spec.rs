//! Assertion parameters
//!
//! Everything one verification call needs besides the actual document:
//! the expected document, the paths to check, per-path key policies and the
//! array ordering mode. Built once per test case and read-only afterwards.

use crate::compare::Comparator;
use crate::policy::{FieldPolicy, KeyCoverage, KeyMap};
use serde_json::Value;

/// Aggregate input to [`assert_structure`](crate::structure::assert_structure)
///
/// # Example
///
/// ```
/// use apiassert_core::AssertionSpec;
/// use serde_json::json;
///
/// let spec = AssertionSpec::new(json!({"data": {"id": 1, "ts": 0}}))
///     .with_path("$.data")
///     .exclude("$.data", ["ts"])
///     .ordered(true);
/// assert_eq!(spec.paths(), ["$.data"]);
/// assert!(spec.is_ordered());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssertionSpec {
    expected: Value,
    paths: Vec<String>,
    ordered: bool,
    include_keys: Option<KeyMap>,
    exclude_keys: Option<KeyMap>,
    key_coverage: KeyCoverage,
}

impl AssertionSpec {
    /// Whole-document, unordered comparison against `expected`
    pub fn new(expected: Value) -> Self {
        Self {
            expected,
            ..Self::default()
        }
    }

    /// Add a path expression; duplicates are ignored
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
        self
    }

    pub fn with_paths<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths.into_iter().fold(self, |spec, p| spec.with_path(p))
    }

    /// Require arrays to match element by element
    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    /// Compare only `keys` below `path`
    pub fn include<I, S>(mut self, path: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_keys
            .get_or_insert_with(KeyMap::new)
            .entry(path.into())
            .or_default()
            .extend(keys.into_iter().map(Into::into));
        self
    }

    /// Skip `keys` below `path`
    pub fn exclude<I, S>(mut self, path: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_keys
            .get_or_insert_with(KeyMap::new)
            .entry(path.into())
            .or_default()
            .extend(keys.into_iter().map(Into::into));
        self
    }

    /// Replace the include map wholesale
    pub fn with_include_map(mut self, map: KeyMap) -> Self {
        self.include_keys = Some(map);
        self
    }

    /// Replace the exclude map wholesale
    ///
    /// Supplying a map, even an empty one, switches every path without an
    /// include set to exclude-based comparison.
    pub fn with_exclude_map(mut self, map: KeyMap) -> Self {
        self.exclude_keys = Some(map);
        self
    }

    pub fn with_key_coverage(mut self, coverage: KeyCoverage) -> Self {
        self.key_coverage = coverage;
        self
    }

    pub fn expected(&self) -> &Value {
        &self.expected
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    pub fn include_map(&self) -> Option<&KeyMap> {
        self.include_keys.as_ref()
    }

    pub fn exclude_map(&self) -> Option<&KeyMap> {
        self.exclude_keys.as_ref()
    }

    pub fn key_coverage(&self) -> KeyCoverage {
        self.key_coverage
    }

    /// Field policy that applies to `path`
    pub fn policy_for(&self, path: &str) -> FieldPolicy<'_> {
        FieldPolicy::resolve(path, self.include_map(), self.exclude_map())
    }

    /// Comparator configured for `path`
    pub fn comparator_for(&self, path: &str) -> Comparator<'_> {
        Comparator::new(self.policy_for(path))
            .ordered(self.ordered)
            .with_key_coverage(self.key_coverage)
    }
}
