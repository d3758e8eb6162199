//! Field policies
//!
//! A policy decides which object keys take part in a comparison. It is
//! chosen once per path expression and then threaded unchanged through the
//! whole recursive walk below that path, so the same flat key set applies
//! at every nesting level.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Set of object keys named by a policy.
pub type KeySet = BTreeSet<String>;

/// Key sets registered per path expression.
pub type KeyMap = BTreeMap<String, KeySet>;

static NO_KEYS: KeySet = BTreeSet::new();

/// Mode of a field policy, without its keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyMode {
    All,
    Include,
    Exclude,
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PolicyMode::All => "all",
            PolicyMode::Include => "include",
            PolicyMode::Exclude => "exclude",
        })
    }
}

/// Which object keys participate in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPolicy<'k> {
    /// Every key of the actual object is compared
    #[default]
    All,
    /// Only these keys are compared, after a field-count check
    Include(&'k KeySet),
    /// Every key of the expected object except these, after a field-count check
    Exclude(&'k KeySet),
}

impl<'k> FieldPolicy<'k> {
    /// Choose the policy for `path`
    ///
    /// Resolution order:
    /// 1. a non-empty include set registered for `path`
    /// 2. any exclude map at all, using the keys for `path` or none
    /// 3. every key
    pub fn resolve(path: &str, include: Option<&'k KeyMap>, exclude: Option<&'k KeyMap>) -> Self {
        if let Some(keys) = include
            .and_then(|map| map.get(path))
            .filter(|keys| !keys.is_empty())
        {
            return FieldPolicy::Include(keys);
        }
        match exclude {
            Some(map) => FieldPolicy::Exclude(map.get(path).unwrap_or(&NO_KEYS)),
            None => FieldPolicy::All,
        }
    }

    pub fn mode(&self) -> PolicyMode {
        match self {
            FieldPolicy::All => PolicyMode::All,
            FieldPolicy::Include(_) => PolicyMode::Include,
            FieldPolicy::Exclude(_) => PolicyMode::Exclude,
        }
    }

    /// Keys named by the policy; `None` for [`FieldPolicy::All`]
    pub fn keys(&self) -> Option<&'k KeySet> {
        match *self {
            FieldPolicy::All => None,
            FieldPolicy::Include(keys) | FieldPolicy::Exclude(keys) => Some(keys),
        }
    }
}

/// Which keys the full comparator walks when comparing two objects
///
/// The default walks the actual object only, so a key present in the
/// expected fixture but missing from the response goes unnoticed.
/// `Both` additionally requires every expected key to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCoverage {
    #[default]
    Actual,
    Both,
}
