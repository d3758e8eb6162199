//! Path expressions over documents
//!
//! A small JSONPath dialect used by fixtures to point at the parts of a
//! response that should be compared independently.
//!
//! | Form | Meaning |
//! |------|---------|
//! | `$` | root (optional: `data.items` is `$.data.items`) |
//! | `.name`, `['name']` | child key |
//! | `[2]`, `[-1]` | array index, negative counts from the end |
//! | `[1:3]`, `[:2]`, `[-2:]` | array slice |
//! | `.*`, `[*]` | every object value / array element |
//! | `..name` | key `name` anywhere below the current node |
//! | `[type='a']`, `[n=3]`, `[n!=3]` | array elements whose field matches |
//!
//! Resolution never fails on a missing location: it yields `None` (single
//! selection) or an empty array (multi selection).
//!
//! ```
//! use apiassert_core::path::JsonPath;
//! use serde_json::json;
//!
//! let doc = json!({"data": {"items": [{"id": 1}, {"id": 2}]}});
//! let path: JsonPath = "$.data.items[*].id".parse().unwrap();
//! assert_eq!(path.resolve(&doc).unwrap().as_ref(), &json!([1, 2]));
//! ```

mod eval;
mod parser;

use crate::errors::{AssertError, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Comparison used by a filter segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
}

/// One step of a parsed path
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Object member by key
    Child(String),
    /// Array element by position
    Index(i64),
    /// Array range `[start:end)`
    Slice { start: Option<i64>, end: Option<i64> },
    /// All members of an object or all elements of an array
    Wildcard,
    /// Key at any depth below the current node
    Descendant(String),
    /// Array elements whose `field` compares to `value`
    Filter {
        field: String,
        op: FilterOp,
        value: Value,
    },
}

impl Segment {
    /// Whether this step can select more than one node
    pub fn is_multi(&self) -> bool {
        !matches!(self, Segment::Child(_) | Segment::Index(_))
    }
}

/// A parsed path expression
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    source: String,
    segments: Vec<Segment>,
}

impl JsonPath {
    /// Parse a path expression
    ///
    /// # Errors
    ///
    /// Returns [`AssertError::InvalidPath`] when the expression is malformed.
    pub fn parse(source: &str) -> Result<Self> {
        let segments = parser::parse_segments(source).map_err(|reason| {
            AssertError::InvalidPath {
                path: source.to_string(),
                reason,
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Path for a key relative to some element, as used by exclude masking
    ///
    /// `meta.ts` addresses a nested key; anything that does not parse as a
    /// path is taken as one literal key.
    pub fn for_key(key: &str) -> Self {
        let relative = format!("$.{}", key);
        Self::parse(&relative).unwrap_or_else(|_| Self {
            source: relative,
            segments: vec![Segment::Child(key.to_string())],
        })
    }

    /// The expression as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the path selects at most one node
    pub fn is_definite(&self) -> bool {
        !self.segments.iter().any(Segment::is_multi)
    }

    /// Evaluate against a document
    ///
    /// A definite path borrows the selected node, or returns `None` when it
    /// does not exist. Any other path returns an owned array of every match
    /// in document order.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<Cow<'a, Value>> {
        let nodes = eval::select(root, &self.segments);
        if self.is_definite() {
            nodes.into_iter().next().map(Cow::Borrowed)
        } else {
            Some(Cow::Owned(Value::Array(
                nodes.into_iter().cloned().collect(),
            )))
        }
    }

    /// Every node the path selects, in document order
    pub fn select<'a>(&self, root: &'a Value) -> Vec<&'a Value> {
        eval::select(root, &self.segments)
    }

    /// Overwrite every location the path selects with `value`
    ///
    /// A final key segment on an object inserts the key when it is absent.
    /// Descendant segments are not assignable and select nothing here.
    /// Returns the number of locations written.
    pub fn assign(&self, root: &mut Value, value: &Value) -> usize {
        eval::assign(root, &self.segments, value)
    }
}

impl FromStr for JsonPath {
    type Err = AssertError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parse `path` and resolve it against `root`
///
/// # Errors
///
/// Returns [`AssertError::InvalidPath`] when the expression is malformed.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Result<Option<Cow<'a, Value>>> {
    Ok(JsonPath::parse(path)?.resolve(root))
}
