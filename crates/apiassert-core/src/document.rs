//! Document model
//!
//! Documents are `serde_json::Value` trees; object members keep the order
//! they were parsed in. This module adds the few helpers the comparator
//! needs on top: node kinds for messages, parsing, and the masking helper
//! used before unordered matching under an exclude policy.

use crate::errors::Result;
use crate::path::JsonPath;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// A parsed JSON-like tree.
pub type Document = Value;

/// Placeholder written over excluded fields before unordered matching.
pub const EXCLUDE_SENTINEL: &str = "EXCLUDE_KEY";

/// Kind of a document node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
        }
    }

    /// Whether nodes of this kind are leaves of the tree
    pub fn is_scalar(&self) -> bool {
        !matches!(self, NodeKind::Array | NodeKind::Object)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "boolean",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Parse a document from JSON text
///
/// # Errors
///
/// Returns [`AssertError::Serialization`](crate::errors::AssertError::Serialization)
/// when the text is not valid JSON.
pub fn parse_document(text: &str) -> Result<Document> {
    Ok(serde_json::from_str(text)?)
}

/// Copy `elements`, overwriting each excluded key with [`EXCLUDE_SENTINEL`]
///
/// Keys are paths relative to each element (`b`, `meta.ts`). A missing
/// final key is inserted so both sides of a comparison end up with the same
/// placeholder. The input slice is never modified.
pub fn masked_copy(elements: &[Value], excluded: &BTreeSet<String>) -> Vec<Value> {
    let sentinel = Value::String(EXCLUDE_SENTINEL.to_string());
    let paths: Vec<JsonPath> = excluded.iter().map(|k| JsonPath::for_key(k)).collect();

    elements
        .iter()
        .map(|element| {
            let mut copy = element.clone();
            for path in &paths {
                path.assign(&mut copy, &sentinel);
            }
            copy
        })
        .collect()
}
