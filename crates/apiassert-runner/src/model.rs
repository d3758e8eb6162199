//! Fixture and exchange models
//!
//! Case files are JSON arrays of [`TestCase`] records using camelCase keys:
//!
//! ```json
//! [{
//!   "name": "user list",
//!   "className": "api.UserListTest",
//!   "entityList": [{
//!     "first page": {
//!       "description": "first page of users",
//!       "request": {"url": "/users?page=1", "method": "GET"},
//!       "assertion": {
//!         "responseCode": 200,
//!         "response": {"code": 0, "data": {"list": []}},
//!         "jsonPathList": ["$.code", "$.data.list"],
//!         "excludeKeyMap": {"$.data.list": ["createdAt"]}
//!       }
//!     }
//!   }]
//! }]
//! ```

use apiassert_core::policy::{KeyCoverage, KeyMap};
use apiassert_core::AssertionSpec;
use apiassert_core_types::sensitive::display_header_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Status expected when a fixture does not say otherwise.
pub const DEFAULT_RESPONSE_CODE: u16 = 200;

/// Conventional body envelope returned by the services under test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub code: i64,
    #[serde(rename = "msg", default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
    #[serde(rename = "desc", default)]
    pub description: String,
}

impl ResponseEnvelope {
    /// Read the envelope out of a response body, if it has one
    pub fn from_body(body: &Value) -> Option<Self> {
        serde_json::from_value(body.clone()).ok()
    }
}

/// HTTP request described by a fixture
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default, alias = "header")]
    pub headers: BTreeMap<String, String>,
    /// Sent verbatim when a string, serialized as JSON otherwise
    #[serde(default)]
    pub body: Option<Value>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl Request {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Whether a header is set, ignoring ASCII case
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|k| k.eq_ignore_ascii_case(name))
    }

    /// Body bytes as sent on the wire
    pub fn body_text(&self) -> Option<String> {
        match &self.body {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), display_header_value(k, v)))
            .collect();
        f.debug_struct("Request")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

/// One test case record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default)]
    pub name: String,
    pub class_name: String,
    /// Groups of labelled entities; labels inside a group run in sorted order
    #[serde(default)]
    pub entity_list: Vec<BTreeMap<String, Entity>>,
}

impl TestCase {
    /// Entities in fixture order, with their labels
    pub fn entities(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.entity_list
            .iter()
            .flat_map(|group| group.iter().map(|(label, e)| (label.as_str(), e)))
    }
}

/// A request paired with the assertion its response must satisfy
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub description: String,
    pub request: Request,
    pub assertion: AssertionFixture,
}

/// Assertion block of an entity
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionFixture {
    #[serde(default = "default_response_code")]
    pub response_code: u16,
    #[serde(default)]
    pub response: Value,
    #[serde(default)]
    pub json_path_list: Vec<String>,
    #[serde(default)]
    pub include_key_map: Option<KeyMap>,
    #[serde(default)]
    pub exclude_key_map: Option<KeyMap>,
    #[serde(default)]
    pub sort: bool,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub key_coverage: KeyCoverage,
}

fn default_response_code() -> u16 {
    DEFAULT_RESPONSE_CODE
}

impl AssertionFixture {
    /// Custom handler to run instead of structural comparison
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }

    /// Build the assertion parameters for the response body
    pub fn to_spec(&self) -> AssertionSpec {
        let mut spec = AssertionSpec::new(self.response.clone())
            .with_paths(self.json_path_list.iter().cloned())
            .ordered(self.sort)
            .with_key_coverage(self.key_coverage);
        if let Some(map) = &self.include_key_map {
            spec = spec.with_include_map(map.clone());
        }
        if let Some(map) = &self.exclude_key_map {
            spec = spec.with_exclude_map(map.clone());
        }
        spec
    }
}
