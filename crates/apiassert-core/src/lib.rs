//! apiassert core - structural assertion engine for JSON API responses
//!
//! This crate provides:
//! - A small path dialect for picking sub-documents out of a response
//! - Field policies (all keys, include-only, exclude) chosen per path
//! - A recursive comparator with ordered and unordered array matching
//! - Assertion primitives with stable failure descriptions
//! - A registry of custom assertion handlers keyed by action name
//! - The error and logging facilities shared by the runner and the CLI
//!
//! Comparison is synchronous and fail-fast: the first mismatch is returned
//! and nothing after it is checked.

pub mod compare;
pub mod document;
pub mod errors;
pub mod handler;
pub(crate) mod location;
pub mod logging_facility;
pub mod path;
pub mod policy;
pub mod primitives;
pub mod spec;
pub mod structure;

pub use apiassert_core_types as core_types;

// Re-export commonly used types
pub use compare::Comparator;
pub use document::Document;
pub use errors::{AssertError, ExError, ExErrorKind, Result};
pub use handler::{AssertionHandler, HandlerRegistry};
pub use path::JsonPath;
pub use policy::{FieldPolicy, KeyCoverage, KeyMap, KeySet};
pub use primitives::{assert_equal, assert_true};
pub use spec::AssertionSpec;
pub use structure::assert_structure;
