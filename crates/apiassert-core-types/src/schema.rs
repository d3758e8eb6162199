//! Canonical schema constants for structured logging and events
//!
//! These constants keep the comparator, the runner and the CLI emitting
//! the same field names, so captured events can be asserted on in tests.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison context
pub const FIELD_PATH: &str = "path";
pub const FIELD_POLICY: &str = "policy";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_KEYS: &str = "keys";
pub const FIELD_ORDERED: &str = "ordered";

// Case execution context
pub const FIELD_CASE: &str = "case";
pub const FIELD_CLASS_NAME: &str = "class_name";
pub const FIELD_ENTITY: &str = "entity";
pub const FIELD_ACTION: &str = "action";
pub const FIELD_STATUS: &str = "status";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_PATH_RESOLVED: &str = "path_resolved";
pub const EVENT_PATH_SKIPPED: &str = "path_skipped";
