//! Sensitive data marker for automatic redaction
//!
//! Request fixtures routinely carry credentials in headers. The
//! `Sensitive<T>` wrapper keeps those values out of logs and failure
//! reports while still handing the raw value to the HTTP client.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Header names whose values are always wrapped before logging.
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Wrapper for sensitive data that redacts itself in Debug, Display and
/// serialized output
///
/// # Example
///
/// ```
/// use apiassert_core_types::Sensitive;
///
/// let token = Sensitive::new("Bearer abc123");
/// assert_eq!(format!("{:?}", token), "***REDACTED***");
/// assert_eq!(format!("{}", token), "***REDACTED***");
///
/// // Access the actual value when needed
/// assert_eq!(token.expose(), &"Bearer abc123");
/// ```
#[derive(PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    ///
    /// Only the transport layer should need this.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Whether a header with this name must be redacted when displayed
pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name))
}

/// Render a header value for logs, redacting it when the name is sensitive
pub fn display_header_value<'a>(name: &str, value: &'a str) -> &'a str {
    if is_sensitive_header(name) {
        REDACTED
    } else {
        value
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Serialize for Sensitive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sensitive<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Sensitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_debug_redaction() {
        let secret = Sensitive::new("Bearer my-token");
        let debug_str = format!("{:?}", secret);
        assert_eq!(debug_str, REDACTED);
        assert!(!debug_str.contains("my-token"));
    }

    #[test]
    fn test_sensitive_expose() {
        let secret = Sensitive::new(42);
        assert_eq!(secret.expose(), &42);
        assert_eq!(secret.into_inner(), 42);
    }

    #[test]
    fn test_sensitive_serializes_redacted_and_deserializes_raw() {
        let secret: Sensitive<String> = serde_json::from_str("\"api-key-12345\"").unwrap();
        assert_eq!(secret.expose(), "api-key-12345");

        let out = serde_json::to_string(&secret).unwrap();
        assert_eq!(out, format!("\"{}\"", REDACTED));
    }

    #[test]
    fn test_sensitive_header_names_case_insensitive() {
        assert!(is_sensitive_header("Authorization"));
        assert!(is_sensitive_header("COOKIE"));
        assert!(!is_sensitive_header("Content-Type"));
    }

    #[test]
    fn test_display_header_value() {
        assert_eq!(display_header_value("Authorization", "Bearer x"), REDACTED);
        assert_eq!(
            display_header_value("Accept", "application/json"),
            "application/json"
        );
    }
}
