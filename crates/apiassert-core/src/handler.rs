//! Custom assertion handlers.
//!
//! A fixture may name an action instead of relying on structural
//! comparison. Suites register one handler per action name before running.

use crate::errors::{AssertError, Result};
use crate::spec::AssertionSpec;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Check an actual response body against a fixture's expectations.
pub trait AssertionHandler: Send + Sync {
    /// Run the check.
    ///
    /// # Errors
    ///
    /// Returns a verdict error when the response does not satisfy the
    /// handler, or any other [`AssertError`] the handler raises.
    fn check(&self, actual: &Value, spec: &AssertionSpec) -> Result<()>;
}

impl<F> AssertionHandler for F
where
    F: Fn(&Value, &AssertionSpec) -> Result<()> + Send + Sync,
{
    fn check(&self, actual: &Value, spec: &AssertionSpec) -> Result<()> {
        self(actual, spec)
    }
}

/// Action name to handler lookup
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn AssertionHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `action`, replacing any previous one
    pub fn register(&mut self, action: impl Into<String>, handler: impl AssertionHandler + 'static) {
        self.handlers.insert(action.into(), Box::new(handler));
    }

    pub fn get(&self, action: &str) -> Option<&dyn AssertionHandler> {
        self.handlers.get(action).map(|h| h.as_ref())
    }

    pub fn contains(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    /// Registered action names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler registered for `action`
    ///
    /// # Errors
    ///
    /// Returns [`AssertError::HandlerNotFound`] for an unknown action, or
    /// whatever the handler returns.
    pub fn dispatch(&self, action: &str, actual: &Value, spec: &AssertionSpec) -> Result<()> {
        let handler = self
            .get(action)
            .ok_or_else(|| AssertError::HandlerNotFound {
                action: action.to_string(),
            })?;
        tracing::debug!(action, "dispatching to custom handler");
        handler.check(actual, spec)
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("actions", &self.names())
            .finish()
    }
}
