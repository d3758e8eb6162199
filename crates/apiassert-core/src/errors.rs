use serde_json::Value;
use thiserror::Error;

/// Result type alias using AssertError
pub type Result<T> = std::result::Result<T, AssertError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that runners, the CLI and tests
/// can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Verdicts
    Mismatch,
    Condition,

    // Inputs
    InvalidPath,
    Resolution,
    HandlerNotFound,
    Config,

    // Infrastructure
    Dispatch,
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Mismatch => "ERR_MISMATCH",
            ExErrorKind::Condition => "ERR_CONDITION",
            ExErrorKind::InvalidPath => "ERR_INVALID_PATH",
            ExErrorKind::Resolution => "ERR_RESOLUTION",
            ExErrorKind::HandlerNotFound => "ERR_HANDLER_NOT_FOUND",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Dispatch => "ERR_DISPATCH",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether this kind is an assertion verdict rather than a setup failure
    pub fn is_verdict(&self) -> bool {
        matches!(self, ExErrorKind::Mismatch | ExErrorKind::Condition)
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context a
/// reader needs to find the failing fixture: operation, location inside the
/// document, and the path expression being checked.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    location: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            location: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add document location context (e.g. `$.data[0].id`)
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add path expression context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the document location, if any
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Get the path expression, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(location) = &self.location {
            write!(f, " (location: {})", location)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for assertion and fixture operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssertError {
    // ===== Verdicts =====
    /// Two values differ under value equality
    #[error("{description} failed at {location}: expected {expected}, actual {actual}")]
    Mismatch {
        description: String,
        location: String,
        expected: Value,
        actual: Value,
    },

    /// A boolean precondition did not hold (counts, membership, coverage)
    #[error("{description} failed at {location}: {message}")]
    Condition {
        description: String,
        location: String,
        message: String,
    },

    // ===== Inputs =====
    /// A path expression could not be parsed
    #[error("Invalid path expression `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A fixture could not be located or loaded
    #[error("Failed to resolve fixture {origin}: {reason}")]
    Resolution { origin: String, reason: String },

    /// A fixture named an action with no registered handler
    #[error("No assertion handler registered for action `{action}`")]
    HandlerNotFound { action: String },

    /// Configuration missing or malformed
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    // ===== Infrastructure =====
    /// Request could not be sent or its body decoded
    #[error("Request to {url} failed: {reason}")]
    Dispatch { url: String, reason: String },

    /// Filesystem failure outside fixture loading
    #[error("I/O error: {message}")]
    Io { message: String },

    /// JSON encode/decode failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl AssertError {
    /// Location inside the document where a verdict was raised
    pub fn location(&self) -> Option<&str> {
        match self {
            AssertError::Mismatch { location, .. } | AssertError::Condition { location, .. } => {
                Some(location)
            }
            _ => None,
        }
    }

    /// Whether this error is a failed assertion rather than a setup failure
    pub fn is_verdict(&self) -> bool {
        matches!(
            self,
            AssertError::Mismatch { .. } | AssertError::Condition { .. }
        )
    }
}

impl From<AssertError> for ExError {
    fn from(err: AssertError) -> Self {
        let message = err.to_string();
        match err {
            AssertError::Mismatch { location, .. } => ExError::new(ExErrorKind::Mismatch)
                .with_op("assert_equal")
                .with_location(location)
                .with_message(message),

            AssertError::Condition { location, .. } => ExError::new(ExErrorKind::Condition)
                .with_op("assert_true")
                .with_location(location)
                .with_message(message),

            AssertError::InvalidPath { path, .. } => ExError::new(ExErrorKind::InvalidPath)
                .with_op("parse_path")
                .with_path(path)
                .with_message(message),

            AssertError::Resolution { .. } => ExError::new(ExErrorKind::Resolution)
                .with_op("load_case")
                .with_message(message),

            AssertError::HandlerNotFound { .. } => ExError::new(ExErrorKind::HandlerNotFound)
                .with_op("dispatch_action")
                .with_message(message),

            AssertError::Config { .. } => ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(message),

            AssertError::Dispatch { .. } => ExError::new(ExErrorKind::Dispatch)
                .with_op("send_request")
                .with_message(message),

            AssertError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(message),

            AssertError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for AssertError {
    fn from(err: serde_json::Error) -> Self {
        AssertError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AssertError {
    fn from(err: std::io::Error) -> Self {
        AssertError::Io {
            message: err.to_string(),
        }
    }
}
