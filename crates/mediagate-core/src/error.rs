//! Error types module
//!
//! Resolution failures are unified under [`ResolveError`]. A "no match" against a
//! bucket's transform pattern and an unknown preset name are normal outcomes, not
//! errors, so they never appear here.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed client paths
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_PATH")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Unknown bucket: {0}")]
    UnknownBucket(String),

    #[error("Object {0} has no parent")]
    NoParent(String),
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, log_level).
fn resolve_error_static_metadata(
    err: &ResolveError,
) -> (u16, &'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        ResolveError::InvalidPath(_) => (
            400,
            "INVALID_PATH",
            false,
            Some("Request paths must look like /{bucket}/{key}"),
            LogLevel::Debug,
        ),
        ResolveError::UnknownBucket(_) => (
            404,
            "UNKNOWN_BUCKET",
            false,
            Some("Verify the bucket name is configured"),
            LogLevel::Debug,
        ),
        ResolveError::NoParent(_) => (500, "NO_PARENT", false, None, LogLevel::Error),
    }
}

impl ResolveError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            ResolveError::InvalidPath(_) => "InvalidPath",
            ResolveError::UnknownBucket(_) => "UnknownBucket",
            ResolveError::NoParent(_) => "NoParent",
        }
    }
}

impl ErrorMetadata for ResolveError {
    fn http_status_code(&self) -> u16 {
        resolve_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        resolve_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        resolve_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        resolve_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        resolve_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            ResolveError::InvalidPath(_) => "Invalid path".to_string(),
            ResolveError::UnknownBucket(ref bucket) => format!("Unknown bucket: {}", bucket),
            ResolveError::NoParent(_) => "Internal server error".to_string(),
        }
    }
}
