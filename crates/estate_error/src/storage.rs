//! Storage error types.

/// Kinds of object storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Listing a bucket prefix failed
    #[display("Failed to list prefix '{}': {}", prefix, reason)]
    ListFailed {
        /// The prefix being listed
        prefix: String,
        /// Reason reported by the backend
        reason: String,
    },
    /// Existence probe for an object failed
    #[display("Failed to probe object '{}': {}", path, reason)]
    ProbeFailed {
        /// The bucket-relative object path
        path: String,
        /// Reason reported by the backend
        reason: String,
    },
    /// Storage response could not be decoded
    #[display("Malformed storage response: {}", _0)]
    Deserialization(String),
    /// Storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use estate_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::ListFailed {
///     prefix: "prop1".to_string(),
///     reason: "storage returned 503".to_string(),
/// });
/// assert!(format!("{}", err).contains("Failed to list prefix 'prop1'"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorageErrorKind {
        &self.kind
    }
}
