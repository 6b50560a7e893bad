//! HTTP error types.

/// Failure to set up the HTTP client that talks to the storage API.
///
/// Produced when `HttpBucketStorage::new` cannot build its `reqwest` client
/// (bad TLS setup, invalid timeout). Request failures against the bucket are
/// reported as storage errors instead.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use estate_error::HttpError;
    ///
    /// let err = HttpError::new("Failed to build HTTP client: no TLS backend");
    /// assert!(err.message.contains("no TLS backend"));
    /// assert!(err.to_string().starts_with("HTTP Error: Failed to build HTTP client"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
