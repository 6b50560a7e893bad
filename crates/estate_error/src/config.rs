//! Configuration error types.

/// Invalid or unreadable Estate configuration.
///
/// Covers the layered `estate.toml` sources and `ESTATE__*` overrides failing
/// to load or deserialize, values rejected by validation (empty bucket,
/// non-http endpoint, zero timeout or concurrency), and `estate config`
/// failing to render. Raised at startup, never per resolution.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use estate_error::ConfigError;
    ///
    /// let err = ConfigError::new("storage.bucket must not be empty");
    /// assert!(err.message.contains("storage.bucket"));
    /// assert!(err.file.ends_with(".rs"));
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
