//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, HttpError, JsonError, RepositoryError, StorageError,
};

/// Every error condition the workspace can report.
///
/// # Examples
///
/// ```
/// use estate_error::{EstateError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: EstateError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum EstateErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Property row store error
    #[from(RepositoryError)]
    Repository(RepositoryError),
}

/// Estate error with kind discrimination.
///
/// # Examples
///
/// ```
/// use estate_error::{ConfigError, EstateResult};
///
/// fn might_fail() -> EstateResult<()> {
///     Err(ConfigError::new("Missing bucket"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Estate Error: {}", _0)]
pub struct EstateError(Box<EstateErrorKind>);

impl EstateError {
    /// Create a new error from a kind.
    pub fn new(kind: EstateErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &EstateErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to EstateErrorKind
impl<T> From<T> for EstateError
where
    T: Into<EstateErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for EstateErrorKind {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        EstateErrorKind::Json(JsonError::new(err.to_string()))
    }
}

/// Result type for Estate operations.
pub type EstateResult<T> = std::result::Result<T, EstateError>;
