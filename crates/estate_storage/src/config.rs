//! Storage service configuration.

use estate_error::{ConfigError, EstateResult};
use serde::{Deserialize, Serialize};

/// Connection settings for the property-photo bucket.
///
/// Constructed once at startup and injected into both the storage backend and
/// the resolver, so tests can point everything at an in-memory bucket.
///
/// ```toml
/// [storage]
/// endpoint = "https://abc.supabase.co"
/// bucket = "property-photos"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base URL of the storage service (scheme and host, no path)
    pub endpoint: String,
    /// Bucket holding property images
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Service key sent on listing calls, if the bucket requires one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request timeout for listings and probes
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_bucket() -> String {
    "property-photos".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl StorageConfig {
    /// Create a configuration without an API key.
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Set the service key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Endpoint without trailing slashes.
    pub fn endpoint_base(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    /// Check that the endpoint and bucket are usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the endpoint is not an `http(s)` URL or the
    /// bucket name is empty or contains a slash, or the timeout is zero.
    pub fn validate(&self) -> EstateResult<()> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::new(format!(
                "storage.endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            ))
            .into());
        }
        if self.bucket.trim().is_empty() {
            return Err(ConfigError::new("storage.bucket must not be empty").into());
        }
        if self.bucket.contains('/') {
            return Err(ConfigError::new(format!(
                "storage.bucket must be a single path segment, got '{}'",
                self.bucket
            ))
            .into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::new("storage.timeout_secs must be at least 1").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_https_endpoint() {
        let config = StorageConfig::new("https://abc.supabase.co/", "property-photos");
        assert!(config.validate().is_ok());
        assert_eq!(config.endpoint_base(), "https://abc.supabase.co");
    }

    #[test]
    fn test_validate_rejects_missing_scheme() {
        let config = StorageConfig::new("abc.supabase.co", "property-photos");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_bucket() {
        let config = StorageConfig::new("https://abc.supabase.co", "  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = StorageConfig::new("https://abc.supabase.co", "property-photos");
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
