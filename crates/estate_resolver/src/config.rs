//! Resolver configuration.

use estate_storage::ListOptions;
use serde::{Deserialize, Serialize};

/// Maximum number of photos attached to a property.
pub const MAX_PHOTOS: usize = 24;

/// Bounds on the breadth-first bucket search.
///
/// ```toml
/// [resolver.locator]
/// list_limit = 1000
/// max_prefixes = 256
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Entries requested per listing call
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    /// Listing calls allowed for a single search
    #[serde(default = "default_max_prefixes")]
    pub max_prefixes: usize,
}

fn default_list_limit() -> usize {
    1000
}

fn default_max_prefixes() -> usize {
    256
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
            max_prefixes: default_max_prefixes(),
        }
    }
}

impl LocatorConfig {
    /// Listing options for one call: capped, newest first.
    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            limit: self.list_limit,
            ..ListOptions::default()
        }
    }
}

/// Settings for [`ImageResolver`](crate::ImageResolver).
///
/// # Example
///
/// ```
/// use estate_resolver::ResolverConfig;
///
/// let config = ResolverConfig::builder()
///     .max_photos(12usize)
///     .verify_candidates(false)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_photos, 12);
/// assert!(ResolverConfig::builder().max_photos(0usize).build().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_builder::Builder)]
#[builder(default, setter(into), build_fn(validate = "Self::validate"))]
pub struct ResolverConfig {
    /// Cap on URLs returned per property
    #[serde(default = "default_max_photos")]
    pub max_photos: usize,
    /// Probe candidates for existence before accepting one.
    ///
    /// When off, the first candidate is accepted without a round trip and the
    /// bucket search only runs for references that yield no candidates.
    #[serde(default = "default_verify_candidates")]
    pub verify_candidates: bool,
    /// Bucket search bounds
    #[serde(default)]
    pub locator: LocatorConfig,
}

fn default_max_photos() -> usize {
    MAX_PHOTOS
}

fn default_verify_candidates() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_photos: default_max_photos(),
            verify_candidates: default_verify_candidates(),
            locator: LocatorConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Start a builder seeded with defaults.
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::default()
    }
}

impl ResolverConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.max_photos == Some(0) {
            return Err("max_photos must be at least 1".to_string());
        }
        if let Some(locator) = &self.locator
            && (locator.list_limit == 0 || locator.max_prefixes == 0)
        {
            return Err("locator limits must be at least 1".to_string());
        }
        Ok(())
    }
}
