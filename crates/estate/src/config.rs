//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (include_str! from estate.toml)
//! - `~/.config/estate/estate.toml`
//! - `./estate.toml`
//! - `ESTATE__<SECTION>__<KEY>` environment variables

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use estate_error::{BuilderError, ConfigError, EstateError, EstateResult};
use estate_listing::{ListingConfig, PropertyRepository, PropertyStore};
use estate_resolver::{ImageResolver, ResolverConfig};
use estate_storage::{HttpBucketStorage, StorageConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../../../estate.toml");

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstateConfig {
    /// Bucket endpoint and credentials
    pub storage: StorageConfig,
    /// Resolution limits
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Listing page fan-out
    #[serde(default)]
    pub listing: ListingConfig,
}

impl EstateConfig {
    /// Load with precedence: environment > current dir > home dir > bundled defaults.
    pub fn load() -> EstateResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/estate/estate.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("estate").required(false));

        Self::finish(builder.add_source(Self::environment()))
    }

    /// Load bundled defaults overridden by one file, then the environment.
    pub fn from_file(path: impl AsRef<Path>) -> EstateResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration from file");

        let builder = Self::defaults()
            .add_source(File::from(path))
            .add_source(Self::environment());

        Self::finish(builder)
    }

    /// Parse a TOML document layered over the bundled defaults.
    pub fn from_toml_str(toml: &str) -> EstateResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Check every section.
    pub fn validate(&self) -> EstateResult<()> {
        self.storage.validate()?;

        ResolverConfig::builder()
            .max_photos(self.resolver.max_photos)
            .verify_candidates(self.resolver.verify_candidates)
            .locator(self.resolver.locator)
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        if self.listing.concurrency == 0 {
            return Err(ConfigError::new("listing.concurrency must be at least 1").into());
        }
        Ok(())
    }

    /// Resolver backed by the configured HTTP bucket.
    pub fn http_resolver(&self) -> EstateResult<ImageResolver> {
        let storage = HttpBucketStorage::new(self.storage.clone())?;
        Ok(ImageResolver::new(Arc::new(storage), self.resolver))
    }

    /// Repository over `store`, resolving against the configured bucket.
    pub fn repository(&self, store: Arc<dyn PropertyStore>) -> EstateResult<PropertyRepository> {
        Ok(PropertyRepository::new(store, self.http_resolver()?, self.listing))
    }

    /// Copy safe to print, with the API key masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.storage.api_key.is_some() {
            copy.storage.api_key = Some("********".to_string());
        }
        copy
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn environment() -> Environment {
        Environment::with_prefix("ESTATE")
            .separator("__")
            .try_parsing(true)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> EstateResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                EstateError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                EstateError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults() {
        let config = EstateConfig::from_toml_str("").unwrap();

        assert_eq!(config.storage.bucket, "property-photos");
        assert_eq!(config.storage.endpoint, "http://localhost:54321");
        assert_eq!(config.resolver, ResolverConfig::default());
        assert_eq!(config.listing, ListingConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = EstateConfig::from_toml_str(
            r#"
            [storage]
            endpoint = "https://abc.supabase.co"

            [resolver.locator]
            max_prefixes = 32
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.endpoint, "https://abc.supabase.co");
        assert_eq!(config.storage.bucket, "property-photos");
        assert_eq!(config.resolver.locator.max_prefixes, 32);
        assert_eq!(config.resolver.locator.list_limit, 1000);
        assert!(config.resolver.verify_candidates);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for toml in [
            "[storage]\nendpoint = \"ftp://abc\"",
            "[resolver]\nmax_photos = 0",
            "[resolver.locator]\nmax_prefixes = 0",
            "[listing]\nconcurrency = 0",
        ] {
            assert!(EstateConfig::from_toml_str(toml).is_err(), "accepted: {toml}");
        }
    }

    #[test]
    fn test_redacted_masks_key() {
        let config = EstateConfig::from_toml_str("[storage]\napi_key = \"secret\"").unwrap();

        let shown = config.redacted();
        assert_eq!(shown.storage.api_key.as_deref(), Some("********"));
        assert_eq!(config.storage.api_key.as_deref(), Some("secret"));
    }
}
