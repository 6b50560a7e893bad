//! HTTP storage backend.
//!
//! Talks to a Supabase-compatible storage API: folder listings through the
//! object list endpoint and existence probes through `HEAD` on public URLs.

use crate::{BucketStorage, ListOptions, PublicUrlBuilder, SortOrder, StorageConfig, StorageEntry};
use chrono::{DateTime, Utc};
use estate_error::{EstateResult, HttpError, StorageError, StorageErrorKind};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

/// Request body for the object list endpoint.
#[derive(Debug, Serialize)]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: usize,
    offset: usize,
    #[serde(rename = "sortBy")]
    sort_by: SortBy,
}

#[derive(Debug, Serialize)]
struct SortBy {
    column: &'static str,
    order: &'static str,
}

impl From<SortOrder> for SortBy {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::UpdatedAtDesc => SortBy {
                column: "updated_at",
                order: "desc",
            },
            SortOrder::NameAsc => SortBy {
                column: "name",
                order: "asc",
            },
        }
    }
}

/// One element of the list endpoint's response.
///
/// Folders come back without an `id`.
#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<ListedObject> for StorageEntry {
    fn from(object: ListedObject) -> Self {
        if object.id.is_some() {
            StorageEntry::file(object.name, object.updated_at)
        } else {
            StorageEntry::folder(object.name)
        }
    }
}

/// Bucket backend over the storage service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpBucketStorage {
    config: StorageConfig,
    urls: PublicUrlBuilder,
    client: reqwest::Client,
}

impl HttpBucketStorage {
    /// Create a backend for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration does not validate, or
    /// `HttpError` if the HTTP client cannot be built.
    #[instrument(skip(config), fields(endpoint = %config.endpoint, bucket = %config.bucket))]
    pub fn new(config: StorageConfig) -> EstateResult<Self> {
        config.validate()?;
        tracing::debug!("Creating HTTP bucket storage");

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            urls: PublicUrlBuilder::new(&config),
            config,
            client,
        })
    }

    /// Use a preconfigured client (timeouts, proxies).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Get the storage configuration.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn list_url(&self) -> String {
        format!(
            "{}/storage/v1/object/list/{}",
            self.config.endpoint_base(),
            urlencoding::encode(&self.config.bucket)
        )
    }

    fn list_failed(prefix: &str, reason: impl Into<String>) -> StorageError {
        StorageError::new(StorageErrorKind::ListFailed {
            prefix: prefix.to_string(),
            reason: reason.into(),
        })
    }
}

#[async_trait::async_trait]
impl BucketStorage for HttpBucketStorage {
    fn bucket(&self) -> &str {
        &self.config.bucket
    }

    #[instrument(skip(self, options), fields(bucket = %self.config.bucket, limit = options.limit))]
    async fn list(&self, prefix: &str, options: &ListOptions) -> EstateResult<Vec<StorageEntry>> {
        let body = ListRequest {
            prefix,
            limit: options.limit,
            offset: 0,
            sort_by: options.sort.into(),
        };

        let mut req = self.client.post(self.list_url()).json(&body);
        if let Some(api_key) = &self.config.api_key {
            req = req
                .header("apikey", api_key)
                .header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await.map_err(|e| {
            tracing::debug!(error = %e, "List request failed");
            Self::list_failed(prefix, format!("request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::list_failed(prefix, format!("storage returned {}", status)).into());
        }

        let objects: Vec<ListedObject> = response.json().await.map_err(|e| {
            StorageError::new(StorageErrorKind::Deserialization(format!(
                "list response for '{}': {}",
                prefix, e
            )))
        })?;

        let mut entries: Vec<StorageEntry> = objects
            .into_iter()
            .filter(|object| !object.name.is_empty())
            .map(StorageEntry::from)
            .collect();
        // The service sorts, but placeholder objects can shuffle folders around.
        options.sort_entries(&mut entries);
        entries.truncate(options.limit);

        tracing::debug!(count = entries.len(), "Listed prefix");
        Ok(entries)
    }

    fn public_url(&self, path: &str) -> String {
        self.urls.build(path)
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    async fn exists(&self, path: &str) -> EstateResult<bool> {
        let url = self.urls.build(path);
        let response = self.client.head(&url).send().await.map_err(|e| {
            StorageError::new(StorageErrorKind::ProbeFailed {
                path: path.to_string(),
                reason: format!("request failed: {}", e),
            })
        })?;

        match response.status() {
            status if status.is_success() => Ok(true),
            // Supabase answers 400 for objects missing from public buckets
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => Ok(false),
            status => Err(StorageError::new(StorageErrorKind::ProbeFailed {
                path: path.to_string(),
                reason: format!("storage returned {}", status),
            })
            .into()),
        }
    }
}
