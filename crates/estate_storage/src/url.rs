//! Public URL construction.

use crate::StorageConfig;

/// Path of the public-object endpoint, relative to the storage service root.
pub const PUBLIC_OBJECT_PATH: &str = "/storage/v1/object/public";

/// Builds public object URLs for one bucket.
///
/// Construction is a pure string transform: it cannot fail and cannot tell
/// whether the object exists. Each path segment is percent-encoded so decoded
/// filenames (spaces, unicode) produce valid URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrlBuilder {
    base: String,
}

impl PublicUrlBuilder {
    /// Create a builder for the configured endpoint and bucket.
    pub fn new(config: &StorageConfig) -> Self {
        let base = format!(
            "{}{}/{}",
            config.endpoint_base(),
            PUBLIC_OBJECT_PATH,
            urlencoding::encode(config.bucket.trim())
        );
        Self { base }
    }

    /// URL prefix shared by every object in the bucket, without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Build the public URL for a bucket-relative path.
    pub fn build(&self, path: &str) -> String {
        let encoded = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}", self.base, encoded)
    }
}
